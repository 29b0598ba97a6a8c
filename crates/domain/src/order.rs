use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// A pharmacy order. Orders placed while offline arrive through bulk sync
/// and always start out pending.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: ID,
    pub user_id: ID,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created: i64,
}

impl Order {
    pub fn new(user_id: ID, items: Vec<OrderItem>, total_amount: Option<f64>, created: i64) -> Self {
        let total_amount = total_amount.unwrap_or_else(|| {
            items
                .iter()
                .map(|item| item.price * item.quantity as f64)
                .sum()
        });
        Self {
            id: Default::default(),
            user_id,
            items,
            total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.items.is_empty()
            && self.total_amount >= 0.0
            && self
                .items
                .iter()
                .all(|item| !item.name.trim().is_empty() && item.quantity >= 1 && item.price >= 0.0)
    }
}

impl Entity for Order {
    fn id(&self) -> &ID {
        &self.id
    }
}
