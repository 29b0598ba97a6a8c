use super::IOrderRepo;
use crate::repos::shared::inmemory_repo::*;
use sehat_saathi_domain::{Order, ID};

pub struct InMemoryOrderRepo {
    orders: std::sync::Mutex<Vec<Order>>,
}

impl InMemoryOrderRepo {
    pub fn new() -> Self {
        Self {
            orders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IOrderRepo for InMemoryOrderRepo {
    async fn insert(&self, order: &Order) -> anyhow::Result<()> {
        insert(order, &self.orders);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Order>> {
        Ok(find_by(&self.orders, |o| o.user_id == *user_id))
    }
}
