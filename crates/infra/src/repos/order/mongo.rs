use super::IOrderRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use sehat_saathi_domain::{Order, OrderItem, OrderStatus, PaymentStatus, ID};
use serde::{Deserialize, Serialize};

pub struct MongoOrderRepo {
    collection: Collection<Document>,
}

impl MongoOrderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("orders"),
        }
    }
}

#[async_trait::async_trait]
impl IOrderRepo for MongoOrderRepo {
    async fn insert(&self, order: &Order) -> anyhow::Result<()> {
        mongo_repo::insert::<_, OrderMongo>(&self.collection, order).await
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Order>> {
        let filter = doc! { "user_id": user_id.as_string() };
        mongo_repo::find_many_by::<_, OrderMongo>(&self.collection, filter, None).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OrderMongo {
    _id: ID,
    user_id: ID,
    items: Vec<OrderItem>,
    total_amount: f64,
    status: OrderStatus,
    payment_status: PaymentStatus,
    created: i64,
}

impl MongoDocument<Order> for OrderMongo {
    fn to_domain(self) -> Order {
        Order {
            id: self._id,
            user_id: self.user_id,
            items: self.items,
            total_amount: self.total_amount,
            status: self.status,
            payment_status: self.payment_status,
            created: self.created,
        }
    }

    fn from_domain(order: &Order) -> Self {
        Self {
            _id: order.id.clone(),
            user_id: order.user_id.clone(),
            items: order.items.clone(),
            total_amount: order.total_amount,
            status: order.status,
            payment_status: order.payment_status,
            created: order.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! { "_id": self._id.as_string() }
    }
}
