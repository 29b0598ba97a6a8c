mod inmemory;
mod mongo;

pub use inmemory::InMemoryOrderRepo;
pub use mongo::MongoOrderRepo;
use sehat_saathi_domain::{Order, ID};

#[async_trait::async_trait]
pub trait IOrderRepo: Send + Sync {
    async fn insert(&self, order: &Order) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Order>>;
}
