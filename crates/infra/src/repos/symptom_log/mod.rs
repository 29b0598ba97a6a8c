mod inmemory;
mod mongo;

pub use inmemory::InMemorySymptomLogRepo;
pub use mongo::MongoSymptomLogRepo;
use sehat_saathi_domain::{SymptomLog, ID};

#[async_trait::async_trait]
pub trait ISymptomLogRepo: Send + Sync {
    async fn insert(&self, log: &SymptomLog) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<SymptomLog>>;
}
