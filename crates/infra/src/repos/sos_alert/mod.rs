mod inmemory;
mod mongo;

pub use inmemory::InMemorySOSAlertRepo;
pub use mongo::MongoSOSAlertRepo;
use sehat_saathi_domain::{SOSAlert, ID};

#[async_trait::async_trait]
pub trait ISOSAlertRepo: Send + Sync {
    async fn insert(&self, alert: &SOSAlert) -> anyhow::Result<()>;
    async fn save(&self, alert: &SOSAlert) -> anyhow::Result<()>;
    async fn find(&self, alert_id: &ID) -> Option<SOSAlert>;
}
