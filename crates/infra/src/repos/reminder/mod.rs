mod inmemory;
mod mongo;

pub use inmemory::InMemoryReminderRepo;
pub use mongo::MongoReminderRepo;
use sehat_saathi_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Finds the `Reminder` only if it is owned by the given user
    async fn find_by_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder>;
    /// All `Reminder`s of the user sorted by date and time
    async fn find_all_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// All enabled `Reminder`s whose time of day is exactly `time`
    async fn find_enabled_at(&self, time: &str) -> anyhow::Result<Vec<Reminder>>;
    async fn delete_by_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder>;
}
