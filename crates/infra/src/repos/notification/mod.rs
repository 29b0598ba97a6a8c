mod inmemory;
mod mongo;

pub use inmemory::InMemoryNotificationRepo;
pub use mongo::MongoNotificationRepo;
use super::shared::repo::DeleteResult;
use sehat_saathi_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// The `limit` most recent `Notification`s of the user, newest first
    async fn find_recent_by_user(
        &self,
        user_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<Notification>>;
    async fn count_unread(&self, user_id: &ID) -> anyhow::Result<u64>;
    /// Marks the `Notification` as read if it is owned by the user and
    /// returns the updated `Notification`
    async fn mark_read(
        &self,
        notification_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Notification>>;
    async fn mark_all_read(&self, user_id: &ID) -> anyhow::Result<()>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult>;
}
