use super::INotificationRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use sehat_saathi_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find_recent_by_user(
        &self,
        user_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n| n.user_id == *user_id);
        // Stable sort keeps insertion order for equal timestamps, reverse it
        notifications.reverse();
        notifications.sort_by(|n1, n2| n2.created.cmp(&n1.created));
        notifications.truncate(limit.max(0) as usize);
        Ok(notifications)
    }

    async fn count_unread(&self, user_id: &ID) -> anyhow::Result<u64> {
        Ok(count_by(&self.notifications, |n| {
            n.user_id == *user_id && !n.is_read
        }))
    }

    async fn mark_read(
        &self,
        notification_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Notification>> {
        let mut updated = update_many(
            &self.notifications,
            |n| n.id == *notification_id && n.user_id == *user_id,
            |n| n.is_read = true,
        );
        Ok(updated.pop())
    }

    async fn mark_all_read(&self, user_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.notifications,
            |n| n.user_id == *user_id && !n.is_read,
            |n| n.is_read = true,
        );
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.notifications, |n| n.user_id == *user_id))
    }
}
