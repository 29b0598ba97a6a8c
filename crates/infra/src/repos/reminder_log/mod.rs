mod inmemory;
mod mongo;

pub use inmemory::InMemoryReminderLogRepo;
pub use mongo::MongoReminderLogRepo;
use sehat_saathi_domain::{ReminderLog, ID};

#[async_trait::async_trait]
pub trait IReminderLogRepo: Send + Sync {
    async fn insert(&self, log: &ReminderLog) -> anyhow::Result<()>;
    /// Logs the user wrote for the `Reminder`, newest first
    async fn find_by_reminder(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Vec<ReminderLog>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use sehat_saathi_domain::{AdherenceStatus, ReminderLog, ID};

    #[tokio::test]
    async fn lists_logs_of_reminder_newest_first() {
        let ctx = setup_context().await.unwrap();
        let user_id = ID::new();
        let reminder_id = ID::new();
        for (created, status) in [(1, AdherenceStatus::Taken), (2, AdherenceStatus::Missed)]
            .iter()
            .cloned()
        {
            let log = ReminderLog {
                id: Default::default(),
                user_id: user_id.clone(),
                reminder_id: reminder_id.clone(),
                status,
                taken_at: None,
                notes: None,
                created,
            };
            ctx.repos.reminder_logs.insert(&log).await.unwrap();
        }

        let logs = ctx
            .repos
            .reminder_logs
            .find_by_reminder(&reminder_id, &user_id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].status, AdherenceStatus::Missed);

        let logs = ctx
            .repos
            .reminder_logs
            .find_by_reminder(&reminder_id, &ID::new())
            .await
            .unwrap();
        assert!(logs.is_empty());
    }
}
