use super::IReminderLogRepo;
use crate::repos::shared::inmemory_repo::*;
use sehat_saathi_domain::{ReminderLog, ID};

pub struct InMemoryReminderLogRepo {
    logs: std::sync::Mutex<Vec<ReminderLog>>,
}

impl InMemoryReminderLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderLogRepo for InMemoryReminderLogRepo {
    async fn insert(&self, log: &ReminderLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_reminder(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Vec<ReminderLog>> {
        let mut logs = find_by(&self.logs, |l| {
            l.reminder_id == *reminder_id && l.user_id == *user_id
        });
        logs.sort_by(|l1, l2| l2.created.cmp(&l1.created));
        Ok(logs)
    }
}
