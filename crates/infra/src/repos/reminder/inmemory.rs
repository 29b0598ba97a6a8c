use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use sehat_saathi_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders).filter(|r| r.user_id == *user_id)
    }

    async fn find_all_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.user_id == *user_id);
        reminders.sort_by(|r1, r2| (&r1.date, &r1.time).cmp(&(&r2.date, &r2.time)));
        Ok(reminders)
    }

    async fn find_enabled_at(&self, time: &str) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.enabled && r.time == time))
    }

    async fn delete_by_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder> {
        find_and_delete_by(&self.reminders, |r| r.id == *reminder_id && r.user_id == *user_id)
            .pop()
    }
}
