use super::IReminderRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection, Database,
};
use sehat_saathi_domain::{Recurrence, Reminder, ID};
use serde::{Deserialize, Serialize};

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::save::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let filter = doc! { "_id": reminder_id.as_string() };
        mongo_repo::find_one_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn find_by_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder> {
        let filter = doc! {
            "_id": reminder_id.as_string(),
            "user_id": user_id.as_string(),
        };
        mongo_repo::find_one_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn find_all_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! { "user_id": user_id.as_string() };
        let options = FindOptions::builder()
            .sort(doc! { "date": 1, "time": 1 })
            .build();
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter, Some(options)).await
    }

    async fn find_enabled_at(&self, time: &str) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "enabled": true,
            "time": time,
        };
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter, None).await
    }

    async fn delete_by_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder> {
        let filter = doc! {
            "_id": reminder_id.as_string(),
            "user_id": user_id.as_string(),
        };
        mongo_repo::delete_one_by::<_, ReminderMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: ID,
    user_id: ID,
    title: String,
    #[serde(rename = "type")]
    category: String,
    date: String,
    time: String,
    recurrence: Recurrence,
    dosage: Option<String>,
    enabled: bool,
    created: i64,
    updated: i64,
}

impl MongoDocument<Reminder> for ReminderMongo {
    fn to_domain(self) -> Reminder {
        Reminder {
            id: self._id,
            user_id: self.user_id,
            title: self.title,
            category: self.category,
            date: self.date,
            time: self.time,
            recurrence: self.recurrence,
            dosage: self.dosage,
            enabled: self.enabled,
            created: self.created,
            updated: self.updated,
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            _id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
            title: reminder.title.clone(),
            category: reminder.category.clone(),
            date: reminder.date.clone(),
            time: reminder.time.clone(),
            recurrence: reminder.recurrence.clone(),
            dosage: reminder.dosage.clone(),
            enabled: reminder.enabled,
            created: reminder.created,
            updated: reminder.updated,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! { "_id": self._id.as_string() }
    }
}
