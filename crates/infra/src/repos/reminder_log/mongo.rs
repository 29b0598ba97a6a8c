use super::IReminderLogRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection, Database,
};
use sehat_saathi_domain::{AdherenceStatus, ReminderLog, ID};
use serde::{Deserialize, Serialize};

pub struct MongoReminderLogRepo {
    collection: Collection<Document>,
}

impl MongoReminderLogRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminder_logs"),
        }
    }
}

#[async_trait::async_trait]
impl IReminderLogRepo for MongoReminderLogRepo {
    async fn insert(&self, log: &ReminderLog) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ReminderLogMongo>(&self.collection, log).await
    }

    async fn find_by_reminder(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Vec<ReminderLog>> {
        let filter = doc! {
            "reminder_id": reminder_id.as_string(),
            "user_id": user_id.as_string(),
        };
        let options = FindOptions::builder().sort(doc! { "created": -1 }).build();
        mongo_repo::find_many_by::<_, ReminderLogMongo>(&self.collection, filter, Some(options))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderLogMongo {
    _id: ID,
    user_id: ID,
    reminder_id: ID,
    status: AdherenceStatus,
    taken_at: Option<i64>,
    notes: Option<String>,
    created: i64,
}

impl MongoDocument<ReminderLog> for ReminderLogMongo {
    fn to_domain(self) -> ReminderLog {
        ReminderLog {
            id: self._id,
            user_id: self.user_id,
            reminder_id: self.reminder_id,
            status: self.status,
            taken_at: self.taken_at,
            notes: self.notes,
            created: self.created,
        }
    }

    fn from_domain(log: &ReminderLog) -> Self {
        Self {
            _id: log.id.clone(),
            user_id: log.user_id.clone(),
            reminder_id: log.reminder_id.clone(),
            status: log.status,
            taken_at: log.taken_at,
            notes: log.notes.clone(),
            created: log.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! { "_id": self._id.as_string() }
    }
}
