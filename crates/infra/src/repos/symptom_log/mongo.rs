use super::ISymptomLogRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use sehat_saathi_domain::{Severity, SymptomLog, ID};
use serde::{Deserialize, Serialize};

pub struct MongoSymptomLogRepo {
    collection: Collection<Document>,
}

impl MongoSymptomLogRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("symptom_logs"),
        }
    }
}

#[async_trait::async_trait]
impl ISymptomLogRepo for MongoSymptomLogRepo {
    async fn insert(&self, log: &SymptomLog) -> anyhow::Result<()> {
        mongo_repo::insert::<_, SymptomLogMongo>(&self.collection, log).await
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<SymptomLog>> {
        let filter = doc! { "user_id": user_id.as_string() };
        mongo_repo::find_many_by::<_, SymptomLogMongo>(&self.collection, filter, None).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SymptomLogMongo {
    _id: ID,
    user_id: ID,
    symptoms: Vec<String>,
    severity: Severity,
    notes: Option<String>,
    created: i64,
}

impl MongoDocument<SymptomLog> for SymptomLogMongo {
    fn to_domain(self) -> SymptomLog {
        SymptomLog {
            id: self._id,
            user_id: self.user_id,
            symptoms: self.symptoms,
            severity: self.severity,
            notes: self.notes,
            created: self.created,
        }
    }

    fn from_domain(log: &SymptomLog) -> Self {
        Self {
            _id: log.id.clone(),
            user_id: log.user_id.clone(),
            symptoms: log.symptoms.clone(),
            severity: log.severity,
            notes: log.notes.clone(),
            created: log.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! { "_id": self._id.as_string() }
    }
}
