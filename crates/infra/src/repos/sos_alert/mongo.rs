use super::ISOSAlertRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use sehat_saathi_domain::{Location, SOSAlert, SOSStatus, ID};
use serde::{Deserialize, Serialize};

pub struct MongoSOSAlertRepo {
    collection: Collection<Document>,
}

impl MongoSOSAlertRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("sos_alerts"),
        }
    }
}

#[async_trait::async_trait]
impl ISOSAlertRepo for MongoSOSAlertRepo {
    async fn insert(&self, alert: &SOSAlert) -> anyhow::Result<()> {
        mongo_repo::insert::<_, SOSAlertMongo>(&self.collection, alert).await
    }

    async fn save(&self, alert: &SOSAlert) -> anyhow::Result<()> {
        mongo_repo::save::<_, SOSAlertMongo>(&self.collection, alert).await
    }

    async fn find(&self, alert_id: &ID) -> Option<SOSAlert> {
        let filter = doc! { "_id": alert_id.as_string() };
        mongo_repo::find_one_by::<_, SOSAlertMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SOSAlertMongo {
    _id: ID,
    patient_id: ID,
    location: Location,
    trigger_time: i64,
    status: SOSStatus,
    notified_contacts: Vec<String>,
    resolved_at: Option<i64>,
}

impl MongoDocument<SOSAlert> for SOSAlertMongo {
    fn to_domain(self) -> SOSAlert {
        SOSAlert {
            id: self._id,
            patient_id: self.patient_id,
            location: self.location,
            trigger_time: self.trigger_time,
            status: self.status,
            notified_contacts: self.notified_contacts,
            resolved_at: self.resolved_at,
        }
    }

    fn from_domain(alert: &SOSAlert) -> Self {
        Self {
            _id: alert.id.clone(),
            patient_id: alert.patient_id.clone(),
            location: alert.location.clone(),
            trigger_time: alert.trigger_time,
            status: alert.status,
            notified_contacts: alert.notified_contacts.clone(),
            resolved_at: alert.resolved_at,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! { "_id": self._id.as_string() }
    }
}
