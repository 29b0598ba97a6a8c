use super::ICaregiverRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use sehat_saathi_domain::{Caregiver, CaregiverPermissions, CaregiverStatus, ID};
use serde::{Deserialize, Serialize};

pub struct MongoCaregiverRepo {
    collection: Collection<Document>,
}

impl MongoCaregiverRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("caregivers"),
        }
    }

    /// A patient can only invite the same email once
    pub async fn create_indexes(&self) -> anyhow::Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "patient_id": 1, "caregiver_email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ICaregiverRepo for MongoCaregiverRepo {
    async fn insert(&self, caregiver: &Caregiver) -> anyhow::Result<()> {
        mongo_repo::insert::<_, CaregiverMongo>(&self.collection, caregiver).await
    }

    async fn find_by_patient(&self, patient_id: &ID) -> anyhow::Result<Vec<Caregiver>> {
        let filter = doc! { "patient_id": patient_id.as_string() };
        mongo_repo::find_many_by::<_, CaregiverMongo>(&self.collection, filter, None).await
    }

    async fn find_by_patient_and_email(&self, patient_id: &ID, email: &str) -> Option<Caregiver> {
        let filter = doc! {
            "patient_id": patient_id.as_string(),
            "caregiver_email": email.to_lowercase(),
        };
        mongo_repo::find_one_by::<_, CaregiverMongo>(&self.collection, filter).await
    }

    async fn find_by_caregiver(
        &self,
        user_id: &ID,
        email: &str,
    ) -> anyhow::Result<Vec<Caregiver>> {
        let filter = doc! {
            "$or": [
                { "caregiver_id": user_id.as_string() },
                { "caregiver_email": email.to_lowercase() },
            ]
        };
        mongo_repo::find_many_by::<_, CaregiverMongo>(&self.collection, filter, None).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CaregiverMongo {
    _id: ID,
    patient_id: ID,
    caregiver_id: Option<ID>,
    caregiver_email: String,
    name: String,
    relationship: String,
    permissions: CaregiverPermissions,
    status: CaregiverStatus,
    created: i64,
}

impl MongoDocument<Caregiver> for CaregiverMongo {
    fn to_domain(self) -> Caregiver {
        Caregiver {
            id: self._id,
            patient_id: self.patient_id,
            caregiver_id: self.caregiver_id,
            caregiver_email: self.caregiver_email,
            name: self.name,
            relationship: self.relationship,
            permissions: self.permissions,
            status: self.status,
            created: self.created,
        }
    }

    fn from_domain(caregiver: &Caregiver) -> Self {
        Self {
            _id: caregiver.id.clone(),
            patient_id: caregiver.patient_id.clone(),
            caregiver_id: caregiver.caregiver_id.clone(),
            caregiver_email: caregiver.caregiver_email.to_lowercase(),
            name: caregiver.name.clone(),
            relationship: caregiver.relationship.clone(),
            permissions: caregiver.permissions,
            status: caregiver.status,
            created: caregiver.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! { "_id": self._id.as_string() }
    }
}
