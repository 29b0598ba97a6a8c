mod inmemory;
mod mongo;

pub use inmemory::InMemoryCaregiverRepo;
pub use mongo::MongoCaregiverRepo;
use sehat_saathi_domain::{Caregiver, ID};

#[async_trait::async_trait]
pub trait ICaregiverRepo: Send + Sync {
    async fn insert(&self, caregiver: &Caregiver) -> anyhow::Result<()>;
    /// Caregivers invited by the patient
    async fn find_by_patient(&self, patient_id: &ID) -> anyhow::Result<Vec<Caregiver>>;
    async fn find_by_patient_and_email(&self, patient_id: &ID, email: &str) -> Option<Caregiver>;
    /// Caregiver records where the given user is the caregiver, either
    /// through a resolved user id or through the invited email
    async fn find_by_caregiver(&self, user_id: &ID, email: &str)
        -> anyhow::Result<Vec<Caregiver>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use sehat_saathi_domain::{Caregiver, ID};

    fn caregiver_factory(patient_id: &ID, email: &str, caregiver_id: Option<ID>) -> Caregiver {
        Caregiver {
            id: Default::default(),
            patient_id: patient_id.clone(),
            caregiver_id,
            caregiver_email: email.into(),
            name: "Ravi".into(),
            relationship: "son".into(),
            permissions: Default::default(),
            status: Default::default(),
            created: 0,
        }
    }

    #[tokio::test]
    async fn finds_caregivers_from_both_sides() {
        let ctx = setup_context().await.unwrap();
        let patient = ID::new();
        let registered = ID::new();
        let by_id = caregiver_factory(&patient, "ravi@example.com", Some(registered.clone()));
        let by_email = caregiver_factory(&ID::new(), "ravi@example.com", None);
        let unrelated = caregiver_factory(&patient, "meera@example.com", None);
        for c in [&by_id, &by_email, &unrelated].iter() {
            ctx.repos.caregivers.insert(c).await.unwrap();
        }

        let mine = ctx.repos.caregivers.find_by_patient(&patient).await.unwrap();
        assert_eq!(mine.len(), 2);

        let existing = ctx
            .repos
            .caregivers
            .find_by_patient_and_email(&patient, "meera@example.com")
            .await;
        assert_eq!(existing.map(|c| c.id), Some(unrelated.id.clone()));

        let patients = ctx
            .repos
            .caregivers
            .find_by_caregiver(&registered, "ravi@example.com")
            .await
            .unwrap();
        let ids = patients.iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&by_id.id));
        assert!(ids.contains(&by_email.id));
    }
}
