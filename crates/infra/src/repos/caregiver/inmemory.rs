use super::ICaregiverRepo;
use crate::repos::shared::inmemory_repo::*;
use sehat_saathi_domain::{Caregiver, ID};

pub struct InMemoryCaregiverRepo {
    caregivers: std::sync::Mutex<Vec<Caregiver>>,
}

impl InMemoryCaregiverRepo {
    pub fn new() -> Self {
        Self {
            caregivers: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ICaregiverRepo for InMemoryCaregiverRepo {
    async fn insert(&self, caregiver: &Caregiver) -> anyhow::Result<()> {
        let duplicate = count_by(&self.caregivers, |c| {
            c.patient_id == caregiver.patient_id
                && c.caregiver_email.eq_ignore_ascii_case(&caregiver.caregiver_email)
        }) > 0;
        if duplicate {
            return Err(anyhow::anyhow!(
                "Caregiver {} is already invited by patient {}",
                caregiver.caregiver_email,
                caregiver.patient_id
            ));
        }
        insert(caregiver, &self.caregivers);
        Ok(())
    }

    async fn find_by_patient(&self, patient_id: &ID) -> anyhow::Result<Vec<Caregiver>> {
        Ok(find_by(&self.caregivers, |c| c.patient_id == *patient_id))
    }

    async fn find_by_patient_and_email(&self, patient_id: &ID, email: &str) -> Option<Caregiver> {
        find_by(&self.caregivers, |c| {
            c.patient_id == *patient_id && c.caregiver_email.eq_ignore_ascii_case(email)
        })
        .pop()
    }

    async fn find_by_caregiver(
        &self,
        user_id: &ID,
        email: &str,
    ) -> anyhow::Result<Vec<Caregiver>> {
        Ok(find_by(&self.caregivers, |c| {
            c.caregiver_id.as_ref() == Some(user_id) || c.caregiver_email.eq_ignore_ascii_case(email)
        }))
    }
}
