use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaregiverStatus {
    Pending,
    Active,
    Rejected,
}

impl Default for CaregiverStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverPermissions {
    pub can_view_vitals: bool,
    pub can_view_medications: bool,
    pub can_view_appointments: bool,
    #[serde(rename = "canReceiveSOS")]
    pub can_receive_sos: bool,
}

impl Default for CaregiverPermissions {
    fn default() -> Self {
        Self {
            can_view_vitals: true,
            can_view_medications: true,
            can_view_appointments: true,
            can_receive_sos: true,
        }
    }
}

/// Links a patient to a person watching over them. The pair
/// (`patient_id`, `caregiver_email`) is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Caregiver {
    pub id: ID,
    pub patient_id: ID,
    /// Set when the invitee is a registered user
    pub caregiver_id: Option<ID>,
    pub caregiver_email: String,
    pub name: String,
    pub relationship: String,
    pub permissions: CaregiverPermissions,
    pub status: CaregiverStatus,
    pub created: i64,
}

impl Caregiver {
    /// Whether this caregiver should be contacted when the patient triggers an SOS
    pub fn receives_sos(&self) -> bool {
        self.status != CaregiverStatus::Rejected && self.permissions.can_receive_sos
    }

    /// Whether the given user is allowed to watch the patient of this record
    pub fn is_watched_by(&self, user_id: &ID, email: &str) -> bool {
        if self.status == CaregiverStatus::Rejected {
            return false;
        }
        match &self.caregiver_id {
            Some(caregiver_id) if caregiver_id == user_id => true,
            _ => self.caregiver_email.eq_ignore_ascii_case(email),
        }
    }
}

impl Entity for Caregiver {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn caregiver_factory(status: CaregiverStatus) -> Caregiver {
        Caregiver {
            id: Default::default(),
            patient_id: Default::default(),
            caregiver_id: None,
            caregiver_email: "mom@example.com".into(),
            name: "Mom".into(),
            relationship: "parent".into(),
            permissions: Default::default(),
            status,
            created: 0,
        }
    }

    #[test]
    fn rejected_caregivers_do_not_receive_sos() {
        assert!(caregiver_factory(CaregiverStatus::Pending).receives_sos());
        assert!(caregiver_factory(CaregiverStatus::Active).receives_sos());
        assert!(!caregiver_factory(CaregiverStatus::Rejected).receives_sos());

        let mut caregiver = caregiver_factory(CaregiverStatus::Active);
        caregiver.permissions.can_receive_sos = false;
        assert!(!caregiver.receives_sos());
    }

    #[test]
    fn matches_watcher_by_id_or_email() {
        let user_id = ID::new();
        let mut caregiver = caregiver_factory(CaregiverStatus::Active);
        assert!(caregiver.is_watched_by(&user_id, "MOM@example.com"));
        assert!(!caregiver.is_watched_by(&user_id, "dad@example.com"));

        caregiver.caregiver_id = Some(user_id.clone());
        assert!(caregiver.is_watched_by(&user_id, "dad@example.com"));

        caregiver.status = CaregiverStatus::Rejected;
        assert!(!caregiver.is_watched_by(&user_id, "mom@example.com"));
    }
}
