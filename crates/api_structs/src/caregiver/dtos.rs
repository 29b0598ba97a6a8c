use sehat_saathi_domain::{
    Caregiver, CaregiverPermissions, CaregiverStatus, Location, SOSAlert, SOSStatus, User, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverDTO {
    pub id: ID,
    pub patient_id: ID,
    pub caregiver_id: Option<ID>,
    pub caregiver_email: String,
    pub name: String,
    pub relationship: String,
    pub permissions: CaregiverPermissions,
    pub status: CaregiverStatus,
    pub created_at: i64,
}

impl CaregiverDTO {
    pub fn new(caregiver: Caregiver) -> Self {
        Self {
            id: caregiver.id,
            patient_id: caregiver.patient_id,
            caregiver_id: caregiver.caregiver_id,
            caregiver_email: caregiver.caregiver_email,
            name: caregiver.name,
            relationship: caregiver.relationship,
            permissions: caregiver.permissions,
            status: caregiver.status,
            created_at: caregiver.created,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub name: String,
    pub email: String,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// A caregiver record seen from the caregiver side, with the patient
/// resolved when the patient is a registered user
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientCareDTO {
    #[serde(flatten)]
    pub record: CaregiverDTO,
    pub patient: Option<UserDTO>,
}

impl PatientCareDTO {
    pub fn new(record: Caregiver, patient: Option<User>) -> Self {
        Self {
            record: CaregiverDTO::new(record),
            patient: patient.map(UserDTO::new),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SOSAlertDTO {
    pub id: ID,
    pub patient_id: ID,
    pub location: Location,
    pub trigger_time: i64,
    pub status: SOSStatus,
    pub notified_contacts: Vec<String>,
    pub resolved_at: Option<i64>,
}

impl SOSAlertDTO {
    pub fn new(alert: SOSAlert) -> Self {
        Self {
            id: alert.id,
            patient_id: alert.patient_id,
            location: alert.location,
            trigger_time: alert.trigger_time,
            status: alert.status,
            notified_contacts: alert.notified_contacts,
            resolved_at: alert.resolved_at,
        }
    }
}
