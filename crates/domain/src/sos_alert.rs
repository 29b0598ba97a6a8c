use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SOSStatus {
    Active,
    Resolved,
    FalseAlarm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SOSAlert {
    pub id: ID,
    pub patient_id: ID,
    pub location: Location,
    pub trigger_time: i64,
    pub status: SOSStatus,
    /// Emails (or phone numbers) the alert was sent to
    pub notified_contacts: Vec<String>,
    pub resolved_at: Option<i64>,
}

pub const SOS_EMERGENCY_MESSAGE: &str = "EMERGENCY! Patient needs help immediately.";

impl SOSAlert {
    pub fn new(
        patient_id: ID,
        location: Location,
        notified_contacts: Vec<String>,
        trigger_time: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            patient_id,
            location,
            trigger_time,
            status: SOSStatus::Active,
            notified_contacts,
            resolved_at: None,
        }
    }

    /// Closes an active alert. Returns false if the alert was already closed
    /// or `status` is not a closing status.
    pub fn resolve(&mut self, status: SOSStatus, at: i64) -> bool {
        if self.status != SOSStatus::Active || status == SOSStatus::Active {
            return false;
        }
        self.status = status;
        self.resolved_at = Some(at);
        true
    }
}

impl Entity for SOSAlert {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolves_only_active_alerts() {
        let location = Location {
            latitude: 28.6,
            longitude: 77.2,
            address: None,
        };
        let mut alert = SOSAlert::new(ID::new(), location, vec![], 10);
        assert!(!alert.resolve(SOSStatus::Active, 20));
        assert!(alert.resolve(SOSStatus::FalseAlarm, 20));
        assert_eq!(alert.status, SOSStatus::FalseAlarm);
        assert_eq!(alert.resolved_at, Some(20));
        assert!(!alert.resolve(SOSStatus::Resolved, 30));
        assert_eq!(alert.resolved_at, Some(20));
    }
}
