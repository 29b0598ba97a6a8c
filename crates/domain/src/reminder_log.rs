use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdherenceStatus {
    Taken,
    Skipped,
    Missed,
}

impl AdherenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Taken => "taken",
            Self::Skipped => "skipped",
            Self::Missed => "missed",
        }
    }
}

/// Append only record of what the user did about a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderLog {
    pub id: ID,
    pub user_id: ID,
    pub reminder_id: ID,
    pub status: AdherenceStatus,
    pub taken_at: Option<i64>,
    pub notes: Option<String>,
    pub created: i64,
}

impl Entity for ReminderLog {
    fn id(&self) -> &ID {
        &self.id
    }
}
