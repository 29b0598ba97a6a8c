use sehat_saathi_domain::{AdherenceStatus, Recurrence, Reminder, ReminderLog, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    #[serde(rename = "type")]
    pub category: String,
    pub date: String,
    pub time: String,
    pub recurrence: Recurrence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    pub enabled: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            title: reminder.title,
            category: reminder.category,
            date: reminder.date,
            time: reminder.time,
            recurrence: reminder.recurrence,
            dosage: reminder.dosage,
            enabled: reminder.enabled,
            created_at: reminder.created,
            updated_at: reminder.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderLogDTO {
    pub id: ID,
    pub user_id: ID,
    pub reminder_id: ID,
    pub status: AdherenceStatus,
    pub taken_at: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl ReminderLogDTO {
    pub fn new(log: ReminderLog) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id,
            reminder_id: log.reminder_id,
            status: log.status,
            taken_at: log.taken_at,
            notes: log.notes,
            created_at: log.created,
        }
    }
}
