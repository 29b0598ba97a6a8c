use crate::dtos::{ReminderDTO, ReminderLogDTO};
use crate::MessageResponse;
use sehat_saathi_domain::{AdherenceStatus, Recurrence, Reminder, ID};
use serde::{Deserialize, Serialize};

pub mod get_reminders {
    use super::*;

    pub type APIResponse = Vec<ReminderDTO>;

    pub fn to_response(reminders: Vec<Reminder>) -> APIResponse {
        reminders.into_iter().map(ReminderDTO::new).collect()
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(rename = "type")]
        pub category: Option<String>,
        pub date: String,
        pub time: String,
        pub recurrence: Option<Recurrence>,
        pub dosage: Option<String>,
        pub enabled: Option<bool>,
    }

    pub type APIResponse = ReminderDTO;
}

pub mod update_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: Option<String>,
        #[serde(rename = "type")]
        pub category: Option<String>,
        pub date: Option<String>,
        pub time: Option<String>,
        pub recurrence: Option<Recurrence>,
        pub dosage: Option<String>,
        pub enabled: Option<bool>,
    }

    pub type APIResponse = ReminderDTO;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = MessageResponse;
}

pub mod snooze_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct RequestBody {
        /// Minutes from now
        #[serde(alias = "duration_minutes", alias = "durationMinutes")]
        pub duration: Option<i64>,
    }

    pub type APIResponse = ReminderDTO;
}

pub mod create_reminder_log {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub status: AdherenceStatus,
        pub taken_at: Option<i64>,
        pub notes: Option<String>,
    }

    pub type APIResponse = ReminderLogDTO;
}

pub mod get_reminder_logs {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = Vec<ReminderLogDTO>;
}
