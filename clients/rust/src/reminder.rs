use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use sehat_saathi_api_structs::*;
use sehat_saathi_domain::{AdherenceStatus, Recurrence, ID};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub title: String,
    /// Defaults to `medicine`
    pub category: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub recurrence: Option<Recurrence>,
    pub dosage: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Default)]
pub struct UpdateReminderInput {
    pub reminder_id: ID,
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub recurrence: Option<Recurrence>,
    pub dosage: Option<String>,
    pub enabled: Option<bool>,
}

pub struct CreateReminderLogInput {
    pub reminder_id: ID,
    pub status: AdherenceStatus,
    pub taken_at: Option<i64>,
    pub notes: Option<String>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("api/reminders".into(), StatusCode::OK).await
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            title: input.title,
            category: input.category,
            date: input.date,
            time: input.time,
            recurrence: input.recurrence,
            dosage: input.dosage,
            enabled: input.enabled,
        };
        self.base
            .post(body, "api/reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        let body = update_reminder::RequestBody {
            title: input.title,
            category: input.category,
            date: input.date,
            time: input.time,
            recurrence: input.recurrence,
            dosage: input.dosage,
            enabled: input.enabled,
        };
        self.base
            .put(
                body,
                format!("api/reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: &ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("api/reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    /// Pushes the reminder `duration` minutes into the future, the server
    /// default is used when no duration is given
    pub async fn snooze(
        &self,
        reminder_id: &ID,
        duration: Option<i64>,
    ) -> APIResponse<snooze_reminder::APIResponse> {
        let body = snooze_reminder::RequestBody { duration };
        self.base
            .patch(
                body,
                format!("api/reminders/{}/snooze", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn create_log(
        &self,
        input: CreateReminderLogInput,
    ) -> APIResponse<create_reminder_log::APIResponse> {
        let body = create_reminder_log::RequestBody {
            status: input.status,
            taken_at: input.taken_at,
            notes: input.notes,
        };
        self.base
            .post(
                body,
                format!("api/reminders/{}/logs", input.reminder_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get_logs(&self, reminder_id: &ID) -> APIResponse<get_reminder_logs::APIResponse> {
        self.base
            .get(format!("api/reminders/{}/logs", reminder_id), StatusCode::OK)
            .await
    }
}
