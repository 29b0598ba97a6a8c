use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use sehat_saathi_api_structs::*;
use sehat_saathi_domain::ID;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// The most recent notifications of the user, newest first, and the
    /// number of unread notifications
    pub async fn get(&self) -> APIResponse<get_notifications::APIResponse> {
        self.base
            .get("api/notifications".into(), StatusCode::OK)
            .await
    }

    pub async fn mark_read(
        &self,
        notification_id: &ID,
    ) -> APIResponse<mark_notification_read::APIResponse> {
        self.base
            .put(
                (),
                format!("api/notifications/{}/read", notification_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn mark_all_read(&self) -> APIResponse<mark_all_notifications_read::APIResponse> {
        self.base
            .put((), "api/notifications/read-all".into(), StatusCode::OK)
            .await
    }

    pub async fn clear(&self) -> APIResponse<clear_notifications::APIResponse> {
        self.base
            .delete("api/notifications".into(), StatusCode::OK)
            .await
    }
}
