use crate::dtos::NotificationDTO;
use crate::MessageResponse;
use sehat_saathi_domain::{Notification, ID};
use serde::{Deserialize, Serialize};

pub mod get_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
        pub unread_count: u64,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>, unread_count: u64) -> Self {
            Self {
                notifications: notifications.into_iter().map(NotificationDTO::new).collect(),
                unread_count,
            }
        }
    }
}

pub mod mark_notification_read {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationDTO;
}

pub mod mark_all_notifications_read {
    use super::*;

    pub type APIResponse = MessageResponse;
}

pub mod clear_notifications {
    use super::*;

    pub type APIResponse = MessageResponse;
}
