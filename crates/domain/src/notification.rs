use crate::{
    shared::entity::{Entity, ID},
    Reminder,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Medication,
    Appointment,
    System,
    Reminder,
}

impl Default for NotificationKind {
    fn default() -> Self {
        Self::System
    }
}

impl NotificationKind {
    /// Kinds the client should play an audible cue for
    pub fn is_audible(&self) -> bool {
        matches!(self, Self::Medication | Self::Reminder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
}

impl Default for NotificationPriority {
    fn default() -> Self {
        Self::Normal
    }
}

/// A `Notification` is a message to a user. Once created only
/// `is_read` is ever changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub priority: NotificationPriority,
    pub is_read: bool,
    pub action_url: Option<String>,
    /// Free form data, e.g. `{"reminderId": ".."}` for reminder notifications
    pub metadata: Option<Value>,
    pub created: i64,
}

pub const REMINDER_NOTIFICATION_TITLE: &str = "Health Reminder";

impl Notification {
    pub fn new(user_id: ID, title: String, message: String, created: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title,
            message,
            kind: Default::default(),
            priority: Default::default(),
            is_read: false,
            action_url: None,
            metadata: None,
            created,
        }
    }

    /// The `Notification` sent to the owner when a `Reminder` fires
    pub fn for_reminder(reminder: &Reminder, created: i64) -> Self {
        let mut notification = Self::new(
            reminder.user_id.clone(),
            REMINDER_NOTIFICATION_TITLE.into(),
            reminder.notification_message(),
            created,
        );
        notification.kind = NotificationKind::Reminder;
        notification.priority = NotificationPriority::High;
        notification.metadata = Some(json!({ "reminderId": reminder.id }));
        notification
    }

    /// The `Reminder` this `Notification` was created for, if any.
    /// The link is not enforced by the store and may be stale.
    pub fn reminder_id(&self) -> Option<ID> {
        self.metadata
            .as_ref()?
            .get("reminderId")?
            .as_str()?
            .parse()
            .ok()
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}
