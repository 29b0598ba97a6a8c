mod caregiver;
pub mod date;
mod notification;
mod order;
mod reminder;
mod reminder_log;
mod shared;
mod sos_alert;
mod symptom_log;
mod user;

pub use caregiver::{Caregiver, CaregiverPermissions, CaregiverStatus};
pub use chrono_tz::Tz;
pub use date::ClockReading;
pub use notification::{
    Notification, NotificationKind, NotificationPriority, REMINDER_NOTIFICATION_TITLE,
};
pub use order::{Order, OrderItem, OrderStatus, PaymentStatus};
pub use reminder::{Recurrence, Reminder, DEFAULT_SNOOZE_MINUTES, MAX_SNOOZE_MINUTES};
pub use reminder_log::{AdherenceStatus, ReminderLog};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use sos_alert::{Location, SOSAlert, SOSStatus, SOS_EMERGENCY_MESSAGE};
pub use symptom_log::{Severity, SymptomLog};
pub use user::User;
