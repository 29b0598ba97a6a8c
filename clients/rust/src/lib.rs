mod base;
mod caregiver;
mod notification;
mod realtime;
mod reconciler;
mod reminder;
mod status;
mod sync;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use caregiver::CaregiverClient;
pub use caregiver::InviteCaregiverInput;
use notification::NotificationClient;
pub use realtime::{open_channel, ChannelEvent, ChannelHandle, ChannelOptions};
pub use reconciler::{ConnectionState, NotificationApi, NotificationReconciler, Notifier};
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, CreateReminderLogInput, UpdateReminderInput};
pub use sehat_saathi_api_structs::bulk_sync::{SyncError, SyncItem, SyncResults};
pub use sehat_saathi_api_structs::dtos::*;
pub use sehat_saathi_api_structs::{
    ClientMessage, MedicationUpdatePayload, SOSAlertPayload, ServerMessage, TriggerSOSPayload,
};
pub use sehat_saathi_domain::{
    AdherenceStatus, CaregiverPermissions, CaregiverStatus, Location, NotificationKind,
    NotificationPriority, Recurrence, SOSStatus, ID,
};
use status::StatusClient;
use std::sync::Arc;
use std::time::Duration;
use sync::SyncClient;

// Domain
pub use sehat_saathi_api_structs::dtos::CaregiverDTO as Caregiver;
pub use sehat_saathi_api_structs::dtos::NotificationDTO as Notification;
pub use sehat_saathi_api_structs::dtos::ReminderDTO as Reminder;
pub use sehat_saathi_api_structs::dtos::ReminderLogDTO as ReminderLog;
pub use sehat_saathi_api_structs::dtos::SOSAlertDTO as SOSAlert;

/// Delay between two connection attempts of a realtime channel
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Sehat Saathi SDK
///
/// The SDK contains methods for interacting with the Sehat Saathi server
/// API on behalf of one authenticated user.
#[derive(Clone)]
pub struct SehatSDK {
    base: Arc<BaseClient>,
    pub caregiver: CaregiverClient,
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub sync: SyncClient,
}

impl SehatSDK {
    pub fn new<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        let base = Arc::new(base);
        let caregiver = CaregiverClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let sync = SyncClient::new(base.clone());

        Self {
            base,
            caregiver,
            notification,
            reminder,
            status,
            sync,
        }
    }

    fn channel(&self, path: &str, on_connect: Vec<ClientMessage>) -> ChannelOptions {
        ChannelOptions {
            url: realtime::socket_url(self.base.address(), path, self.base.token()),
            on_connect,
            reconnect_delay: RECONNECT_DELAY,
        }
    }

    /// Opens the private notification channel of the user and joins its
    /// room on every connect
    pub fn open_notification_channel(
        &self,
        user_id: &ID,
    ) -> (ChannelHandle, futures::channel::mpsc::UnboundedReceiver<ChannelEvent>) {
        open_channel(self.channel("ws", vec![ClientMessage::JoinCheck(user_id.clone())]))
    }

    /// Opens the caregiver channel following the given patients
    pub fn open_caregiver_channel(
        &self,
        patient_ids: &[ID],
    ) -> (ChannelHandle, futures::channel::mpsc::UnboundedReceiver<ChannelEvent>) {
        let joins = patient_ids
            .iter()
            .cloned()
            .map(ClientMessage::JoinPatientRoom)
            .collect();
        open_channel(self.channel("ws/caregivers", joins))
    }

    /// A reconciler for the notifications of the given user backed by
    /// this SDK
    pub fn notification_reconciler<N: Notifier>(
        &self,
        user_id: ID,
        notifier: N,
    ) -> NotificationReconciler<NotificationClient, N> {
        NotificationReconciler::new(self.notification.clone(), notifier, user_id)
    }
}
