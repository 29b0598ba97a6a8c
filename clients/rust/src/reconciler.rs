use crate::{notification::NotificationClient, realtime::ChannelEvent, APIResponse};
use sehat_saathi_api_structs::{
    dtos::NotificationDTO, get_notifications, ClientMessage, MessageResponse, ServerMessage,
};
use sehat_saathi_domain::ID;
use tracing::{error, warn};

/// REST operations the reconciler confirms its local changes with
#[async_trait::async_trait]
pub trait NotificationApi: Send + Sync {
    async fn fetch_recent(&self) -> APIResponse<get_notifications::APIResponse>;
    async fn mark_read(&self, notification_id: &ID) -> APIResponse<NotificationDTO>;
    async fn mark_all_read(&self) -> APIResponse<MessageResponse>;
    async fn clear_all(&self) -> APIResponse<MessageResponse>;
}

#[async_trait::async_trait]
impl NotificationApi for NotificationClient {
    async fn fetch_recent(&self) -> APIResponse<get_notifications::APIResponse> {
        self.get().await
    }

    async fn mark_read(&self, notification_id: &ID) -> APIResponse<NotificationDTO> {
        NotificationClient::mark_read(self, notification_id).await
    }

    async fn mark_all_read(&self) -> APIResponse<MessageResponse> {
        NotificationClient::mark_all_read(self).await
    }

    async fn clear_all(&self) -> APIResponse<MessageResponse> {
        self.clear().await
    }
}

/// Surfaces pushed notifications to the person using the client
pub trait Notifier: Send + Sync {
    /// Transient in-app alert, shown for every pushed notification
    fn alert(&self, notification: &NotificationDTO);

    /// Whether the user allowed platform notifications
    fn permission_granted(&self) -> bool {
        false
    }

    fn show_platform_notification(&self, _notification: &NotificationDTO) {}

    fn play_sound(&self, _notification: &NotificationDTO) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Client side view of the notifications of one user.
///
/// Starts from a REST snapshot and merges notifications pushed over the
/// user channel in front of it. Read state changes are applied locally
/// first and then sent to the server, a failed request is logged and the
/// local change is kept until the next `initialize`.
pub struct NotificationReconciler<A: NotificationApi, N: Notifier> {
    api: A,
    notifier: N,
    user_id: ID,
    state: ConnectionState,
    notifications: Vec<NotificationDTO>,
    unread_count: u64,
}

impl<A: NotificationApi, N: Notifier> NotificationReconciler<A, N> {
    pub fn new(api: A, notifier: N, user_id: ID) -> Self {
        Self {
            api,
            notifier,
            user_id,
            state: ConnectionState::Disconnected,
            notifications: Vec::new(),
            unread_count: 0,
        }
    }

    pub fn notifications(&self) -> &[NotificationDTO] {
        &self.notifications
    }

    pub fn unread_count(&self) -> u64 {
        self.unread_count
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Frame that subscribes the channel to the room of the user. It has
    /// to be sent on every connect.
    pub fn join_message(&self) -> ClientMessage {
        ClientMessage::JoinCheck(self.user_id.clone())
    }

    /// Loads the server snapshot. Pushed notifications the snapshot does not
    /// contain yet stay in front of it. The previous state is kept if the
    /// request fails.
    pub async fn initialize(&mut self) {
        match self.api.fetch_recent().await {
            Ok(res) => {
                let mut pushed: Vec<_> = self
                    .notifications
                    .drain(..)
                    .filter(|n| !res.notifications.iter().any(|s| s.id == n.id))
                    .collect();
                let pushed_unread = pushed.iter().filter(|n| !n.is_read).count() as u64;
                pushed.extend(res.notifications);
                self.notifications = pushed;
                self.unread_count = res.unread_count + pushed_unread;
            }
            Err(e) => error!("Unable to load notifications: {:?}", e),
        }
    }

    pub fn on_channel_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Connecting => self.state = ConnectionState::Connecting,
            ChannelEvent::Connected => self.state = ConnectionState::Connected,
            ChannelEvent::Disconnected => self.state = ConnectionState::Disconnected,
            ChannelEvent::Message(ServerMessage::Notification(notification)) => {
                self.on_pushed(notification)
            }
            ChannelEvent::Message(ServerMessage::Error(message)) => {
                warn!("Channel error: {}", message)
            }
            ChannelEvent::Message(_) => {}
        }
    }

    pub fn on_pushed(&mut self, notification: NotificationDTO) {
        // A push can race the initial fetch
        if self.notifications.iter().any(|n| n.id == notification.id) {
            return;
        }
        if !notification.is_read {
            self.unread_count += 1;
        }
        self.notifier.alert(&notification);
        if self.notifier.permission_granted() {
            self.notifier.show_platform_notification(&notification);
            if notification.kind.is_audible() {
                self.notifier.play_sound(&notification);
            }
        }
        self.notifications.insert(0, notification);
    }

    pub async fn mark_read(&mut self, notification_id: &ID) {
        if let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|n| n.id == *notification_id && !n.is_read)
        {
            notification.is_read = true;
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        if let Err(e) = self.api.mark_read(notification_id).await {
            error!("Unable to mark notification {} as read: {:?}", notification_id, e);
        }
    }

    pub async fn mark_all_read(&mut self) {
        for notification in self.notifications.iter_mut() {
            notification.is_read = true;
        }
        self.unread_count = 0;
        if let Err(e) = self.api.mark_all_read().await {
            error!("Unable to mark all notifications as read: {:?}", e);
        }
    }

    pub async fn clear_all(&mut self) {
        self.notifications.clear();
        self.unread_count = 0;
        if let Err(e) = self.api.clear_all().await {
            error!("Unable to clear notifications: {:?}", e);
        }
    }
}
