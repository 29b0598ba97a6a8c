use crate::shared::usecase::{Subscriber, UseCase};
use sehat_saathi_api_structs::{dtos::NotificationDTO, ServerMessage};
use sehat_saathi_domain::Notification;
use sehat_saathi_infra::{Realtime, SehatContext};
use tracing::{debug, info};

/// Persists a `Notification` and pushes it to every live connection of
/// the receiving user
#[derive(Debug)]
pub struct SendNotificationUseCase {
    pub notification: Notification,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendNotificationUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "SendNotification";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .insert(&self.notification)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(self.notification.clone())
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PublishNotificationOnSent)]
    }
}

pub struct PublishNotificationOnSent;

#[async_trait::async_trait(?Send)]
impl Subscriber<SendNotificationUseCase> for PublishNotificationOnSent {
    async fn notify(&self, notification: &Notification, ctx: &SehatContext) {
        let frame = ServerMessage::Notification(NotificationDTO::new(notification.clone())).to_frame();
        let room = Realtime::user_room(&notification.user_id);
        let delivered = ctx.realtime.users.publish(&room, &frame);
        if delivered > 0 {
            info!(
                "Notification: {} delivered to {} connection(s) of user: {}",
                notification.id, delivered, notification.user_id
            );
        } else {
            debug!(
                "User: {} is offline, notification: {} is only stored",
                notification.user_id, notification.id
            );
        }
    }
}
