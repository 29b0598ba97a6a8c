use crate::notification::send_notification::SendNotificationUseCase;
use crate::shared::usecase::{execute, UseCase};
use sehat_saathi_domain::{ClockReading, Notification};
use sehat_saathi_infra::SehatContext;
use tracing::{error, info};

/// Finds every enabled `Reminder` due at the current minute of the
/// reminder clock and sends a `Notification` to its owner.
///
/// Runs once per minute from the reminder job.
#[derive(Debug)]
pub struct ScanRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScanRemindersUseCase {
    /// The `Notification`s that were sent
    type Response = Vec<Notification>;

    type Error = UseCaseError;

    const NAME: &'static str = "ScanReminders";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let ClockReading {
            now,
            current_time,
            current_date,
        } = ctx.sys.read_clock(&ctx.config.reminder_timezone);
        info!("Checking for reminders at {} {}", current_date, current_time);

        let candidates = ctx
            .repos
            .reminders
            .find_enabled_at(&current_time)
            .await
            .map_err(|e| {
                error!("Unable to load reminders due at {}: {:?}", current_time, e);
                UseCaseError::StorageError
            })?;

        let mut sent = Vec::new();
        for reminder in candidates.iter().filter(|r| r.fires(&now)) {
            let usecase = SendNotificationUseCase {
                notification: Notification::for_reminder(reminder, ctx.sys.get_timestamp_millis()),
            };
            match execute(usecase, ctx).await {
                Ok(notification) => {
                    info!(
                        "Notification sent to user {} for reminder {}",
                        reminder.user_id, reminder.title
                    );
                    sent.push(notification);
                }
                Err(e) => error!(
                    "Failed to send notification for reminder {}: {:?}",
                    reminder.id, e
                ),
            }
        }

        Ok(sent)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::reminder_factory;
    use futures::StreamExt;
    use sehat_saathi_api_structs::ServerMessage;
    use sehat_saathi_domain::{
        NotificationKind, NotificationPriority, Recurrence, Reminder, Tz, ID,
    };
    use sehat_saathi_infra::{connection_channel, Realtime, StaticTimeSys};
    use std::sync::Arc;

    // Wednesday 2024-01-17T02:30:00Z, 08:00 in Asia/Kolkata
    const NOW: i64 = 1705458600000;

    fn setup(tz: Tz) -> SehatContext {
        let mut ctx = SehatContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        ctx.config.reminder_timezone = tz;
        ctx
    }

    async fn insert(ctx: &SehatContext, reminder: &Reminder) {
        ctx.repos.reminders.insert(reminder).await.unwrap();
    }

    #[actix_web::main]
    #[test]
    async fn sends_reminder_notification_to_connected_owner() {
        let ctx = setup(Tz::Asia__Kolkata);
        let user_id = ID::new();
        let reminder = reminder_factory(&user_id, Recurrence::Daily);
        insert(&ctx, &reminder).await;

        let (sender, mut receiver) = connection_channel();
        ctx.realtime
            .users
            .join(&Realtime::user_room(&user_id), &ID::new(), sender);

        let sent = execute(ScanRemindersUseCase {}, &ctx).await.unwrap();
        assert_eq!(sent.len(), 1);
        let notification = &sent[0];
        assert_eq!(notification.message, "It's time for: Metformin (500mg)");
        assert_eq!(notification.kind, NotificationKind::Reminder);
        assert_eq!(notification.priority, NotificationPriority::High);
        assert_eq!(notification.reminder_id(), Some(reminder.id.clone()));
        assert!(!notification.is_read);

        let stored = ctx
            .repos
            .notifications
            .find_recent_by_user(&user_id, 50)
            .await
            .unwrap();
        assert_eq!(stored, sent);

        let frame = receiver.next().await.unwrap();
        match serde_json::from_str::<ServerMessage>(&frame).unwrap() {
            ServerMessage::Notification(dto) => assert_eq!(dto.id, notification.id),
            msg => panic!("Unexpected frame: {:?}", msg),
        }

        // Firing does not change the reminder
        assert_eq!(ctx.repos.reminders.find(&reminder.id).await.unwrap(), reminder);
    }

    #[actix_web::main]
    #[test]
    async fn evaluates_recurrence_of_each_candidate() {
        let ctx = setup(Tz::Asia__Kolkata);
        let user_id = ID::new();

        let mut once_today = reminder_factory(&user_id, Recurrence::Once);
        once_today.title = "once today".into();
        let mut once_tomorrow = reminder_factory(&user_id, Recurrence::Once);
        once_tomorrow.date = "2024-01-18".into();
        // 2024-01-10 was a Wednesday as well
        let mut weekly = reminder_factory(&user_id, Recurrence::Weekly);
        weekly.date = "2024-01-10".into();
        weekly.title = "weekly".into();
        let mut weekly_other_day = reminder_factory(&user_id, Recurrence::Weekly);
        weekly_other_day.date = "2024-01-11".into();
        let mut monthly = reminder_factory(&user_id, Recurrence::Monthly);
        monthly.date = "2023-11-17".into();
        monthly.title = "monthly".into();
        let mut disabled = reminder_factory(&user_id, Recurrence::Daily);
        disabled.enabled = false;
        let mut other_minute = reminder_factory(&user_id, Recurrence::Daily);
        other_minute.time = "08:01".into();
        let unknown = reminder_factory(&user_id, Recurrence::Unknown("yearly".into()));

        for r in [
            &once_today,
            &once_tomorrow,
            &weekly,
            &weekly_other_day,
            &monthly,
            &disabled,
            &other_minute,
            &unknown,
        ]
        .iter()
        {
            insert(&ctx, r).await;
        }

        let sent = execute(ScanRemindersUseCase {}, &ctx).await.unwrap();
        let mut fired = sent
            .iter()
            .map(|n| n.reminder_id().unwrap())
            .collect::<Vec<_>>();
        fired.sort();
        let mut expected = vec![once_today.id, weekly.id, monthly.id];
        expected.sort();
        assert_eq!(fired, expected);
    }

    #[actix_web::main]
    #[test]
    async fn reads_clock_in_configured_timezone() {
        // 02:30 in UTC so nothing at 08:00 is due
        let ctx = setup(Tz::UTC);
        let reminder = reminder_factory(&ID::new(), Recurrence::Daily);
        insert(&ctx, &reminder).await;

        let sent = execute(ScanRemindersUseCase {}, &ctx).await.unwrap();
        assert!(sent.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn same_minute_reminders_all_fire() {
        let ctx = setup(Tz::Asia__Kolkata);
        let user_id = ID::new();
        let r1 = reminder_factory(&user_id, Recurrence::Daily);
        let r2 = reminder_factory(&user_id, Recurrence::Daily);
        insert(&ctx, &r1).await;
        insert(&ctx, &r2).await;

        let sent = execute(ScanRemindersUseCase {}, &ctx).await.unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(
            ctx.repos.notifications.count_unread(&user_id).await.unwrap(),
            2
        );
    }
}
