use crate::{reminder::scan_reminders::ScanRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, sleep, Instant};
use sehat_saathi_domain::Notification;
use sehat_saathi_infra::SehatContext;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// Seconds between two scans of the reminder job
pub const REMINDER_JOB_INTERVAL_SECS: u64 = 60;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Handle to the running reminder job
pub struct ReminderJobHandle {
    shutdown: watch::Sender<bool>,
}

impl ReminderJobHandle {
    /// Stops the job from starting new scans. A scan that is already
    /// running completes.
    pub fn stop(&self) {
        if self.shutdown.send(true).is_ok() {
            info!("Reminder job stopped");
        }
    }
}

/// Fires the reminders due at the current minute and returns the
/// notifications that were sent
pub async fn run_reminder_scan(ctx: &SehatContext) -> Vec<Notification> {
    execute(ScanRemindersUseCase {}, ctx)
        .await
        .unwrap_or_default()
}

pub fn start_reminder_job(ctx: SehatContext) -> ReminderJobHandle {
    let (shutdown, mut stopped) = watch::channel(false);

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);

        tokio::select! {
            _ = sleep(Duration::from_secs(secs_to_next_run as u64)) => {},
            _ = stopped.changed() => return,
        }
        info!("Reminder job started");
        let mut minutely_interval =
            interval_at(Instant::now(), Duration::from_secs(REMINDER_JOB_INTERVAL_SECS));
        loop {
            tokio::select! {
                _ = minutely_interval.tick() => {},
                _ = stopped.changed() => break,
            }
            // Scans run to completion before the next stop check
            run_reminder_scan(&ctx).await;
        }
    });

    ReminderJobHandle { shutdown }
}
