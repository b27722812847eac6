//! Background scheduled tasks.
//!
//! The daily expiry scan is the only recurring job. Call `spawn_all` once
//! during startup; it detaches the task and returns immediately.

use crate::config::SchedulerConfig;
use crate::services::NotificationService;
use chrono::{Local, NaiveDateTime, NaiveTime};
use std::time::Duration;

const ONE_DAY: Duration = Duration::from_secs(24 * 3600);

/// Time from `now` until the next `hour:minute` wall-clock instant. A run
/// scheduled for exactly `now` is pushed to the following day.
pub fn duration_until_next_run(now: NaiveDateTime, hour: u32, minute: u32) -> Duration {
    let Some(at) = NaiveTime::from_hms_opt(hour, minute, 0) else {
        return ONE_DAY;
    };
    let mut next = now.date().and_time(at);
    if next <= now {
        next += chrono::Duration::days(1);
    }
    (next - now).to_std().unwrap_or(ONE_DAY)
}

/// Spawn all background tasks.
pub fn spawn_all(notification_service: NotificationService, scheduler: SchedulerConfig) {
    if !scheduler.enabled {
        log::info!("Expiry scan scheduler disabled");
        return;
    }

    tokio::spawn(async move {
        log::info!(
            "Expiry scan scheduled daily at {:02}:{:02}",
            scheduler.hour,
            scheduler.minute
        );
        loop {
            let wait =
                duration_until_next_run(Local::now().naive_local(), scheduler.hour, scheduler.minute);
            log::debug!("Next expiry scan in {}s", wait.as_secs());
            tokio::time::sleep(wait).await;

            match notification_service.check_and_notify().await {
                Ok(n) if n > 0 => log::info!("Expiry scan queued {n} notification(s)"),
                Ok(_) => log::info!("Expiry scan found nothing to notify"),
                Err(e) => log::error!("Expiry scan failed: {e:?}"),
            }
        }
    });
}
