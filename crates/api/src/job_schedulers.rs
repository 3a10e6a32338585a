use crate::{
    reminders::{SendEventRemindersUseCase, SendRegistrationDeadlinesUseCase},
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep};
use event_notifier_infra::NotifierContext;
use std::time::Duration;
use tracing::info;

/// Seconds until the start of the next minute
pub fn get_start_delay(now_ts: i64) -> u64 {
    let secs_into_minute = (now_ts / 1000).rem_euclid(60) as u64;
    60 - secs_into_minute
}

/// Runs both reminder schedulers every `reminders_job_interval_secs`,
/// with the first run at the start of the next minute
pub fn start_reminder_job_schedulers(ctx: NotifierContext) {
    let interval_secs = ctx.config.reminders_job_interval_secs;
    if interval_secs == 0 {
        info!("REMINDERS_JOB_INTERVAL_SECS is 0, reminders only run when triggered over http.");
        return;
    }

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        sleep(Duration::from_secs(get_start_delay(now))).await;

        let mut job_interval = interval(Duration::from_secs(interval_secs));
        loop {
            job_interval.tick().await;
            let _ = execute(SendEventRemindersUseCase {}, &ctx).await;
            let _ = execute(SendRegistrationDeadlinesUseCase {}, &ctx).await;
        }
    });
}
