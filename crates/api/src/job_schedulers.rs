use crate::{reminder::send_due_reminders::SendDueRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep_until, Instant};
use nudge_infra::NudgeContext;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Spawns the timer that drives the due reminder sweep. The first run
/// is aligned to the next minute boundary, after that a tick fires on
/// the configured interval.
pub fn start_send_reminders_job(ctx: NudgeContext) {
    actix_web::rt::spawn(async move {
        let sweeping = Arc::new(AtomicBool::new(false));

        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep_until(Instant::now() + Duration::from_secs(secs_to_next_run as u64)).await;

        let mut tick = interval(Duration::from_secs(ctx.config.send_reminders_interval_secs));
        loop {
            tick.tick().await;
            let context = ctx.clone();
            let sweeping = sweeping.clone();
            actix_web::rt::spawn(async move {
                run_sweep(context, sweeping).await;
            });
        }
    });
}

/// Runs one sweep cycle unless one is already in progress. A tick that
/// fires while the previous sweep is still running is dropped, so the
/// same reminder can never be read and dispatched by two overlapping
/// cycles.
pub async fn run_sweep(ctx: NudgeContext, sweeping: Arc<AtomicBool>) {
    if sweeping
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        debug!("Ignoring sweep tick: a sweep cycle is already in progress");
        return;
    }

    let _ = execute(SendDueRemindersUseCase, &ctx).await;

    sweeping.store(false, Ordering::SeqCst);
}
