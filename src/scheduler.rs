//! Periodic trigger for the daily post.
//!
//! The timer knows nothing about saints: [`ScheduleHandle::spawn`] takes any
//! async job and runs it every time the [`Schedule`] fires, until the handle
//! is shut down.

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveTime, TimeZone};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// When the job should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Fixed interval between runs, starting one interval after spawn.
    Every(Duration),
    /// Once per day at a local wall-clock time.
    DailyAt(NaiveTime),
}

impl Schedule {
    /// How long to wait from `now` until the next run.
    pub fn next_delay<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Duration {
        match *self {
            Schedule::Every(period) => period,
            Schedule::DailyAt(at) => {
                let tz = now.timezone();
                let mut date = now.date_naive();
                // Walk forward until the wall-clock time exists and is in the future.
                for _ in 0..3 {
                    if let Some(next) = tz.from_local_datetime(&date.and_time(at)).earliest() {
                        if next > now {
                            return (next - now.clone()).to_std().unwrap_or_default();
                        }
                    }
                    date += ChronoDuration::days(1);
                }
                Duration::from_secs(24 * 60 * 60)
            }
        }
    }
}

/// Running periodic task.
#[derive(Debug)]
pub struct ScheduleHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ScheduleHandle {
    /// Spawn a task that runs `job` each time `schedule` fires.
    ///
    /// A run is awaited to completion before the next wait starts, so runs
    /// never overlap. Dropping the handle stops the task as well.
    pub fn spawn<F, Fut>(schedule: Schedule, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            loop {
                let delay = schedule.next_delay(Local::now());
                debug!(?delay, "Waiting for next scheduled run");
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {
                        info!("Scheduled run starting");
                        job().await;
                    }
                    _ = &mut shutdown_rx => {
                        info!("Scheduler stopped");
                        break;
                    }
                }
            }
        });

        Self {
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }

    /// Stop the task and wait for it to finish.
    ///
    /// The signal is only seen between runs. A run already in progress is not
    /// cancelled; this waits for it to complete.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            warn!(error = %e, "Scheduler task ended abnormally");
        }
    }
}
