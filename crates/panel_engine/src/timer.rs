use std::time::Duration;

use panel_logging::panel_debug;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::JobId;

/// Repeating poll timer. At most one timer runs at a time; starting a new
/// one cancels the previous.
#[derive(Debug)]
pub struct PollTimer {
    period: Duration,
    current: Option<CancellationToken>,
}

impl PollTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            current: None,
        }
    }

    /// Calls `on_tick` every period, first one period after the call.
    pub fn start<F>(&mut self, handle: &Handle, job_id: JobId, on_tick: F)
    where
        F: Fn(JobId) + Send + 'static,
    {
        self.stop();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let period = self.period;
        panel_debug!("Poll timer started for {job_id} every {period:?}");

        let first = Instant::now() + period;
        handle.spawn(async move {
            let mut ticks = interval_at(first, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticks.tick() => on_tick(job_id.clone()),
                }
            }
        });
        self.current = Some(token);
    }

    /// Returns whether a timer was running.
    pub fn stop(&mut self) -> bool {
        match self.current.take() {
            Some(token) => {
                token.cancel();
                panel_debug!("Poll timer stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
