//! Minimum-interval trigger.
//!
//! A trigger runs the job at once when the debouncer is idle (nothing pending, last run at least one interval ago).
//! Otherwise exactly one job is kept scheduled at the interval boundary; a newer trigger replaces the scheduled job but
//! not its deadline.

use std::{future::Future, sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// When a triggered job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Now,
    At(Instant),
}

#[derive(Default)]
struct State {
    last_fire: Option<Instant>,
    pending: Option<(Instant, CancellationToken)>,
}

#[derive(Clone)]
pub struct Debouncer {
    interval: Duration,
    state: Arc<Mutex<State>>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Count a run that happened outside the debouncer (an activation pass) towards the interval.
    pub fn mark_fired(&self) {
        self.state.lock().last_fire = Some(Instant::now());
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    /// Drop the scheduled job, if any.
    pub fn cancel(&self) {
        if let Some((_, token)) = self.state.lock().pending.take() {
            token.cancel();
        }
    }

    /// Run `job` now or at the next interval boundary. Must be called inside a tokio runtime.
    pub fn trigger<F, Fut>(&self, job: F) -> Schedule
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let now = Instant::now();
        let mut st = self.state.lock();

        let pending = st.pending.as_ref().map(|(deadline, _)| *deadline);
        let deadline = match (pending, st.last_fire) {
            (Some(deadline), _) => deadline,
            (None, Some(last)) if now.duration_since(last) < self.interval => last + self.interval,
            (None, _) => {
                st.last_fire = Some(now);
                drop(st);
                trace!("debouncer idle; running now");
                tokio::spawn(job());
                return Schedule::Now;
            }
        };

        if let Some((_, previous)) = st.pending.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        st.pending = Some((deadline, token.clone()));
        drop(st);

        trace!(delay_ms = deadline.duration_since(now).as_millis() as u64, "debouncer scheduled trailing run");

        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = sleep_until(deadline) => {}
            }

            {
                let mut st = state.lock();
                if token.is_cancelled() {
                    return;
                }
                st.pending = None;
                st.last_fire = Some(Instant::now());
            }
            job().await;
        });

        Schedule::At(deadline)
    }
}
