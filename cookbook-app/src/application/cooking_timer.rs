use crate::domain::{TickOutcome, TimerPhase, TimerState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);

/// Sent once each time a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFinished;

/// Drives a [`TimerState`] once per second on the tokio runtime.
///
/// The handle owns at most one ticking task. Pausing, resetting, starting
/// again and dropping the handle all abort it. Must be used from within a
/// tokio runtime.
pub struct CookingTimer {
    state: Arc<watch::Sender<TimerState>>,
    ticker: Option<JoinHandle<()>>,
    finished: mpsc::UnboundedSender<TimerFinished>,
}

impl CookingTimer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFinished>) {
        let (finished, finished_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(TimerState::default());
        let timer = Self {
            state: Arc::new(state),
            ticker: None,
            finished,
        };
        (timer, finished_rx)
    }

    /// Starts a fresh countdown, replacing any running one. Non-positive
    /// minutes are ignored.
    pub fn start(&mut self, minutes: i64) {
        if minutes <= 0 {
            tracing::debug!("Ignoring timer start with {} minutes", minutes);
            return;
        }
        self.stop_ticker();
        self.state.send_modify(|state| {
            state.start(minutes);
        });
        self.spawn_ticker();
    }

    pub fn pause(&mut self) {
        if self.state.send_if_modified(TimerState::pause) {
            self.stop_ticker();
        }
    }

    pub fn resume(&mut self) {
        if self.state.send_if_modified(TimerState::resume) {
            self.spawn_ticker();
        }
    }

    pub fn reset(&mut self) {
        self.stop_ticker();
        self.state.send_modify(TimerState::reset);
    }

    pub fn state(&self) -> TimerState {
        *self.state.borrow()
    }

    pub fn phase(&self) -> TimerPhase {
        self.state().phase()
    }

    pub fn display(&self) -> String {
        self.state().display()
    }

    /// Receives every state change, including each tick.
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.state.subscribe()
    }

    fn spawn_ticker(&mut self) {
        self.stop_ticker();
        debug_assert!(self.ticker.is_none());

        let state = Arc::clone(&self.state);
        let finished = self.finished.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let mut outcome = TickOutcome::Ignored;
                state.send_modify(|s| outcome = s.tick());

                match outcome {
                    TickOutcome::Counting { .. } => continue,
                    TickOutcome::Completed => {
                        tracing::info!("Cooking timer finished");
                        // The receiver may be gone; finishing still counts.
                        let _ = finished.send(TimerFinished);
                        break;
                    }
                    TickOutcome::Ignored => break,
                }
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for CookingTimer {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::time::sleep;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_minute_finishes_once() {
        let (mut timer, mut finished) = CookingTimer::new();
        timer.start(1);
        assert_eq!(timer.state().remaining_seconds, 60);
        assert_eq!(timer.display(), "1:00");

        sleep(secs(59.5)).await;
        assert_eq!(timer.state().remaining_seconds, 1);
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(finished.try_recv(), Err(TryRecvError::Empty));

        sleep(secs(1.0)).await;
        let state = timer.state();
        assert_eq!(state.remaining_seconds, 0);
        assert!(!state.active);
        assert_eq!(finished.try_recv(), Ok(TimerFinished));

        sleep(secs(30.0)).await;
        assert_eq!(finished.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_resume_neither_skips_nor_doubles() {
        let (mut timer, mut finished) = CookingTimer::new();
        timer.start(1);

        sleep(secs(10.5)).await;
        assert_eq!(timer.state().remaining_seconds, 50);

        timer.pause();
        assert_eq!(timer.phase(), TimerPhase::Paused);
        sleep(secs(30.0)).await;
        assert_eq!(timer.state().remaining_seconds, 50);

        timer.resume();
        sleep(secs(49.5)).await;
        assert_eq!(timer.state().remaining_seconds, 1);

        sleep(secs(1.0)).await;
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(finished.try_recv(), Ok(TimerFinished));
        assert_eq!(finished.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_a_single_loop() {
        let (mut timer, _finished) = CookingTimer::new();
        timer.start(2);
        sleep(secs(5.5)).await;

        timer.start(1);
        assert_eq!(timer.state().remaining_seconds, 60);
        sleep(secs(30.5)).await;
        assert_eq!(timer.state().remaining_seconds, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_calls_are_ignored() {
        let (mut timer, _finished) = CookingTimer::new();
        timer.start(0);
        timer.start(-3);
        timer.pause();
        timer.resume();
        assert_eq!(timer.state(), TimerState::default());

        timer.start(1);
        timer.resume();
        sleep(secs(2.5)).await;
        assert_eq!(timer.state().remaining_seconds, 58);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_and_drop_stop_the_loop() {
        let (mut timer, mut finished) = CookingTimer::new();
        let watcher = timer.subscribe();
        timer.start(1);
        sleep(secs(3.5)).await;

        timer.reset();
        assert_eq!(timer.state(), TimerState::default());
        sleep(secs(120.0)).await;
        assert_eq!(timer.state().remaining_seconds, 0);
        assert_eq!(finished.try_recv(), Err(TryRecvError::Empty));

        timer.start(1);
        drop(timer);
        sleep(secs(120.0)).await;
        assert_eq!(watcher.borrow().remaining_seconds, 60);
        assert_eq!(finished.try_recv(), Err(TryRecvError::Disconnected));
    }
}
