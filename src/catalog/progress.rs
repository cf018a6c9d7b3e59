//! Cosmetic load progress
//!
//! While a load is in flight a timer ticks every ~200ms and the loader bumps
//! the displayed percentage by a small random step. The value never reaches
//! 100 until the fetch resolves. The timer is a task handle that aborts on
//! drop, so whoever owns it (the loader) releases it on completion,
//! supersession or teardown without extra bookkeeping.

use super::loader::LoadEvent;
use crate::util::random_below;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Highest value the simulated progress may reach before completion
pub const PROGRESS_CEILING: u8 = 90;

/// Largest single progress step
const MAX_STEP: u8 = 10;

/// Advance `current` by `step`, capped at [`PROGRESS_CEILING`]
pub fn advance(current: u8, step: u8) -> u8 {
    current.saturating_add(step).min(PROGRESS_CEILING)
}

/// Random step in `1..=MAX_STEP`
pub fn random_step() -> u8 {
    1 + random_below(MAX_STEP as u64) as u8
}

/// Handle to a running progress ticker
///
/// Sends [`LoadEvent::Progress`] for its generation on every tick. Dropping
/// the handle aborts the task.
#[derive(Debug)]
pub struct ProgressTimer {
    generation: u64,
    task: JoinHandle<()>,
}

impl ProgressTimer {
    /// Start ticking for `generation` on the current tokio runtime
    pub fn start(generation: u64, interval: Duration, tx: mpsc::Sender<LoadEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick of an interval fires immediately; skip it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx.send(LoadEvent::Progress { generation }).await.is_err() {
                    // Receiver gone: the UI has shut down
                    break;
                }
            }
        });

        Self { generation, task }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the underlying task has stopped
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the ticker now
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for ProgressTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_caps_below_100() {
        assert_eq!(advance(0, 7), 7);
        assert_eq!(advance(85, 10), PROGRESS_CEILING);
        assert_eq!(advance(PROGRESS_CEILING, 1), PROGRESS_CEILING);
        assert_eq!(advance(250, 10), PROGRESS_CEILING);
    }

    #[test]
    fn test_random_step_range() {
        for _ in 0..100 {
            let step = random_step();
            assert!((1..=MAX_STEP).contains(&step));
        }
    }

    #[tokio::test]
    async fn test_timer_ticks_for_its_generation() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = ProgressTimer::start(3, Duration::from_millis(5), tx);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, LoadEvent::Progress { generation: 3 }));
        assert_eq!(timer.generation(), 3);
    }

    #[tokio::test]
    async fn test_drop_stops_timer() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = ProgressTimer::start(1, Duration::from_millis(5), tx);
        drop(timer);

        // The aborted task drops its sender, so the channel closes
        let closed = tokio::time::timeout(Duration::from_secs(2), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_finishes_task() {
        let (tx, _rx) = mpsc::channel(8);
        let timer = ProgressTimer::start(1, Duration::from_millis(5), tx);
        timer.cancel();

        tokio::time::timeout(Duration::from_secs(2), async {
            while !timer.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}
