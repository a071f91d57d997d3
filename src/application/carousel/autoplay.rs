//! A cancellable repeating deadline.
//!
//! [`AutoAdvance`] is owned by the task that owns the
//! [`RotationController`](crate::domain::RotationController). The task
//! awaits [`AutoAdvance::tick`] inside its `select!` loop and calls
//! `on_tick` when it resolves, so the timer and the index are only ever
//! touched from one place.

use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep, Instant, Sleep};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug)]
pub struct AutoAdvance {
    interval: Duration,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl AutoAdvance {
    /// Created disarmed.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arms the next tick one full interval from now, replacing any
    /// deadline already pending.
    pub fn start(&mut self) {
        self.deadline = Some(Box::pin(sleep(self.interval)));
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Restarts the countdown; used after a manual navigation so the next
    /// automatic step waits a full interval.
    pub fn reset(&mut self) {
        if let Some(deadline) = self.deadline.as_mut() {
            deadline.as_mut().reset(Instant::now() + self.interval);
        }
    }

    /// Resolves when the armed deadline elapses and re-arms the next one.
    /// Never resolves while disarmed.
    pub async fn tick(&mut self) {
        match self.deadline.as_mut() {
            Some(deadline) => {
                deadline.as_mut().await;
                deadline.as_mut().reset(Instant::now() + self.interval);
            }
            None => pending::<()>().await,
        }
    }

    /// Arms or disarms to match `enabled`.
    pub fn set_enabled(&mut self, enabled: bool) {
        match (enabled, self.is_armed()) {
            (true, false) => self.start(),
            (false, true) => self.stop(),
            _ => {}
        }
    }
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    const INTERVAL: Duration = Duration::from_millis(5000);

    async fn fires_within(timer: &mut AutoAdvance, wait: Duration) -> bool {
        timeout(wait, timer.tick()).await.is_ok()
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_exactly_one_interval() {
        let mut timer = AutoAdvance::new(INTERVAL);
        timer.start();
        assert!(!fires_within(&mut timer, INTERVAL - Duration::from_millis(1)).await);
        assert!(fires_within(&mut timer, Duration::from_millis(1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn repeats_every_interval() {
        let mut timer = AutoAdvance::new(INTERVAL);
        timer.start();
        let started = Instant::now();
        timer.tick().await;
        timer.tick().await;
        timer.tick().await;
        assert_eq!(started.elapsed(), INTERVAL * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn never_fires_after_stop() {
        let mut timer = AutoAdvance::new(INTERVAL);
        timer.start();
        advance(Duration::from_millis(4000)).await;
        timer.stop();
        assert!(!fires_within(&mut timer, INTERVAL * 10).await);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_waits_a_full_interval() {
        let mut timer = AutoAdvance::new(INTERVAL);
        timer.start();
        advance(Duration::from_millis(4000)).await;
        timer.stop();
        timer.start();
        assert!(!fires_within(&mut timer, Duration::from_millis(4999)).await);
        assert!(fires_within(&mut timer, Duration::from_millis(1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_pushes_the_deadline_back() {
        let mut timer = AutoAdvance::new(INTERVAL);
        timer.start();
        advance(Duration::from_millis(3000)).await;
        timer.reset();
        assert!(!fires_within(&mut timer, Duration::from_millis(4999)).await);
        assert!(fires_within(&mut timer, Duration::from_millis(1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn set_enabled_is_idempotent() {
        let mut timer = AutoAdvance::new(INTERVAL);
        timer.set_enabled(true);
        advance(Duration::from_millis(3000)).await;
        // Already armed: must not restart the countdown
        timer.set_enabled(true);
        assert!(fires_within(&mut timer, Duration::from_millis(2000)).await);
        timer.set_enabled(false);
        assert!(!timer.is_armed());
    }
}
