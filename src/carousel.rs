// SPDX-License-Identifier: MPL-2.0
//! Fixed-interval auto-rotation over a list, used for the hero banner.
//!
//! No progress concept and no gestures: the loop just steps its index
//! every interval. Replacing the list goes through [`CarouselLoop::start`]
//! so the timer is restarted against the new length. An old timer must
//! never animate against a stale list.

use crate::scheduler::{Scheduler, TimerToken};
use std::time::Duration;

/// Auto-rotating cursor over an ordered list.
#[derive(Debug)]
pub struct CarouselLoop<T> {
    items: Vec<T>,
    active_index: usize,
    scheduler: Scheduler,
    timer: Option<TimerToken>,
    interval: Duration,
    paused: bool,
}

impl<T> CarouselLoop<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            active_index: 0,
            scheduler: Scheduler::new(),
            timer: None,
            interval: Duration::ZERO,
            paused: false,
        }
    }

    /// Replaces the list wholesale and restarts rotation from the first
    /// item. An empty list leaves the loop stopped and idle.
    pub fn start(&mut self, items: Vec<T>, interval: Duration) {
        self.stop();
        self.items = items;
        self.active_index = 0;
        self.interval = interval;
        self.paused = false;
        if !self.items.is_empty() {
            self.timer = Some(self.scheduler.start(interval));
        }
    }

    /// Cancels the rotation timer. The index keeps its current value.
    pub fn stop(&mut self) {
        if let Some(token) = self.timer.take() {
            self.scheduler.cancel(token);
        }
    }

    /// Suspends rotation without forgetting the list or position.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.stop();
    }

    /// Resumes a paused rotation on a fresh timer.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if !self.items.is_empty() {
            self.timer = Some(self.scheduler.start(self.interval));
        }
    }

    /// Applies one rotation tick; stale tokens are discarded. Returns the
    /// new active index when the carousel stepped.
    pub fn apply_tick(&mut self, token: TimerToken) -> Option<usize> {
        if self.timer != Some(token) {
            tracing::trace!(?token, "discarding stale rotation tick");
            return None;
        }
        if self.items.is_empty() {
            return None;
        }
        self.active_index = (self.active_index + 1) % self.items.len();
        Some(self.active_index)
    }

    /// Waits for the next rotation tick and applies it. Returns `None`
    /// immediately when the loop is stopped or paused.
    pub async fn tick(&mut self) -> Option<usize> {
        let token = self.scheduler.next_tick().await?;
        self.apply_tick(token)
    }

    /// `None` while the list is empty.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.active_index)
        }
    }

    #[must_use]
    pub fn active_item(&self) -> Option<&T> {
        self.items.get(self.active_index)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for CarouselLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(5_000);

    #[test]
    fn empty_list_leaves_the_loop_idle() {
        let mut carousel: CarouselLoop<&str> = CarouselLoop::new();
        carousel.start(Vec::new(), INTERVAL);

        assert!(!carousel.is_running());
        assert_eq!(carousel.active_index(), None);
    }

    #[test]
    fn ticks_step_with_wraparound() {
        let mut carousel = CarouselLoop::new();
        carousel.start(vec!["a", "b", "c"], INTERVAL);
        let token = carousel.timer.expect("rotation timer armed");

        assert_eq!(carousel.apply_tick(token), Some(1));
        assert_eq!(carousel.apply_tick(token), Some(2));
        assert_eq!(carousel.apply_tick(token), Some(0));
        assert_eq!(carousel.active_item(), Some(&"a"));
    }

    #[test]
    fn restart_resets_index_and_replaces_the_timer() {
        let mut carousel = CarouselLoop::new();
        carousel.start(vec!["a", "b", "c"], INTERVAL);
        let stale = carousel.timer.expect("rotation timer armed");
        carousel.apply_tick(stale);

        carousel.start(vec!["x", "y"], INTERVAL);
        assert_eq!(carousel.active_index(), Some(0));

        // The old timer no longer animates the new list.
        assert_eq!(carousel.apply_tick(stale), None);
        assert_eq!(carousel.active_index(), Some(0));
    }

    #[test]
    fn stop_keeps_the_position() {
        let mut carousel = CarouselLoop::new();
        carousel.start(vec!["a", "b"], INTERVAL);
        let token = carousel.timer.expect("rotation timer armed");
        carousel.apply_tick(token);

        carousel.stop();
        assert!(!carousel.is_running());
        assert_eq!(carousel.active_index(), Some(1));
    }

    #[test]
    fn pause_and_resume_rearm_a_fresh_timer() {
        let mut carousel = CarouselLoop::new();
        carousel.start(vec!["a", "b"], INTERVAL);
        let before = carousel.timer.expect("rotation timer armed");

        carousel.pause();
        assert!(!carousel.is_running());

        carousel.resume();
        let after = carousel.timer.expect("rotation timer re-armed");
        assert_ne!(before, after);
        assert_eq!(carousel.apply_tick(before), None);
        assert_eq!(carousel.apply_tick(after), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn rotation_follows_the_interval() {
        let mut carousel = CarouselLoop::new();
        carousel.start(vec!["a", "b"], INTERVAL);
        let started = tokio::time::Instant::now();

        assert_eq!(carousel.tick().await, Some(1));
        assert_eq!(started.elapsed(), INTERVAL);

        carousel.stop();
        assert_eq!(carousel.tick().await, None);
    }
}
