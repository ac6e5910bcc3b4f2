// SPDX-License-Identifier: MPL-2.0
//! Cancellable, restartable timer primitive.
//!
//! A [`Scheduler`] owns every timer of one logical timeline (story
//! progress, hero rotation, transition settle) and is the only place in
//! the crate that touches the clock. Timers are identified by
//! [`TimerToken`]s that are never reused; cancelling a token removes its
//! timer synchronously, so a cancellation racing a due tick always wins:
//! [`Scheduler::next_tick`] can never yield a cancelled token.
//!
//! Consumers pull ticks rather than registering callbacks, so the whole
//! engine stays single-threaded and tests can drive it against the
//! paused tokio clock.

use std::time::Duration;
use tokio::time::Instant;

/// Identifies one armed timer. Tokens are unique for the lifetime of the
/// scheduler that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy)]
enum Repeat {
    Every(Duration),
    Once,
}

#[derive(Debug)]
struct Timer {
    token: TimerToken,
    deadline: Instant,
    repeat: Repeat,
}

/// A set of armed timers sharing one timeline.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a repeating timer firing every `period`, starting one period
    /// from now.
    pub fn start(&mut self, period: Duration) -> TimerToken {
        self.arm(period, Repeat::Every(period))
    }

    /// Arms a one-shot timer firing once after `delay`.
    pub fn start_once(&mut self, delay: Duration) -> TimerToken {
        self.arm(delay, Repeat::Once)
    }

    fn arm(&mut self, first: Duration, repeat: Repeat) -> TimerToken {
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            token,
            deadline: Instant::now() + first,
            repeat,
        });
        tracing::trace!(?token, ?repeat, "timer armed");
        token
    }

    /// Cancels a timer. Returns `true` if the token was still armed.
    ///
    /// After this returns, `next_tick` will never yield the token again,
    /// even if its deadline had already passed.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.token != token);
        let cancelled = self.timers.len() != before;
        if cancelled {
            tracing::trace!(?token, "timer cancelled");
        }
        cancelled
    }

    /// Cancels every armed timer. Used on scope teardown.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    #[must_use]
    pub fn is_armed(&self, token: TimerToken) -> bool {
        self.timers.iter().any(|timer| timer.token == token)
    }

    #[must_use]
    pub fn has_armed(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Waits for the earliest armed timer to come due and returns its
    /// token. Returns `None` immediately when nothing is armed.
    ///
    /// Repeating timers are re-scheduled one period later; one-shot
    /// timers disarm as they fire. Dropping the returned future before
    /// completion leaves all deadlines untouched, so a tick interrupted
    /// by other work is delivered on the next call rather than lost.
    pub async fn next_tick(&mut self) -> Option<TimerToken> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, timer)| timer.deadline)
            .map(|(pos, _)| pos)?;
        let deadline = self.timers[pos].deadline;
        tokio::time::sleep_until(deadline).await;

        let token = self.timers[pos].token;
        match self.timers[pos].repeat {
            Repeat::Every(period) => self.timers[pos].deadline += period,
            Repeat::Once => {
                self.timers.swap_remove(pos);
            }
        }
        Some(token)
    }
}
