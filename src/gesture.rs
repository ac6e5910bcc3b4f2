// SPDX-License-Identifier: MPL-2.0
//! Swipe gesture recognition and the navigation transition lock.
//!
//! The recognizer is a small explicit state machine (resting → tracking)
//! driven by horizontal positions only, so mouse, touch or synthetic test
//! events all feed it the same way. Recognition is separate from
//! commitment: `gesture_end` yields a directional intent, and the owner
//! decides whether the intent survives its bound checks before taking the
//! transition lock with [`GestureNavigator::begin`].
//!
//! While the lock is held, every new gesture is swallowed whole: at most
//! one navigation commit is in flight at a time.

/// Direction of an in-flight or committed navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// No transition in flight.
    #[default]
    None,
    /// Towards higher indices (swipe right-to-left).
    Forward,
    /// Towards lower indices (swipe left-to-right).
    Backward,
}

/// Read-only snapshot of the navigator for the presentation layer.
///
/// `direction` exists for slide-out/slide-in styling only; consumers
/// should not branch data logic on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorState {
    pub transitioning: bool,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Resting,
    Tracking { start_x: f32, last_x: f32 },
}

/// Interprets directional touch input into bounded previous/next intents.
#[derive(Debug, Default)]
pub struct GestureNavigator {
    phase: Phase,
    transitioning: bool,
    direction: Direction,
    threshold: f32,
}

impl GestureNavigator {
    /// `threshold` is the minimum horizontal travel for a swipe, in the
    /// same unit as the input coordinates.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: Phase::Resting,
            transitioning: false,
            direction: Direction::None,
            threshold,
        }
    }

    /// A pointer touched down at horizontal position `x`.
    ///
    /// Ignored while a transition is in flight: the surface is locked.
    pub fn gesture_start(&mut self, x: f32) {
        if self.transitioning {
            tracing::trace!("surface locked, swallowing gesture");
            return;
        }
        self.phase = Phase::Tracking { start_x: x, last_x: x };
    }

    /// The pointer moved to horizontal position `x`.
    pub fn gesture_move(&mut self, x: f32) {
        if let Phase::Tracking { last_x, .. } = &mut self.phase {
            *last_x = x;
        }
    }

    /// The pointer lifted. Returns the recognized swipe direction, or
    /// `None` when the travel stayed under the threshold or the surface
    /// was locked for the whole gesture.
    pub fn gesture_end(&mut self) -> Option<Direction> {
        let Phase::Tracking { start_x, last_x } = std::mem::take(&mut self.phase) else {
            return None;
        };
        if self.transitioning {
            return None;
        }
        let distance = start_x - last_x;
        if distance.abs() < self.threshold {
            return None;
        }
        Some(if distance > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        })
    }

    /// Takes the transition lock for `direction`.
    ///
    /// Returns `false` (and changes nothing) when a transition is already
    /// in flight or the direction carries no movement.
    pub fn begin(&mut self, direction: Direction) -> bool {
        if self.transitioning || direction == Direction::None {
            return false;
        }
        self.transitioning = true;
        self.direction = direction;
        true
    }

    /// Releases the transition lock, returning the direction that was in
    /// flight so the owner can commit the matching index change.
    pub fn finish(&mut self) -> Direction {
        let direction = self.direction;
        self.direction = Direction::None;
        self.transitioning = false;
        direction
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn state(&self) -> NavigatorState {
        NavigatorState {
            transitioning: self.transitioning,
            direction: self.direction,
        }
    }
}
