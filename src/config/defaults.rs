// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all engine timing and gesture constants.
//!
//! This module serves as the single source of truth for the fixed durations
//! and thresholds used across the engine. Constants are organized by
//! category; clamp bounds exist for every value that can be overridden
//! through the configuration file.
//!
//! # Categories
//!
//! - **Story timing**: progress tick period and fixed image display duration
//! - **Transition**: settle delay between a swipe and its index commit
//! - **Hero rotation**: banner auto-rotation interval
//! - **Gesture**: swipe recognition threshold and tap-zone split

// ==========================================================================
// Story Timing Defaults
// ==========================================================================

/// Period of the progress timer driving image items (milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Minimum allowed progress tick period.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Maximum allowed progress tick period.
pub const MAX_TICK_INTERVAL_MS: u64 = 1_000;

/// Fixed display duration of an image story item (milliseconds).
pub const DEFAULT_IMAGE_DURATION_MS: u64 = 10_000;

/// Minimum allowed image display duration.
pub const MIN_IMAGE_DURATION_MS: u64 = 1_000;

/// Maximum allowed image display duration.
pub const MAX_IMAGE_DURATION_MS: u64 = 120_000;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Delay between beginning a navigation transition and committing the
/// index change (milliseconds). Lets the slide animation finish before
/// the rendered content swaps.
pub const DEFAULT_TRANSITION_SETTLE_MS: u64 = 150;

/// Minimum allowed transition settle delay.
pub const MIN_TRANSITION_SETTLE_MS: u64 = 0;

/// Maximum allowed transition settle delay.
pub const MAX_TRANSITION_SETTLE_MS: u64 = 1_000;

// ==========================================================================
// Hero Rotation Defaults
// ==========================================================================

/// Interval between hero banner rotations (milliseconds).
pub const DEFAULT_HERO_INTERVAL_MS: u64 = 5_000;

/// Minimum allowed hero rotation interval.
pub const MIN_HERO_INTERVAL_MS: u64 = 500;

/// Maximum allowed hero rotation interval.
pub const MAX_HERO_INTERVAL_MS: u64 = 60_000;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Minimum horizontal travel for a drag to register as a swipe, in the
/// same device-independent unit as the input coordinates.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Minimum allowed swipe threshold.
pub const MIN_SWIPE_THRESHOLD: f32 = 1.0;

/// Maximum allowed swipe threshold.
pub const MAX_SWIPE_THRESHOLD: f32 = 500.0;

/// Fraction of the story surface width, from the left edge, that maps a
/// tap to "previous". The remaining width maps to "next": forward is the
/// primary, larger target. Not configurable.
pub const TAP_ZONE_PREVIOUS_FRACTION: f32 = 0.3;
