// SPDX-License-Identifier: MPL-2.0
//! Story playback sequencer.
//!
//! Advances through an ordered playlist of media items, producing a 0–100
//! progress value for the active item and auto-advancing on completion.
//! Image items are timed internally from scheduler ticks against the fixed
//! configured duration; video items have their progress reported by the
//! playback surface and advance only on an explicit end-of-playback
//! report.
//!
//! Every playlist replacement, jump or advance bumps a generation token
//! and synchronously cancels the running timer before arming a new one.
//! A tick whose token or generation no longer matches the armed timer is
//! discarded without touching state.

use crate::config::defaults::TAP_ZONE_PREVIOUS_FRACTION;
use crate::config::Timings;
use crate::content::{MediaItem, MediaKind, Playlist};
use crate::scheduler::{Scheduler, TimerToken};

/// Monotonically increasing token identifying one playlist/index state.
///
/// Callbacks carrying a superseded generation are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn bump(&mut self) {
        self.0 += 1;
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Where the active item's progress comes from.
///
/// Images are self-timed; videos are event-driven.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ProgressSource {
    /// Driven by scheduler ticks against a fixed total.
    Timed { ticks_elapsed: u32, total_ticks: u32 },
    /// Position reported by the playback surface.
    Reported { percent: f32 },
}

impl ProgressSource {
    fn for_item(item: &MediaItem, timings: &Timings) -> Self {
        match item.kind() {
            MediaKind::Image => Self::Timed {
                ticks_elapsed: 0,
                total_ticks: timings.image_total_ticks(),
            },
            MediaKind::Video => Self::Reported { percent: 0.0 },
        }
    }

    fn is_timed(self) -> bool {
        matches!(self, Self::Timed { .. })
    }

    #[allow(clippy::cast_precision_loss)] // tick counts stay far below 2^24
    fn percent(self) -> f32 {
        match self {
            Self::Timed {
                ticks_elapsed,
                total_ticks,
            } => {
                if total_ticks == 0 {
                    0.0
                } else {
                    ticks_elapsed as f32 / total_ticks as f32 * 100.0
                }
            }
            Self::Reported { percent } => percent,
        }
    }

    /// Counts one elapsed tick; `true` when the full duration has elapsed.
    fn on_tick(&mut self) -> bool {
        match self {
            Self::Timed {
                ticks_elapsed,
                total_ticks,
            } => {
                *ticks_elapsed += 1;
                *ticks_elapsed >= *total_ticks
            }
            Self::Reported { .. } => false,
        }
    }

    /// Applies an externally reported playback position.
    ///
    /// A non-positive duration leaves progress unchanged; the report is
    /// meaningless and the next valid one will correct it.
    #[allow(clippy::cast_possible_truncation)] // percentages fit f32 exactly enough
    fn report(&mut self, current_secs: f64, duration_secs: f64) {
        if let Self::Reported { percent } = self {
            if duration_secs > 0.0 {
                *percent = ((current_secs / duration_secs) * 100.0).clamp(0.0, 100.0) as f32;
            }
        }
    }
}

/// Tap zones of the story surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    Previous,
    Next,
}

/// Maps a tap position to its navigation target: the left
/// [`TAP_ZONE_PREVIOUS_FRACTION`] of the surface goes back, the rest goes
/// forward.
#[must_use]
pub fn tap_target(x: f32, surface_width: f32) -> TapTarget {
    if surface_width > 0.0 && x < surface_width * TAP_ZONE_PREVIOUS_FRACTION {
        TapTarget::Previous
    } else {
        TapTarget::Next
    }
}

/// Read-only snapshot of the sequencer for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerState {
    /// `None` while the playlist is empty.
    pub active_index: Option<usize>,
    /// Progress of the active item in `[0, 100]`; `0.0` when idle.
    pub progress: f32,
    pub generation: Generation,
}

/// State changes observable from applying one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Nothing changed (stale or idle tick).
    None,
    /// The active item's progress moved.
    Progress { percent: f32 },
    /// The active item completed and the sequencer advanced.
    Advanced { index: usize },
}

#[derive(Debug)]
struct Active {
    index: usize,
    source: ProgressSource,
}

/// Advances through an ordered playlist of story media.
#[derive(Debug)]
pub struct MediaSequencer {
    items: Vec<MediaItem>,
    active: Option<Active>,
    generation: Generation,
    scheduler: Scheduler,
    timer: Option<(TimerToken, Generation)>,
    paused: bool,
    timings: Timings,
}

impl MediaSequencer {
    #[must_use]
    pub fn new(timings: Timings) -> Self {
        Self {
            items: Vec::new(),
            active: None,
            generation: Generation::default(),
            scheduler: Scheduler::new(),
            timer: None,
            paused: false,
            timings,
        }
    }

    /// Replaces the active playlist wholesale.
    ///
    /// Resets the position to the first item (idle for an empty list),
    /// cancels any running timer, bumps the generation and arms a fresh
    /// timer when the new active item is an image.
    pub fn load_playlist(&mut self, playlist: Playlist) {
        self.disarm();
        self.generation.bump();
        self.items = playlist.into_items();
        self.paused = false;
        self.active = if self.items.is_empty() {
            None
        } else {
            Some(Active {
                index: 0,
                source: ProgressSource::for_item(&self.items[0], &self.timings),
            })
        };
        tracing::debug!(
            len = self.items.len(),
            generation = self.generation.value(),
            "playlist replaced"
        );
        self.arm_for_active();
    }

    /// Moves to the next item: `(index + 1) mod len` when wrapping,
    /// stopping at the last item otherwise. No-op on an empty playlist.
    pub fn advance(&mut self, wrap: bool) {
        let len = self.items.len();
        let Some(active) = &self.active else {
            return;
        };
        let next = if active.index + 1 < len {
            active.index + 1
        } else if wrap {
            0
        } else {
            return;
        };
        self.set_active(next);
    }

    /// Jumps to an explicit index. Out-of-bounds requests are no-ops.
    pub fn jump_to(&mut self, index: usize) {
        if index >= self.items.len() {
            tracing::trace!(index, len = self.items.len(), "ignoring out-of-bounds jump");
            return;
        }
        self.set_active(index);
    }

    /// Resolves a tap on the story surface into a bounded jump.
    ///
    /// A backward tap on the first item and a forward tap past the last
    /// item are both no-ops.
    pub fn tap(&mut self, x: f32, surface_width: f32) {
        let Some(index) = self.active_index() else {
            return;
        };
        match tap_target(x, surface_width) {
            TapTarget::Previous => {
                if index > 0 {
                    self.jump_to(index - 1);
                }
            }
            TapTarget::Next => self.jump_to(index + 1),
        }
    }

    /// Records an externally reported playback position for the active
    /// video item. Never causes advancement; reports with a non-positive
    /// duration leave progress unchanged.
    pub fn report_video_progress(&mut self, current_secs: f64, duration_secs: f64) {
        if let Some(active) = &mut self.active {
            active.source.report(current_secs, duration_secs);
        }
    }

    /// The active video finished playing: advance with wraparound.
    pub fn report_video_ended(&mut self) {
        self.advance(true);
    }

    /// The platform declined to autoplay the active video.
    ///
    /// Non-fatal: the sequencer stays on the item until an end-of-playback
    /// report or manual navigation arrives. No fallback timer is armed;
    /// the video's duration is unknown in advance.
    pub fn report_playback_denied(&mut self) {
        tracing::warn!(
            index = ?self.active_index(),
            "autoplay denied, waiting for manual navigation"
        );
    }

    /// Suspends the image progress timer without losing elapsed progress.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.disarm();
    }

    /// Re-arms the timer suspended by [`pause`](Self::pause); the active
    /// item continues from its retained progress. No-op for videos and
    /// idle sequencers.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.arm_for_active();
    }

    /// Applies one scheduler tick.
    ///
    /// Ticks whose token or generation no longer matches the armed timer
    /// are discarded without touching state.
    pub fn apply_tick(&mut self, token: TimerToken) -> Effect {
        match self.timer {
            Some((armed, generation)) if armed == token && generation == self.generation => {}
            _ => {
                tracing::trace!(?token, "discarding stale tick");
                return Effect::None;
            }
        }
        let Some(active) = self.active.as_mut() else {
            return Effect::None;
        };
        if active.source.on_tick() {
            self.advance(true);
            match self.active.as_ref() {
                Some(active) => Effect::Advanced {
                    index: active.index,
                },
                None => Effect::None,
            }
        } else {
            Effect::Progress {
                percent: active.source.percent(),
            }
        }
    }

    /// Waits for the next timer tick and applies it. Returns `None`
    /// immediately when no timer is armed (video item, paused, or idle).
    pub async fn tick(&mut self) -> Option<Effect> {
        let token = self.scheduler.next_tick().await?;
        Some(self.apply_tick(token))
    }

    fn set_active(&mut self, index: usize) {
        self.disarm();
        self.generation.bump();
        self.active = Some(Active {
            index,
            source: ProgressSource::for_item(&self.items[index], &self.timings),
        });
        self.arm_for_active();
    }

    fn disarm(&mut self) {
        if let Some((token, _)) = self.timer.take() {
            self.scheduler.cancel(token);
        }
    }

    fn arm_for_active(&mut self) {
        debug_assert!(self.timer.is_none(), "arming over a live timer");
        if self.paused {
            return;
        }
        let Some(active) = &self.active else {
            return;
        };
        if active.source.is_timed() {
            let token = self.scheduler.start(self.timings.tick_interval);
            self.timer = Some((token, self.generation));
        }
    }

    #[must_use]
    pub fn state(&self) -> SequencerState {
        SequencerState {
            active_index: self.active_index(),
            progress: self.progress(),
            generation: self.generation,
        }
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.index)
    }

    #[must_use]
    pub fn active_item(&self) -> Option<&MediaItem> {
        self.items.get(self.active.as_ref()?.index)
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.active
            .as_ref()
            .map_or(0.0, |active| active.source.percent())
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Token of the currently armed progress timer, if any. Exposed so
    /// embedders routing ticks through their own event loop can correlate
    /// them.
    #[must_use]
    pub fn armed_token(&self) -> Option<TimerToken> {
        self.timer.map(|(token, _)| token)
    }
}

impl Default for MediaSequencer {
    fn default() -> Self {
        Self::new(Timings::default())
    }
}
