// SPDX-License-Identifier: MPL-2.0
//! `menu_stories` is the timed playback and gesture-navigation engine
//! behind a restaurant's public digital menu.
//!
//! It coordinates wall-clock timers, externally reported video playback
//! events and touch gestures into one consistent notion of current
//! position, progress and direction for three surfaces: the auto-advancing
//! story view, the rotating hero banner, and the swipe-navigable product
//! detail viewer. The crate renders nothing and fetches nothing: the
//! presentation layer reads index/progress/direction and draws, while a
//! content collaborator supplies the ordered descriptor lists.

#![doc(html_root_url = "https://docs.rs/menu_stories/0.1.0")]

pub mod carousel;
pub mod config;
pub mod content;
pub mod error;
pub mod gesture;
pub mod scheduler;
pub mod sequencer;
pub mod viewer;

#[cfg(test)]
mod test_utils;
