// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration, including loading and
//! saving timing overrides from a `settings.toml` file.
//!
//! Every field is optional; missing or unparseable values fall back to the
//! defaults in [`defaults`], and overrides are clamped to the bounds
//! declared there before the engine ever sees them. Engine components
//! consume the resolved [`Timings`] struct, never the raw [`Config`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MenuStories";

/// Raw, optional timing overrides as stored on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tick_interval_ms: Option<u64>,
    #[serde(default)]
    pub image_duration_ms: Option<u64>,
    #[serde(default)]
    pub transition_settle_ms: Option<u64>,
    #[serde(default)]
    pub hero_interval_ms: Option<u64>,
    #[serde(default)]
    pub swipe_threshold: Option<f32>,
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Resolved timing constants consumed by the engine components.
#[derive(Debug, Clone, PartialEq)]
pub struct Timings {
    /// Period of the image progress timer.
    pub tick_interval: Duration,
    /// Fixed display duration of an image story item.
    pub image_duration: Duration,
    /// Delay between beginning a transition and committing the index change.
    pub transition_settle: Duration,
    /// Interval between hero banner rotations.
    pub hero_interval: Duration,
    /// Minimum horizontal travel for a swipe to register.
    pub swipe_threshold: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(defaults::DEFAULT_TICK_INTERVAL_MS),
            image_duration: Duration::from_millis(defaults::DEFAULT_IMAGE_DURATION_MS),
            transition_settle: Duration::from_millis(defaults::DEFAULT_TRANSITION_SETTLE_MS),
            hero_interval: Duration::from_millis(defaults::DEFAULT_HERO_INTERVAL_MS),
            swipe_threshold: defaults::DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl Timings {
    /// Resolves a raw [`Config`] into usable timings, clamping every
    /// override to its declared bounds.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            tick_interval: clamp_ms(
                config.tick_interval_ms,
                defaults.tick_interval,
                defaults::MIN_TICK_INTERVAL_MS,
                defaults::MAX_TICK_INTERVAL_MS,
            ),
            image_duration: clamp_ms(
                config.image_duration_ms,
                defaults.image_duration,
                defaults::MIN_IMAGE_DURATION_MS,
                defaults::MAX_IMAGE_DURATION_MS,
            ),
            transition_settle: clamp_ms(
                config.transition_settle_ms,
                defaults.transition_settle,
                defaults::MIN_TRANSITION_SETTLE_MS,
                defaults::MAX_TRANSITION_SETTLE_MS,
            ),
            hero_interval: clamp_ms(
                config.hero_interval_ms,
                defaults.hero_interval,
                defaults::MIN_HERO_INTERVAL_MS,
                defaults::MAX_HERO_INTERVAL_MS,
            ),
            swipe_threshold: config
                .swipe_threshold
                .map_or(defaults.swipe_threshold, |t| {
                    t.clamp(defaults::MIN_SWIPE_THRESHOLD, defaults::MAX_SWIPE_THRESHOLD)
                }),
        }
    }

    /// Number of progress ticks making up one full image display duration.
    ///
    /// Never zero, even for degenerate overrides.
    #[must_use]
    pub fn image_total_ticks(&self) -> u32 {
        let tick_ms = self.tick_interval.as_millis().max(1);
        let total = (self.image_duration.as_millis() / tick_ms).max(1);
        u32::try_from(total).unwrap_or(u32::MAX)
    }
}

fn clamp_ms(override_ms: Option<u64>, default: Duration, min_ms: u64, max_ms: u64) -> Duration {
    match override_ms {
        Some(ms) => Duration::from_millis(ms.clamp(min_ms, max_ms)),
        None => default,
    }
}
