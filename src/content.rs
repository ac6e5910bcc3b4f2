// SPDX-License-Identifier: MPL-2.0
//! Data contract with the content collaborator.
//!
//! The dashboard side of the product supplies ordered descriptor lists:
//! hero images, per-category story media, and visibility-flagged products
//! with optional combo contents. This module turns those raw records into
//! the lists the engine navigates. Filtering happens here, up front:
//! malformed media entries are dropped and invisible products are excluded,
//! so every index the engine hands out refers to a displayable item.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a story media entry as delivered by the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One playable story item.
///
/// Identity is the index position in its containing playlist; playlists
/// are replaced wholesale when the active category changes, never mutated
/// item by item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaItem {
    /// Displayed for the fixed configured duration.
    Image { url: String },
    /// Plays until the playback surface reports it ended.
    Video { url: String },
}

impl MediaItem {
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Image { .. } => MediaKind::Image,
            MediaItem::Video { .. } => MediaKind::Video,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            MediaItem::Image { url } | MediaItem::Video { url } => url,
        }
    }
}

/// Raw story media record. The URL may be absent on malformed rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryMediaDescriptor {
    #[serde(default)]
    pub url: Option<String>,
    pub kind: MediaKind,
}

/// Ordered sequence of story items for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    items: Vec<MediaItem>,
}

impl Playlist {
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    /// Builds a playlist from collaborator records, skipping entries
    /// without a usable URL. An all-malformed input yields an empty
    /// playlist, which the sequencer treats as idle.
    #[must_use]
    pub fn from_descriptors(descriptors: &[StoryMediaDescriptor]) -> Self {
        let items = descriptors
            .iter()
            .filter_map(|descriptor| {
                let url = descriptor.url.as_deref().unwrap_or("").trim();
                if url.is_empty() {
                    tracing::debug!(kind = ?descriptor.kind, "skipping media entry without URL");
                    return None;
                }
                let url = url.to_string();
                Some(match descriptor.kind {
                    MediaKind::Image => MediaItem::Image { url },
                    MediaKind::Video => MediaItem::Video { url },
                })
            })
            .collect();
        Self { items }
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
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<MediaItem> {
        self.items
    }
}

/// Hero banner descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub show_description: bool,
}

/// One line of a composite product's included-items list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Raw product record, including the visibility flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub combo_items: Vec<ComboItem>,
}

fn default_visible() -> bool {
    true
}

/// A visible product as exposed to the detail viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub combo_items: Vec<ComboItem>,
}

/// Visible products grouped by category.
///
/// Built once per content refresh and replaced wholesale; the viewer's
/// navigation bounds are answered from these filtered lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    groups: HashMap<String, Vec<Product>>,
}

impl Catalog {
    /// Builds a catalog, excluding items flagged invisible up front.
    #[must_use]
    pub fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<ProductDescriptor>)>,
    {
        let groups = groups
            .into_iter()
            .map(|(group_id, descriptors)| {
                let visible = descriptors
                    .into_iter()
                    .filter(|d| d.visible)
                    .map(|d| Product {
                        name: d.name,
                        combo_items: d.combo_items,
                    })
                    .collect();
                (group_id, visible)
            })
            .collect();
        Self { groups }
    }

    /// Number of visible items in a group; zero for unknown groups.
    #[must_use]
    pub fn visible_item_count(&self, group_id: &str) -> usize {
        self.groups.get(group_id).map_or(0, Vec::len)
    }

    /// The visible item at `index` within a group.
    #[must_use]
    pub fn visible_item(&self, group_id: &str, index: usize) -> Option<&Product> {
        self.groups.get(group_id)?.get(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(url: Option<&str>, kind: MediaKind) -> StoryMediaDescriptor {
        StoryMediaDescriptor {
            url: url.map(str::to_string),
            kind,
        }
    }

    #[test]
    fn playlist_skips_entries_without_url() {
        let playlist = Playlist::from_descriptors(&[
            descriptor(Some("menu/soup.jpg"), MediaKind::Image),
            descriptor(None, MediaKind::Image),
            descriptor(Some("   "), MediaKind::Video),
            descriptor(Some("menu/grill.mp4"), MediaKind::Video),
        ]);

        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.items()[0].url(), "menu/soup.jpg");
        assert_eq!(playlist.items()[1].kind(), MediaKind::Video);
    }

    #[test]
    fn all_malformed_entries_yield_empty_playlist() {
        let playlist = Playlist::from_descriptors(&[
            descriptor(None, MediaKind::Image),
            descriptor(Some(""), MediaKind::Video),
        ]);
        assert!(playlist.is_empty());
    }

    #[test]
    fn catalog_excludes_invisible_items() {
        let catalog = Catalog::from_groups([(
            "mains".to_string(),
            vec![
                ProductDescriptor {
                    name: "Feijoada".into(),
                    visible: true,
                    combo_items: Vec::new(),
                },
                ProductDescriptor {
                    name: "Off-menu special".into(),
                    visible: false,
                    combo_items: Vec::new(),
                },
                ProductDescriptor {
                    name: "Moqueca".into(),
                    visible: true,
                    combo_items: Vec::new(),
                },
            ],
        )]);

        assert_eq!(catalog.visible_item_count("mains"), 2);
        // Indices refer to visible items only.
        assert_eq!(catalog.visible_item("mains", 1).unwrap().name, "Moqueca");
        assert_eq!(catalog.visible_item_count("desserts"), 0);
    }

    #[test]
    fn media_kind_deserializes_lowercase() {
        let descriptor: StoryMediaDescriptor =
            toml::from_str("url = \"a.jpg\"\nkind = \"image\"").expect("parse failed");
        assert_eq!(descriptor.kind, MediaKind::Image);
    }
}
