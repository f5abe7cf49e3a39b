//! Bookmark data model
//!
//! A bookmark is a named, replayable snapshot of camera, ambiance, layer,
//! and control state. Groups are ordered membership lists holding weak
//! references by id; deleting a bookmark cascades out of every group,
//! deleting a group leaves its bookmarks alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vantage_core::{Ambiance, CameraPose, LayerState, Transition};

/// Which generation algorithm produced a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationType {
    PerCategory,
    PerRange,
    PerTime,
    PerItem,
}

/// Provenance of a generated bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFrom {
    /// The algorithm that produced this bookmark
    pub generation: GenerationType,

    /// Source field, where the algorithm has one
    pub field: Option<String>,

    /// When the generation ran (RFC 3339)
    pub generated_at: String,
}

/// Control payload a bookmark applies on navigation.
///
/// The payload shape is keyed to the generation that produced the
/// bookmark, so each variant is statically checked; hand-captured
/// bookmarks carry a free-form `Custom` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlValues {
    /// No control payload
    None,

    /// Filter to one category of a choice field
    Category { field: String, value: String },

    /// Filter to a numeric range; `min` is inclusive, `max` exclusive
    /// except for the final bucket of a partition
    Range { field: String, min: f64, max: f64 },

    /// Filter to a time window (RFC 3339 bounds)
    Time {
        field: String,
        start: String,
        end: String,
    },

    /// Focus a single record
    Item { record_id: i64 },

    /// Host-defined control state captured from a live widget
    Custom(BTreeMap<String, serde_json::Value>),
}

impl Default for ControlValues {
    fn default() -> Self {
        ControlValues::None
    }
}

/// A named, replayable snapshot of widget view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Unique id within the owning manager (`bm-{timestamp}-{random}`)
    pub id: String,

    pub name: String,

    /// Display icon name, if any
    pub icon: Option<String>,

    /// Display color (CSS form), if any
    pub color: Option<String>,

    /// Camera pose restored on navigation
    pub camera: CameraPose,

    /// Lighting environment restored on navigation
    pub ambiance: Ambiance,

    /// Per-layer visibility and opacity
    pub layer_states: Vec<LayerState>,

    /// Control payload applied on navigation
    pub control_values: ControlValues,

    /// How the camera moves to this bookmark
    pub transition: Transition,

    /// Set when a generation algorithm produced this bookmark
    pub generated_from: Option<GeneratedFrom>,

    /// Narration text shown during tours
    pub narration: Option<String>,

    /// Dwell time during tours, in milliseconds
    pub duration_ms: Option<u64>,

    /// Whether tours advance past this bookmark automatically
    pub auto_advance: bool,

    /// Creation time (RFC 3339)
    pub created_at: String,
}

/// Live widget state a bookmark is captured from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    pub camera: CameraPose,
    pub ambiance: Ambiance,
    pub layers: Vec<LayerState>,

    /// Host-defined control state (filters, toggles)
    pub controls: BTreeMap<String, serde_json::Value>,
}

/// Options for capturing a bookmark from live state.
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    pub icon: Option<String>,
    pub color: Option<String>,
    pub transition: Option<Transition>,
    pub narration: Option<String>,
    pub duration_ms: Option<u64>,
    pub auto_advance: bool,
}

/// Partial update applied through `update_bookmark`. Unset fields keep
/// their current value.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub camera: Option<CameraPose>,
    pub ambiance: Option<Ambiance>,
    pub layer_states: Option<Vec<LayerState>>,
    pub transition: Option<Transition>,
    pub narration: Option<String>,
    pub duration_ms: Option<u64>,
    pub auto_advance: Option<bool>,
}

impl BookmarkPatch {
    /// Apply the set fields onto a bookmark.
    pub fn apply_to(&self, bookmark: &mut Bookmark) {
        if let Some(name) = &self.name {
            bookmark.name = name.clone();
        }
        if let Some(icon) = &self.icon {
            bookmark.icon = Some(icon.clone());
        }
        if let Some(color) = &self.color {
            bookmark.color = Some(color.clone());
        }
        if let Some(camera) = &self.camera {
            bookmark.camera = camera.clone();
        }
        if let Some(ambiance) = &self.ambiance {
            bookmark.ambiance = ambiance.clone();
        }
        if let Some(layers) = &self.layer_states {
            bookmark.layer_states = layers.clone();
        }
        if let Some(transition) = &self.transition {
            bookmark.transition = transition.clone();
        }
        if let Some(narration) = &self.narration {
            bookmark.narration = Some(narration.clone());
        }
        if let Some(duration_ms) = self.duration_ms {
            bookmark.duration_ms = Some(duration_ms);
        }
        if let Some(auto_advance) = self.auto_advance {
            bookmark.auto_advance = auto_advance;
        }
    }
}

/// An ordered bookmark membership list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkGroup {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,

    /// Member bookmark ids, weak references in display order
    pub bookmark_ids: Vec<String>,

    /// Whether the group renders collapsed
    pub collapsed: bool,
}

impl BookmarkGroup {
    /// Create an empty, expanded group.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            color: None,
            bookmark_ids: Vec::new(),
            collapsed: false,
        }
    }

    /// Whether a bookmark is a member.
    pub fn contains(&self, bookmark_id: &str) -> bool {
        self.bookmark_ids.iter().any(|id| id == bookmark_id)
    }
}
