//! Bookmark manager
//!
//! Owns the bookmark list, groups, and tour playback for one widget
//! instance, persisting everything through the host's key-value store
//! under a versioned envelope. Navigation and tour transitions return
//! plans and effect descriptors for the host to execute, so the manager
//! itself never touches a map or a timer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use vantage_core::{
    Ambiance, CameraPose, Clock, FlightOptions, KeyValueStore, LayerState, SystemClock, TableData,
};

use crate::bookmark::{
    Bookmark, BookmarkGroup, BookmarkPatch, CaptureOptions, ControlValues, GeneratedFrom,
    WidgetState,
};
use crate::error::{BookmarkError, BookmarkResult};
use crate::generate::{plan, BoundsFn, GenerationConfig};
use crate::tour::{TourEffect, TourProgress, TourState};

/// Storage envelope version this build writes.
const STORAGE_VERSION: u32 = 1;

/// Manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkConfig {
    /// Key the bookmark envelope persists under
    pub storage_key: String,
}

impl Default for BookmarkConfig {
    fn default() -> Self {
        Self {
            storage_key: "vantage.bookmarks".to_string(),
        }
    }
}

/// What the host persists: everything the manager owns, behind a
/// version number so a future layout change can migrate or refuse.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEnvelope {
    version: u32,
    bookmarks: Vec<Bookmark>,
    groups: Vec<BookmarkGroup>,
}

/// How the host should move the camera for a navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CameraCommand {
    /// Snap with no animation
    Jump(CameraPose),

    /// Animate to the pose
    Fly {
        pose: CameraPose,
        options: FlightOptions,
    },
}

/// Everything the host applies to replay a bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationPlan {
    pub bookmark_id: String,
    pub camera: CameraCommand,
    pub ambiance: Ambiance,
    pub layer_states: Vec<LayerState>,
    pub control_values: ControlValues,
}

/// Bookmark, group, tour, and persistence state for one widget.
pub struct BookmarkManager {
    config: BookmarkConfig,
    bookmarks: Vec<Bookmark>,
    groups: Vec<BookmarkGroup>,
    tour: TourState,

    /// Bookmark id the camera is currently traveling toward
    pending_navigation: Option<String>,

    store: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl BookmarkManager {
    /// Create a manager, loading any previously persisted state. A
    /// corrupt or unknown-version blob is logged and discarded rather
    /// than failing construction.
    pub fn new(config: BookmarkConfig, store: Box<dyn KeyValueStore>) -> Self {
        let mut manager = Self {
            config,
            bookmarks: Vec::new(),
            groups: Vec::new(),
            tour: TourState::default(),
            pending_navigation: None,
            store,
            clock: Arc::new(SystemClock),
        };
        manager.load();
        manager
    }

    /// Replace the clock, for deterministic ids and timestamps in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn load(&mut self) {
        let Some(raw) = self.store.get_item(&self.config.storage_key) else {
            return;
        };
        match serde_json::from_str::<StoredEnvelope>(&raw) {
            Ok(envelope) if envelope.version == STORAGE_VERSION => {
                self.bookmarks = envelope.bookmarks;
                self.groups = envelope.groups;
            }
            Ok(envelope) => {
                warn!(
                    version = envelope.version,
                    "discarding stored bookmarks with unknown version"
                );
            }
            Err(err) => {
                warn!(error = %err, "discarding corrupt stored bookmarks");
            }
        }
    }

    /// Persist current state. A store failure is logged and the manager
    /// keeps operating in memory.
    fn save(&mut self) {
        let envelope = StoredEnvelope {
            version: STORAGE_VERSION,
            bookmarks: self.bookmarks.clone(),
            groups: self.groups.clone(),
        };
        let json = match serde_json::to_string(&envelope) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize bookmarks");
                return;
            }
        };
        if let Err(err) = self.store.set_item(&self.config.storage_key, &json) {
            warn!(error = %err, "failed to persist bookmarks");
        }
    }

    fn new_id(&self, prefix: &str) -> String {
        let random = uuid::Uuid::new_v4().simple().to_string();
        format!("{prefix}-{}-{}", self.clock.now_ms(), &random[..8])
    }

    fn timestamp(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.clock.now_ms() as i64)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default()
    }

    // ---- bookmarks ----

    /// Capture the live widget state as a new bookmark. Returns its id.
    pub fn capture_bookmark(
        &mut self,
        name: impl Into<String>,
        state: &WidgetState,
        options: CaptureOptions,
    ) -> String {
        let id = self.new_id("bm");
        let control_values = if state.controls.is_empty() {
            ControlValues::None
        } else {
            ControlValues::Custom(state.controls.clone())
        };
        self.bookmarks.push(Bookmark {
            id: id.clone(),
            name: name.into(),
            icon: options.icon,
            color: options.color,
            camera: state.camera.clone(),
            ambiance: state.ambiance.clone(),
            layer_states: state.layers.clone(),
            control_values,
            transition: options.transition.unwrap_or_default(),
            generated_from: None,
            narration: options.narration,
            duration_ms: options.duration_ms,
            auto_advance: options.auto_advance,
            created_at: self.timestamp(),
        });
        self.save();
        id
    }

    /// Apply a partial update to a bookmark.
    pub fn update_bookmark(&mut self, id: &str, patch: &BookmarkPatch) -> BookmarkResult<()> {
        let bookmark = self
            .bookmarks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| BookmarkError::NotFound { id: id.to_string() })?;
        patch.apply_to(bookmark);
        self.save();
        Ok(())
    }

    /// Delete a bookmark, removing it from every group and any active
    /// tour. A tour left with no stops ends.
    pub fn delete_bookmark(&mut self, id: &str) -> BookmarkResult<()> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        if self.bookmarks.len() == before {
            return Err(BookmarkError::NotFound { id: id.to_string() });
        }
        for group in &mut self.groups {
            group.bookmark_ids.retain(|member| member != id);
        }
        if self.tour.active {
            self.tour.bookmark_ids.retain(|stop| stop != id);
            if self.tour.bookmark_ids.is_empty() {
                self.tour.reset();
            } else if self.tour.index >= self.tour.bookmark_ids.len() {
                self.tour.index = self.tour.bookmark_ids.len() - 1;
            }
        }
        self.save();
        Ok(())
    }

    /// Look up a bookmark by id.
    pub fn get_bookmark(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// All bookmarks, in capture order.
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// All groups, in creation order.
    pub fn groups(&self) -> &[BookmarkGroup] {
        &self.groups
    }

    // ---- groups ----

    /// Create an empty group. Returns its id.
    pub fn create_group(&mut self, name: impl Into<String>) -> String {
        let id = self.new_id("grp");
        self.groups.push(BookmarkGroup::new(id.clone(), name));
        self.save();
        id
    }

    /// Delete a group. Its member bookmarks survive ungrouped.
    pub fn delete_group(&mut self, id: &str) -> BookmarkResult<()> {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != id);
        if self.groups.len() == before {
            return Err(BookmarkError::GroupNotFound { id: id.to_string() });
        }
        self.save();
        Ok(())
    }

    /// Add a bookmark to a group. Adding a member twice is a no-op.
    pub fn add_to_group(&mut self, group_id: &str, bookmark_id: &str) -> BookmarkResult<()> {
        if self.get_bookmark(bookmark_id).is_none() {
            return Err(BookmarkError::NotFound {
                id: bookmark_id.to_string(),
            });
        }
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| BookmarkError::GroupNotFound {
                id: group_id.to_string(),
            })?;
        if !group.contains(bookmark_id) {
            group.bookmark_ids.push(bookmark_id.to_string());
        }
        self.save();
        Ok(())
    }

    /// Remove a bookmark from a group.
    pub fn remove_from_group(&mut self, group_id: &str, bookmark_id: &str) -> BookmarkResult<()> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| BookmarkError::GroupNotFound {
                id: group_id.to_string(),
            })?;
        group.bookmark_ids.retain(|member| member != bookmark_id);
        self.save();
        Ok(())
    }

    /// Flip a group's collapsed state.
    pub fn toggle_collapsed(&mut self, group_id: &str) -> BookmarkResult<bool> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| BookmarkError::GroupNotFound {
                id: group_id.to_string(),
            })?;
        group.collapsed = !group.collapsed;
        let collapsed = group.collapsed;
        self.save();
        Ok(collapsed)
    }

    // ---- navigation ----

    /// Build the navigation plan for a bookmark. Animated transitions
    /// leave a pending navigation that completes on `notify_move_end`;
    /// instant ones complete immediately.
    pub fn go_to_bookmark(&mut self, id: &str) -> BookmarkResult<NavigationPlan> {
        let bookmark = self
            .get_bookmark(id)
            .ok_or_else(|| BookmarkError::NotFound { id: id.to_string() })?;

        let camera = if bookmark.transition.is_animated() {
            CameraCommand::Fly {
                pose: bookmark.camera.clone(),
                options: FlightOptions {
                    duration_ms: bookmark.transition.duration_ms,
                    easing: bookmark.transition.easing,
                },
            }
        } else {
            CameraCommand::Jump(bookmark.camera.clone())
        };
        let plan = NavigationPlan {
            bookmark_id: bookmark.id.clone(),
            camera,
            ambiance: bookmark.ambiance.clone(),
            layer_states: bookmark.layer_states.clone(),
            control_values: bookmark.control_values.clone(),
        };

        self.pending_navigation = if bookmark.transition.is_animated() {
            Some(bookmark.id.clone())
        } else {
            None
        };
        Ok(plan)
    }

    /// The host calls this when a camera movement finishes. Returns the
    /// bookmark id whose navigation just completed, if one was pending.
    /// Movements after `stop_tour` or unrelated user panning return None.
    pub fn notify_move_end(&mut self) -> Option<String> {
        self.pending_navigation.take()
    }

    // ---- tours ----

    /// Effects for arriving at the current tour stop: clear a stale
    /// timer, navigate, and re-arm the timer when the stop auto-advances.
    fn step_effects(&mut self) -> Vec<TourEffect> {
        let Some(id) = self.tour.current_id().map(str::to_string) else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if self.tour.timer_armed {
            effects.push(TourEffect::ClearTimer);
            self.tour.timer_armed = false;
        }
        effects.push(TourEffect::Navigate(id.clone()));

        let dwell = self
            .get_bookmark(&id)
            .filter(|b| b.auto_advance)
            .and_then(|b| b.duration_ms);
        if let Some(delay_ms) = dwell {
            if !self.tour.paused {
                effects.push(TourEffect::SetTimer { delay_ms });
                self.tour.timer_armed = true;
            }
        }
        effects
    }

    /// Start a tour over the given bookmark ids, or over every bookmark
    /// when none are given. Unknown ids are skipped. Starting with no
    /// valid stops leaves the tour idle and returns no effects.
    pub fn start_tour(&mut self, bookmark_ids: Option<Vec<String>>) -> Vec<TourEffect> {
        let stops: Vec<String> = match bookmark_ids {
            Some(ids) => ids
                .into_iter()
                .filter(|id| self.get_bookmark(id).is_some())
                .collect(),
            None => self.bookmarks.iter().map(|b| b.id.clone()).collect(),
        };
        self.tour.start(stops);
        self.step_effects()
    }

    /// Advance to the next stop, ending the tour past the last one.
    pub fn next_tour_step(&mut self) -> Vec<TourEffect> {
        if !self.tour.active {
            return Vec::new();
        }
        if self.tour.advance() {
            self.step_effects()
        } else {
            self.stop_tour()
        }
    }

    /// Step back to the previous stop, clamping at the first.
    pub fn previous_tour_step(&mut self) -> Vec<TourEffect> {
        if !self.tour.retreat() {
            return Vec::new();
        }
        self.step_effects()
    }

    /// Pause or resume auto-advance. Pausing clears the armed timer;
    /// resuming re-arms it for the current stop.
    pub fn toggle_tour_pause(&mut self) -> Vec<TourEffect> {
        if !self.tour.active {
            return Vec::new();
        }
        self.tour.paused = !self.tour.paused;

        if self.tour.paused {
            if self.tour.timer_armed {
                self.tour.timer_armed = false;
                return vec![TourEffect::ClearTimer];
            }
            return Vec::new();
        }

        let dwell = self
            .tour
            .current_id()
            .and_then(|id| self.get_bookmark(id))
            .filter(|b| b.auto_advance)
            .and_then(|b| b.duration_ms);
        match dwell {
            Some(delay_ms) => {
                self.tour.timer_armed = true;
                vec![TourEffect::SetTimer { delay_ms }]
            }
            None => Vec::new(),
        }
    }

    /// The host calls this when the auto-advance timer fires.
    pub fn on_tour_timer(&mut self) -> Vec<TourEffect> {
        self.tour.timer_armed = false;
        self.next_tour_step()
    }

    /// End the tour. The timer clear is unconditional so a host timer
    /// the manager lost track of cannot fire into an idle tour.
    pub fn stop_tour(&mut self) -> Vec<TourEffect> {
        self.tour.reset();
        self.pending_navigation = None;
        vec![TourEffect::ClearTimer]
    }

    /// Progress snapshot, `{0, 0}` when no tour is playing.
    pub fn tour_progress(&self) -> TourProgress {
        self.tour.progress()
    }

    // ---- generation ----

    /// Run a generation algorithm and store its bookmarks. Returns the
    /// new ids in plan order; state persists once at the end.
    pub fn generate_bookmarks(
        &mut self,
        config: &GenerationConfig,
        data: &TableData,
        bounds_for_record: Option<&BoundsFn>,
    ) -> BookmarkResult<Vec<String>> {
        let plans = plan(config, data, bounds_for_record)?;
        let generated_at = self.timestamp();

        let mut ids = Vec::with_capacity(plans.len());
        for planned in plans {
            let id = self.new_id("bm");
            self.bookmarks.push(Bookmark {
                id: id.clone(),
                name: planned.name,
                icon: None,
                color: None,
                camera: planned.camera,
                ambiance: planned.ambiance,
                layer_states: Vec::new(),
                control_values: planned.control_values,
                transition: config.transition.clone(),
                generated_from: Some(GeneratedFrom {
                    generation: planned.generation,
                    field: planned.field,
                    generated_at: generated_at.clone(),
                }),
                narration: None,
                duration_ms: config.duration_ms,
                auto_advance: config.auto_advance,
                created_at: generated_at.clone(),
            });
            ids.push(id);
        }
        self.save();
        Ok(ids)
    }

    // ---- import/export ----

    /// Export all bookmarks and groups as a versioned JSON string.
    pub fn export_json(&self) -> String {
        let envelope = StoredEnvelope {
            version: STORAGE_VERSION,
            bookmarks: self.bookmarks.clone(),
            groups: self.groups.clone(),
        };
        serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| "{}".to_string())
    }

    /// Replace all state from a previously exported JSON string.
    pub fn import_json(&mut self, json: &str) -> BookmarkResult<()> {
        let envelope: StoredEnvelope =
            serde_json::from_str(json).map_err(|err| BookmarkError::ImportFailed {
                message: err.to_string(),
            })?;
        if envelope.version != STORAGE_VERSION {
            return Err(BookmarkError::ImportFailed {
                message: format!("unknown version {}", envelope.version),
            });
        }
        self.bookmarks = envelope.bookmarks;
        self.groups = envelope.groups;
        self.tour.reset();
        self.pending_navigation = None;
        self.save();
        Ok(())
    }
}
