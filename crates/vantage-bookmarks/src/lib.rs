//! Bookmark capture, tours, and generative bookmarks for vantage widgets
//!
//! This crate owns the saved-view subsystem:
//!
//! - **Bookmarks**: named snapshots of camera, ambiance, layer, and
//!   control state, organized into groups and persisted through the
//!   host's key-value store under a versioned envelope
//! - **Tours**: ordered playback over bookmarks with pause, manual
//!   stepping, and timed auto-advance expressed as side-effect
//!   descriptors the host executes
//! - **Generation**: algorithms that derive a bookmark set from record
//!   data, one per category, numeric range bucket, time period, or item
//!
//! The [`BookmarkManager`] is the entry point; hosts feed it live widget
//! state and execute the [`NavigationPlan`]s and [`TourEffect`]s it
//! returns.

pub mod bookmark;
pub mod error;
pub mod generate;
pub mod manager;
pub mod tour;

pub use bookmark::{
    Bookmark, BookmarkGroup, BookmarkPatch, CaptureOptions, ControlValues, GeneratedFrom,
    GenerationType, WidgetState,
};
pub use error::{BookmarkError, BookmarkResult};
pub use generate::{
    BoundsFn, GenerationConfig, GenerationKind, GeoBounds, PlannedBookmark, RangeMode,
    TimeGranularity,
};
pub use manager::{BookmarkConfig, BookmarkManager, CameraCommand, NavigationPlan};
pub use tour::{TourEffect, TourProgress, TourState};
