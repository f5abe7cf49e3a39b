//! Tour playback state
//!
//! A tour is an ordered, optionally timed playback of bookmarks:
//! Idle -> Playing(0) -> Playing(1) -> ... -> Idle. The state lives in an
//! explicit struct owned by the manager, and every transition returns
//! side-effect descriptors instead of touching real timers, so playback is
//! deterministic under test. The host executes the effects: navigate to a
//! bookmark, arm the auto-advance timer, or clear it.

use serde::{Deserialize, Serialize};

/// Side effect requested by a tour transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TourEffect {
    /// Navigate to a bookmark (via `go_to_bookmark`)
    Navigate(String),

    /// Arm the single auto-advance timer
    SetTimer { delay_ms: u64 },

    /// Clear the auto-advance timer if armed
    ClearTimer,
}

/// Position within an active tour; `{0, 0}` when idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourProgress {
    /// 1-based index of the current stop, 0 when idle
    pub current: usize,

    /// Number of stops, 0 when idle
    pub total: usize,
}

/// Playback state for one manager's tour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourState {
    /// Whether a tour is playing
    pub active: bool,

    /// Whether auto-advance is suspended
    pub paused: bool,

    /// Current stop index into `bookmark_ids`
    pub index: usize,

    /// The stops of this tour, in order
    pub bookmark_ids: Vec<String>,

    /// Whether the auto-advance timer is armed
    pub timer_armed: bool,
}

impl TourState {
    /// Begin playback over a stop list. Empty lists leave the state idle.
    pub fn start(&mut self, bookmark_ids: Vec<String>) {
        if bookmark_ids.is_empty() {
            self.reset();
            return;
        }
        self.active = true;
        self.paused = false;
        self.index = 0;
        self.bookmark_ids = bookmark_ids;
        self.timer_armed = false;
    }

    /// Back to idle.
    pub fn reset(&mut self) {
        *self = TourState::default();
    }

    /// The current stop's bookmark id, if playing.
    pub fn current_id(&self) -> Option<&str> {
        if self.active {
            self.bookmark_ids.get(self.index).map(String::as_str)
        } else {
            None
        }
    }

    /// Move to the next stop. Returns false when playback ran off the end
    /// (the caller stops the tour).
    pub fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        if self.index + 1 >= self.bookmark_ids.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move to the previous stop, clamping at the first.
    pub fn retreat(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.index = self.index.saturating_sub(1);
        true
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> TourProgress {
        if self.active {
            TourProgress {
                current: self.index + 1,
                total: self.bookmark_ids.len(),
            }
        } else {
            TourProgress {
                current: 0,
                total: 0,
            }
        }
    }
}
