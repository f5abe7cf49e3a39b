//! Camera pose and transition types for the map widgets
//!
//! A pose is the 2.5D map camera shared by every vantage widget: a
//! lng/lat center, zoom level, pitch, and compass bearing. Transitions
//! describe how a widget should move between two poses.

use serde::{Deserialize, Serialize};

/// A replayable map camera pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Center as [longitude, latitude] in degrees
    pub center: [f64; 2],

    /// Zoom level (non-negative; web-mercator convention)
    pub zoom: f64,

    /// Pitch in degrees (0 = top-down)
    pub pitch: f64,

    /// Compass bearing in degrees clockwise from north
    pub bearing: f64,
}

impl CameraPose {
    /// Create a pose; zoom is clamped to be non-negative.
    pub fn new(center: [f64; 2], zoom: f64, pitch: f64, bearing: f64) -> Self {
        Self {
            center,
            zoom: zoom.max(0.0),
            pitch,
            bearing,
        }
    }

    /// Create a top-down pose at a center and zoom.
    pub fn looking_at(center: [f64; 2], zoom: f64) -> Self {
        Self::new(center, zoom, 0.0, 0.0)
    }

    /// Longitude component of the center.
    pub fn lng(&self) -> f64 {
        self.center[0]
    }

    /// Latitude component of the center.
    pub fn lat(&self) -> f64 {
        self.center[1]
    }

    /// Copy of this pose with the bearing wrapped into [0, 360).
    pub fn normalized(&self) -> Self {
        let mut bearing = self.bearing % 360.0;
        if bearing < 0.0 {
            bearing += 360.0;
        }
        Self { bearing, ..self.clone() }
    }

    /// Check whether another pose is within a tolerance on every component.
    pub fn is_similar(&self, other: &CameraPose, tolerance: f64) -> bool {
        (self.center[0] - other.center[0]).abs() < tolerance
            && (self.center[1] - other.center[1]).abs() < tolerance
            && (self.zoom - other.zoom).abs() < tolerance
            && (self.pitch - other.pitch).abs() < tolerance
            && (self.bearing - other.bearing).abs() < tolerance
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new([0.0, 0.0], 2.0, 0.0, 0.0)
    }
}

/// Easing curve for animated camera flights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInOut,
    EaseOut,
}

impl Default for Easing {
    fn default() -> Self {
        Easing::EaseInOut
    }
}

impl Easing {
    /// Evaluate the curve at t in [0, 1].
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
        }
    }
}

/// Options for an animated flight to a pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOptions {
    /// Animation duration in milliseconds
    pub duration_ms: u64,

    /// Easing curve applied to the animation
    pub easing: Easing,
}

impl Default for FlightOptions {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            easing: Easing::default(),
        }
    }
}

/// How a widget should move to a bookmark's pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Jump with no animation
    Instant,

    /// Arc-style flight
    Fly,

    /// Straight interpolation
    Ease,
}

/// A bookmark's stored transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,

    /// Duration in milliseconds (ignored for Instant)
    pub duration_ms: u64,

    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            kind: TransitionKind::Fly,
            duration_ms: 2000,
            easing: Easing::default(),
        }
    }
}

impl Transition {
    /// An instant transition.
    pub fn instant() -> Self {
        Self {
            kind: TransitionKind::Instant,
            duration_ms: 0,
            easing: Easing::Linear,
        }
    }

    /// A flight with the given duration.
    pub fn fly(duration_ms: u64) -> Self {
        Self {
            kind: TransitionKind::Fly,
            duration_ms,
            easing: Easing::default(),
        }
    }

    /// Whether this transition animates at all.
    pub fn is_animated(&self) -> bool {
        !matches!(self.kind, TransitionKind::Instant) && self.duration_ms > 0
    }
}
