//! Ambiance and layer state
//!
//! Ambiance is the simulated lighting environment of a 3D map widget
//! (time of day, date, shadows). Layer state is the per-layer visibility
//! and opacity a bookmark captures and replays.

use serde::{Deserialize, Serialize};

/// Simulated lighting environment of a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ambiance {
    /// Simulated time of day in fractional hours (0.0..24.0)
    pub time_of_day: f64,

    /// Simulated calendar date (RFC 3339 date), if pinned
    pub date: Option<String>,

    /// Whether shadow rendering is enabled
    pub shadows_enabled: bool,

    /// Whether the sun position follows the simulated time and date
    pub use_realistic_sun: bool,
}

impl Ambiance {
    /// Create an ambiance at a given time of day (wrapped into 0..24).
    pub fn at_hour(time_of_day: f64) -> Self {
        Self {
            time_of_day: time_of_day.rem_euclid(24.0),
            ..Self::default()
        }
    }

    /// Set the simulated date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Whether the simulated time falls in daylight hours.
    pub fn is_daytime(&self) -> bool {
        self.time_of_day >= 6.0 && self.time_of_day < 20.0
    }
}

impl Default for Ambiance {
    fn default() -> Self {
        Self {
            time_of_day: 12.0,
            date: None,
            shadows_enabled: false,
            use_realistic_sun: false,
        }
    }
}

/// Visibility and opacity of one widget layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerState {
    /// Host-side layer identifier
    pub layer_id: String,

    /// Whether the layer is shown
    pub visible: bool,

    /// Layer opacity in [0, 1], if the layer supports it
    pub opacity: Option<f64>,
}

impl LayerState {
    /// A visible layer at full opacity.
    pub fn visible(layer_id: impl Into<String>) -> Self {
        Self {
            layer_id: layer_id.into(),
            visible: true,
            opacity: None,
        }
    }

    /// A hidden layer.
    pub fn hidden(layer_id: impl Into<String>) -> Self {
        Self {
            layer_id: layer_id.into(),
            visible: false,
            opacity: None,
        }
    }

    /// Set the opacity (clamped to [0, 1]).
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiance_hour_wrapped() {
        assert_eq!(Ambiance::at_hour(25.5).time_of_day, 1.5);
        assert_eq!(Ambiance::at_hour(-2.0).time_of_day, 22.0);
    }

    #[test]
    fn test_ambiance_daytime() {
        assert!(Ambiance::at_hour(12.0).is_daytime());
        assert!(!Ambiance::at_hour(3.0).is_daytime());
        assert!(!Ambiance::at_hour(22.0).is_daytime());
    }

    #[test]
    fn test_layer_state_builders() {
        let layer = LayerState::visible("buildings").with_opacity(1.5);
        assert!(layer.visible);
        assert_eq!(layer.opacity, Some(1.0));

        let layer = LayerState::hidden("terrain");
        assert!(!layer.visible);
        assert!(layer.opacity.is_none());
    }
}
