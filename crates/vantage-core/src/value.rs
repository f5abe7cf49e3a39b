//! Property values exchanged between widgets
//!
//! A sync property carries one of a closed set of value shapes. The JSON
//! codec is lossless: `from_json(to_json(v))` reproduces `v` for every
//! variant, which the sync layer relies on for both the broadcast wire
//! format and the persisted channel row.

use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;

/// A value carried by a sync property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// A full map camera pose
    Camera(CameraPose),

    /// A 2D point as [x, y] (viewport centers, cursors)
    Point([f64; 2]),

    /// A scalar (slide index, opacity, zoom)
    Number(f64),

    /// A string (URL, display mode, selected id)
    Text(String),

    /// A flag (layer toggle, playing state)
    Bool(bool),

    /// Escape hatch for host-defined shapes
    Json(serde_json::Value),
}

impl PropertyValue {
    /// Serialize to the wire/persistence JSON form.
    pub fn to_json(&self) -> serde_json::Value {
        // Serialization of this enum cannot fail: every variant is a
        // plain data shape.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Deserialize from the wire/persistence JSON form.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// The numeric payload, if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The camera payload, if this is a `Camera`.
    pub fn as_camera(&self) -> Option<&CameraPose> {
        match self {
            PropertyValue::Camera(pose) => Some(pose),
            _ => None,
        }
    }

    /// Short name of the variant, for logging and status displays.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Camera(_) => "camera",
            PropertyValue::Point(_) => "point",
            PropertyValue::Number(_) => "number",
            PropertyValue::Text(_) => "text",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Json(_) => "json",
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<CameraPose> for PropertyValue {
    fn from(pose: CameraPose) -> Self {
        PropertyValue::Camera(pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn representative_values() -> Vec<PropertyValue> {
        vec![
            PropertyValue::Camera(CameraPose::new([2.3522, 48.8566], 15.5, 60.0, 45.0)),
            PropertyValue::Point([100.5, -20.25]),
            PropertyValue::Number(42.0),
            PropertyValue::Text("https://example.com/doc#page=3".to_string()),
            PropertyValue::Bool(true),
            PropertyValue::Json(serde_json::json!({"ids": [1, 2, 3], "mode": "split"})),
        ]
    }

    #[test]
    fn test_json_codec_identity() {
        for value in representative_values() {
            let json = value.to_json();
            let back = PropertyValue::from_json(&json).expect("codec must round-trip");
            assert_eq!(value, back);
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let garbage = serde_json::json!({"type": "warp_drive", "value": 9});
        assert!(PropertyValue::from_json(&garbage).is_none());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(PropertyValue::Number(7.0).as_number(), Some(7.0));
        assert_eq!(PropertyValue::Bool(true).as_number(), None);

        let pose = CameraPose::default();
        let value = PropertyValue::from(pose.clone());
        assert_eq!(value.as_camera(), Some(&pose));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(PropertyValue::from(1.0).kind(), "number");
        assert_eq!(PropertyValue::from("x").kind(), "text");
    }
}
