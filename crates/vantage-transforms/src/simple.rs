//! Planar and scalar transforms
//!
//! Identity, fixed 2D offsets, affine scaling, and axis reflection. These
//! are stateless; everything they need is in their parameters.

use serde::{Deserialize, Serialize};
use vantage_core::PropertyValue;

use crate::Transform;

/// Passes the master value through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transform for Identity {
    fn apply(&mut self, value: &PropertyValue) -> PropertyValue {
        value.clone()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Translates a 2D center by a fixed offset.
///
/// Applies to `Point` values and to `Camera` centers; everything else
/// passes through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset2D {
    /// Offset along x / longitude, in the value's own units
    pub dx: f64,

    /// Offset along y / latitude
    pub dy: f64,
}

impl Offset2D {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl Transform for Offset2D {
    fn apply(&mut self, value: &PropertyValue) -> PropertyValue {
        match value {
            PropertyValue::Point([x, y]) => PropertyValue::Point([x + self.dx, y + self.dy]),
            PropertyValue::Camera(pose) => {
                let mut pose = pose.clone();
                pose.center[0] += self.dx;
                pose.center[1] += self.dy;
                PropertyValue::Camera(pose)
            }
            other => other.clone(),
        }
    }

    fn name(&self) -> &'static str {
        "offset2d"
    }
}

/// Affine scaling of a scalar: `out = in * scale + offset`.
///
/// Used for numeric properties such as slide indices or zoom levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub scale: f64,
    pub offset: f64,
}

impl Scale {
    pub fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }
}

impl Transform for Scale {
    fn apply(&mut self, value: &PropertyValue) -> PropertyValue {
        match value {
            PropertyValue::Number(n) => PropertyValue::Number(n * self.scale + self.offset),
            other => other.clone(),
        }
    }

    fn name(&self) -> &'static str {
        "scale"
    }
}

/// Reflection axis for [`Mirror`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// Reflects a coordinate about `center` along `axis`: `out = 2*center - in`.
///
/// Numbers reflect regardless of axis. For `Point` and `Camera` values only
/// the matching coordinate reflects; a camera's bearing flips with it so
/// the mirrored view keeps facing the scene (`360 - bearing` for X,
/// `180 - bearing` for Y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub axis: Axis,
    pub center: f64,
}

impl Mirror {
    pub fn new(axis: Axis, center: f64) -> Self {
        Self { axis, center }
    }

    fn reflect(&self, v: f64) -> f64 {
        2.0 * self.center - v
    }
}

impl Transform for Mirror {
    fn apply(&mut self, value: &PropertyValue) -> PropertyValue {
        match value {
            PropertyValue::Number(n) => PropertyValue::Number(self.reflect(*n)),
            PropertyValue::Point([x, y]) => match self.axis {
                Axis::X => PropertyValue::Point([self.reflect(*x), *y]),
                Axis::Y => PropertyValue::Point([*x, self.reflect(*y)]),
            },
            PropertyValue::Camera(pose) => {
                let mut pose = pose.clone();
                match self.axis {
                    Axis::X => {
                        pose.center[0] = self.reflect(pose.center[0]);
                        pose.bearing = 360.0 - pose.bearing;
                    }
                    Axis::Y => {
                        pose.center[1] = self.reflect(pose.center[1]);
                        pose.bearing = 180.0 - pose.bearing;
                    }
                }
                PropertyValue::Camera(pose.normalized())
            }
            other => other.clone(),
        }
    }

    fn name(&self) -> &'static str {
        "mirror"
    }
}
