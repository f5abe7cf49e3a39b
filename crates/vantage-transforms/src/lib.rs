//! vantage-transforms - Master-to-slave value adapters
//!
//! When one widget follows another on a sync channel, the follower rarely
//! wants the master's value verbatim: a side-by-side comparison map wants a
//! translated center, an overview wants a scaled zoom, an opposing 3D view
//! wants a rotated camera. A transform adapts the master's property value
//! for the slave's context.
//!
//! # Contract
//!
//! `apply` takes the master value by shared reference and must never mutate
//! it; callers keep reading the original after the call, and transforms are
//! composable in sequence because of it. A transform may keep internal
//! state (`&mut self`) to track motion deltas, as [`Camera3D`] does in
//! mirror mode. Value shapes a transform does not understand pass through
//! unchanged.

pub mod camera3d;
pub mod simple;

pub use camera3d::Camera3D;
pub use simple::{Axis, Identity, Mirror, Offset2D, Scale};

use vantage_core::PropertyValue;

/// A pure master-value to slave-value mapping.
pub trait Transform {
    /// Map the master's value to the slave's value. The input is never
    /// mutated.
    fn apply(&mut self, value: &PropertyValue) -> PropertyValue;

    /// Short name for logging and status displays.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::CameraPose;

    /// Every transform leaves its input untouched.
    #[test]
    fn test_transforms_do_not_mutate_input() {
        let pose = CameraPose::new([2.3522, 48.8566], 15.0, 45.0, 30.0);
        let inputs = [
            PropertyValue::Camera(pose),
            PropertyValue::Point([10.0, 20.0]),
            PropertyValue::Number(7.5),
            PropertyValue::Text("mode-a".to_string()),
        ];

        let mut transforms: Vec<Box<dyn Transform>> = vec![
            Box::new(Identity),
            Box::new(Offset2D::new(0.01, -0.02)),
            Box::new(Scale::new(2.0, 1.0)),
            Box::new(Mirror::new(Axis::X, 0.0)),
            Box::new(Camera3D::new(2.0, 15.0, 180.0)),
        ];

        for transform in &mut transforms {
            for input in &inputs {
                let before = input.clone();
                let _ = transform.apply(input);
                assert_eq!(*input, before, "{} mutated its input", transform.name());
            }
        }
    }
}
