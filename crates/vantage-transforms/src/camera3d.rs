//! 3D camera transform
//!
//! Maps a master camera pose to a slave pose offset by an azimuth/elevation
//! rotation, a distance scale, and metric displacements. A negative
//! rotation parameter switches that component into mirror mode: the slave
//! then moves opposite to the master's motion, which requires tracking the
//! previous master pose rather than mapping each absolute pose.

use serde::{Deserialize, Serialize};
use vantage_core::{CameraPose, PropertyValue};

use crate::Transform;

/// Meters per degree of latitude (spherical approximation).
const METERS_PER_DEG_LAT: f64 = 110_540.0;

/// Meters per degree of longitude at the equator.
const METERS_PER_DEG_LNG: f64 = 111_320.0;

/// Maximum slave pitch in degrees.
const MAX_PITCH: f64 = 85.0;

/// Master-to-slave 3D camera mapping.
///
/// `distance_scale` multiplies the viewing distance (a scale of 2 backs the
/// slave off by one zoom level). `elevation_deg` and `azimuth_deg` rotate
/// the slave's view relative to the master's; negative values engage mirror
/// mode for that component. The metric offsets displace the slave's center
/// east/north, and `offset_up_m` trades altitude against zoom (one level
/// per kilometer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera3D {
    pub distance_scale: f64,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub offset_east_m: f64,
    pub offset_north_m: f64,
    pub offset_up_m: f64,

    #[serde(skip)]
    last_master: Option<CameraPose>,

    #[serde(skip)]
    last_output: Option<CameraPose>,
}

impl Camera3D {
    /// Create a transform with rotation and scale; offsets default to zero.
    pub fn new(distance_scale: f64, elevation_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            distance_scale,
            elevation_deg,
            azimuth_deg,
            offset_east_m: 0.0,
            offset_north_m: 0.0,
            offset_up_m: 0.0,
            last_master: None,
            last_output: None,
        }
    }

    /// Set the metric displacements.
    pub fn with_offsets(mut self, east_m: f64, north_m: f64, up_m: f64) -> Self {
        self.offset_east_m = east_m;
        self.offset_north_m = north_m;
        self.offset_up_m = up_m;
        self
    }

    /// Whether any component runs in mirror mode.
    pub fn mirrors(&self) -> bool {
        self.elevation_deg < 0.0 || self.azimuth_deg < 0.0
    }

    /// Forget tracked motion state (on disconnect or channel change).
    pub fn reset(&mut self) {
        self.last_master = None;
        self.last_output = None;
    }

    /// Absolute mapping used outside mirror mode and for the first pose.
    fn apply_static(&self, pose: &CameraPose) -> CameraPose {
        let lat_rad = pose.lat().to_radians();
        let meters_per_deg_lng = (METERS_PER_DEG_LNG * lat_rad.cos()).max(1.0);

        let scale = if self.distance_scale > 0.0 {
            self.distance_scale
        } else {
            1.0
        };

        CameraPose {
            center: [
                pose.lng() + self.offset_east_m / meters_per_deg_lng,
                pose.lat() + self.offset_north_m / METERS_PER_DEG_LAT,
            ],
            zoom: (pose.zoom - scale.log2() - self.offset_up_m / 1000.0).max(0.0),
            pitch: (pose.pitch + self.elevation_deg.abs()).clamp(0.0, MAX_PITCH),
            bearing: pose.bearing + self.azimuth_deg.abs(),
        }
        .normalized()
    }

    /// Delta mapping for mirror mode: motion of mirrored components runs
    /// opposite to the master's.
    fn apply_delta(&self, pose: &CameraPose, last_master: &CameraPose, last_output: &CameraPose) -> CameraPose {
        let d_bearing = pose.bearing - last_master.bearing;
        let d_pitch = pose.pitch - last_master.pitch;

        let bearing_step = if self.azimuth_deg < 0.0 { -d_bearing } else { d_bearing };
        let pitch_step = if self.elevation_deg < 0.0 { -d_pitch } else { d_pitch };

        CameraPose {
            center: [
                last_output.lng() + (pose.lng() - last_master.lng()),
                last_output.lat() + (pose.lat() - last_master.lat()),
            ],
            zoom: (last_output.zoom + (pose.zoom - last_master.zoom)).max(0.0),
            pitch: (last_output.pitch + pitch_step).clamp(0.0, MAX_PITCH),
            bearing: last_output.bearing + bearing_step,
        }
        .normalized()
    }
}

impl Transform for Camera3D {
    fn apply(&mut self, value: &PropertyValue) -> PropertyValue {
        let pose = match value {
            PropertyValue::Camera(pose) => pose,
            other => return other.clone(),
        };

        let output = if self.mirrors() {
            match (&self.last_master, &self.last_output) {
                (Some(last_master), Some(last_output)) => {
                    self.apply_delta(pose, last_master, last_output)
                }
                _ => self.apply_static(pose),
            }
        } else {
            self.apply_static(pose)
        };

        self.last_master = Some(pose.clone());
        self.last_output = Some(output.clone());
        PropertyValue::Camera(output)
    }

    fn name(&self) -> &'static str {
        "camera3d"
    }
}
