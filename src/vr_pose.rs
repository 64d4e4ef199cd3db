// The VRPose struct represents the tracked head state for one frame.
// Samples are owned by the render loop per frame and never cached across
// frames by this crate.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct VRPose {
    // Position of the device in world units.
    pub position: [f32; 3],

    // Orientation of the device as a unit quaternion, [x, y, z, w].
    pub orientation: [f32; 4],

    // Linear velocity in units per second. Zero when the runtime omits it.
    pub linear_velocity: [f32; 3],

    // Angular velocity in radians per second. Zero when the runtime omits it.
    pub angular_velocity: [f32; 3],

    // False until a tracking update actually produced this sample.
    pub is_valid: bool,

    // Confidence signal. Degraded poses are still extrapolated by the
    // runtime and usable for smooth fallback; filtering is a caller policy.
    pub quality: VRTrackingQuality,
}

impl Default for VRPose {
    fn default() -> VRPose {
        VRPose {
            position: [0.0, 0.0, 0.0],
            orientation: [0.0, 0.0, 0.0, 1.0],
            linear_velocity: [0.0, 0.0, 0.0],
            angular_velocity: [0.0, 0.0, 0.0],
            is_valid: false,
            quality: VRTrackingQuality::Lost,
        }
    }
}

// Normalized tracking confidence reported alongside each pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub enum VRTrackingQuality {
    Normal,
    Degraded,
    Lost,
}
