use crate::vr_eye::VREye;
use crate::vr_eye_transform::VREyeTransform;
use crate::vr_pose::VRPose;

// Represents all the information needed to render a single stereo frame.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct VRFrameData {
    // Sample time in milliseconds, monotonically increasing within a session.
    pub timestamp: f64,

    // Predicted head pose for the frame about to be presented.
    pub pose: VRPose,

    // Per-eye world translation and projection, left first.
    pub eyes: [VREyeTransform; 2],
}

impl VRFrameData {
    #[inline]
    pub fn eye(&self, eye: VREye) -> &VREyeTransform {
        &self.eyes[eye.index()]
    }
}

impl Default for VRFrameData {
    fn default() -> VRFrameData {
        VRFrameData {
            timestamp: 0.0,
            pose: VRPose::default(),
            eyes: [VREyeTransform::default(); 2],
        }
    }
}
