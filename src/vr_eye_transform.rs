// World-space placement and projection for one eye. Recomputed from the head
// pose and the fixed eye offset on every tracking update; only meaningful for
// the frame it was computed in.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct VREyeTransform {
    // Eye position in world space: head position plus the rotated eye offset.
    pub translation: [f32; 3],

    // Column-major projection composed from the device FOV bounds and the
    // caller's near/far planes.
    pub projection: [f32; 16],
}

impl Default for VREyeTransform {
    fn default() -> VREyeTransform {
        VREyeTransform {
            translation: [0.0, 0.0, 0.0],
            projection: identity_matrix!(),
        }
    }
}
