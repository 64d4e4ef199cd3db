// The VRFieldOfView struct represents the projection bounds for one eye as
// raw tangents of the half angles from the optical axis to the four frustum
// edges. Values are carried exactly as the runtime reports them (OpenVR sign
// convention: left and top are negative).

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct VRFieldOfView {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for VRFieldOfView {
    fn default() -> VRFieldOfView {
        VRFieldOfView {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
        }
    }
}
