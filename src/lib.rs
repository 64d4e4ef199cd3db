//! HMD tracking and session lifecycle abstraction for VR runtimes.
//!
//! `VRSession` drives one binocular device: probe the runtime, connect with
//! rollback on partial failure, pull a pose and per-eye transforms every
//! frame, disconnect, shut down. Vendor runtimes sit behind the traits in
//! [`runtime`]; backends live under [`api`] and are selected by Cargo
//! features (`openvr` for the dynamically loaded SteamVR runtime, `mock`
//! for the deterministic test device).

macro_rules! identity_matrix {
    () => ([1.0, 0.0, 0.0, 0.0,  0.0, 1.0, 0.0, 0.0,  0.0, 0.0, 1.0, 0.0,  0.0, 0.0, 0.0, 1.0]);
}

#[macro_use]
extern crate log;

pub mod error;
pub mod math;
pub mod runtime;
pub mod session;
mod tracking;
mod utils;
pub mod vr_descriptor;
pub mod vr_eye;
pub mod vr_eye_transform;
pub mod vr_field_view;
pub mod vr_frame_data;
pub mod vr_pose;

pub use crate::error::{VRError, VRRuntimeError, VRSubsystem, VRTrackingLoss};
pub use crate::math::Matrix34;
pub use crate::runtime::{
    VRAdapterIdentity, VRApplicationType, VRCompositor, VRDeviceProperty, VRExtendedDisplay,
    VRRawPose, VRRuntime, VRSessionHandle, VRSystem, VRTrackingResult, HMD_DEVICE_INDEX,
    INVALID_DEVICE_INDEX, MAX_TRACKED_DEVICE_COUNT,
};
pub use crate::session::{VRSession, VRSessionState};
pub use crate::vr_descriptor::{VRDescriptor, VRSize, DEFAULT_NECK_OFFSET};
pub use crate::vr_eye::VREye;
pub use crate::vr_eye_transform::VREyeTransform;
pub use crate::vr_field_view::VRFieldOfView;
pub use crate::vr_frame_data::VRFrameData;
pub use crate::vr_pose::{VRPose, VRTrackingQuality};

pub mod api;
