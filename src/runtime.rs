//! Trait seam between the session controller and a vendor tracking runtime.
//! Backends implement these traits; the controller never touches a vendor
//! ABI directly.

use std::sync::Arc;

use crate::error::VRRuntimeError;
use crate::math::Matrix34;
use crate::vr_eye::VREye;
use crate::vr_field_view::VRFieldOfView;
use crate::vr_pose::VRTrackingQuality;

// Upper bound on devices a runtime reports in one pose batch.
pub const MAX_TRACKED_DEVICE_COUNT: usize = 16;

// Device slot the head-mounted display always occupies.
pub const HMD_DEVICE_INDEX: u32 = 0;

// Sentinel for "no device cached in this slot".
pub const INVALID_DEVICE_INDEX: u32 = u32::MAX;

/// How the runtime should schedule this process relative to others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRApplicationType {
    /// A 3D application rendering to the device.
    Scene,
    /// An overlay drawn on top of another scene application.
    Overlay,
    /// Tracking access without rendering.
    Background,
}

/// Opaque token identifying an initialized runtime session. The embedding
/// process and this crate may hold the same token; whoever performed the
/// init owns the shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VRSessionHandle(pub u32);

/// Graphics adapter the runtime wants frames rendered on. D3D adapter
/// numbering; -1 means unknown, letting the render backend pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VRAdapterIdentity {
    pub index: i32,
}

impl VRAdapterIdentity {
    pub const INVALID: VRAdapterIdentity = VRAdapterIdentity { index: -1 };

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.index >= 0
    }
}

/// Device properties the descriptor builder may query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRDeviceProperty {
    /// Display refresh rate in Hz.
    DisplayFrequency,
    /// Head-origin-to-eye distance in meters for the neck model.
    NeckToEyeDistance,
    ManufacturerName,
    ModelNumber,
}

/// Per-device tracking sample exactly as the runtime produced it, before
/// any conversion to the crate's pose types.
#[derive(Debug, Clone, Copy)]
pub struct VRRawPose {
    pub device_to_absolute: Matrix34,
    pub linear_velocity: [f32; 3],
    pub angular_velocity: [f32; 3],
    pub tracking_result: VRTrackingResult,
    pub pose_is_valid: bool,
    pub device_is_connected: bool,
}

impl Default for VRRawPose {
    fn default() -> VRRawPose {
        VRRawPose {
            device_to_absolute: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
            linear_velocity: [0.0, 0.0, 0.0],
            angular_velocity: [0.0, 0.0, 0.0],
            tracking_result: VRTrackingResult::Uninitialized,
            pose_is_valid: false,
            device_is_connected: false,
        }
    }
}

/// Raw tracking states mirrored from the vendor runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRTrackingResult {
    Uninitialized,
    CalibratingInProgress,
    CalibratingOutOfRange,
    RunningOk,
    RunningOutOfRange,
}

impl VRTrackingResult {
    /// Collapses the vendor states into the three-level confidence signal.
    pub fn quality(self) -> VRTrackingQuality {
        match self {
            VRTrackingResult::RunningOk => VRTrackingQuality::Normal,
            VRTrackingResult::RunningOutOfRange
            | VRTrackingResult::CalibratingInProgress
            | VRTrackingResult::CalibratingOutOfRange => VRTrackingQuality::Degraded,
            VRTrackingResult::Uninitialized => VRTrackingQuality::Lost,
        }
    }
}

/// A vendor tracking runtime. `VRSession` drives the whole lifecycle through
/// this trait; implementations own symbol resolution and the vendor ABI.
pub trait VRRuntime: Send {
    /// Whether the runtime is installed and a device is reachable. Pure
    /// query, safe to call repeatedly.
    fn is_runtime_present(&mut self) -> bool;

    /// Starts a runtime session. The caller tracks ownership and never
    /// double-initializes.
    fn init_session(
        &mut self,
        app_type: VRApplicationType,
    ) -> Result<VRSessionHandle, VRRuntimeError>;

    /// Ends the session previously started by `init_session`.
    fn shutdown_session(&mut self);

    /// System interface: device geometry, properties, recenter requests.
    fn system(&mut self) -> Result<Arc<dyn VRSystem>, VRRuntimeError>;

    /// Compositor interface: per-frame pose synchronization.
    fn compositor(&mut self) -> Result<Arc<dyn VRCompositor>, VRRuntimeError>;

    /// Extended display interface: desktop placement of the device panel.
    fn extended_display(&mut self) -> Result<Arc<dyn VRExtendedDisplay>, VRRuntimeError>;

    /// Drops the loader handle. The runtime may be probed again afterwards
    /// with `is_runtime_present`.
    fn release(&mut self);
}

/// Device geometry and property queries. Valid while a session is active.
pub trait VRSystem: Send + Sync {
    /// Recommended render target size for one eye, in pixels.
    fn recommended_render_target_size(&self) -> (u32, u32);

    /// Raw projection bounds for one eye.
    fn projection_raw(&self, eye: VREye) -> VRFieldOfView;

    /// Rigid transform from eye space to head space, when the device
    /// provides one.
    fn eye_to_head_transform(&self, eye: VREye) -> Option<Matrix34>;

    /// Graphics adapter the render backend should create its device on.
    fn adapter_identity(&self) -> Result<VRAdapterIdentity, VRRuntimeError>;

    fn float_property(&self, property: VRDeviceProperty) -> Option<f32>;

    fn string_property(&self, property: VRDeviceProperty) -> Option<String>;

    /// Re-zeroes the seated reference pose. Effective from the next pose
    /// wait.
    fn reset_seated_zero_pose(&self);
}

/// Pose synchronization with the runtime compositor.
pub trait VRCompositor: Send + Sync {
    /// Blocks until the runtime predicts poses for the upcoming frame, then
    /// fills `poses` in device-index order (head at `HMD_DEVICE_INDEX`).
    /// The wait is bounded by one frame interval.
    fn wait_get_poses(&self, poses: &mut [VRRawPose]) -> Result<(), VRRuntimeError>;
}

/// Desktop placement of the device panel, when extended mode is active.
pub trait VRExtendedDisplay: Send + Sync {
    /// `(x, y, width, height)` of the panel window; zero size when the
    /// runtime is in direct mode.
    fn window_bounds(&self) -> (i32, i32, u32, u32);
}
