// Safe wrappers over the OpenVR function tables. Each wrapper holds a raw
// table pointer owned by the runtime process; pointers stay valid until
// VR_ShutdownInternal, which the session controller orders after dropping
// these wrappers.

use std::os::raw::c_char;
use std::{mem, ptr, slice, str};

use super::binding as openvr;
use super::binding::*;

use crate::error::VRRuntimeError;
use crate::math::Matrix34;
use crate::runtime::{
    VRAdapterIdentity, VRCompositor, VRDeviceProperty, VRExtendedDisplay, VRRawPose, VRSystem,
    VRTrackingResult,
};
use crate::vr_eye::VREye;
use crate::vr_field_view::VRFieldOfView;

pub struct OpenVRSystem {
    system: *mut openvr::VR_IVRSystem_FnTable,
}

unsafe impl Send for OpenVRSystem {}
unsafe impl Sync for OpenVRSystem {}

impl OpenVRSystem {
    pub(super) fn new(system: *mut openvr::VR_IVRSystem_FnTable) -> OpenVRSystem {
        OpenVRSystem { system }
    }

    fn float_property_raw(&self, name: openvr::ETrackedDeviceProperty) -> Option<f32> {
        let mut error = ETrackedPropertyError_TrackedProp_Success;
        let result = unsafe {
            (*self.system).GetFloatTrackedDeviceProperty.unwrap()(
                openvr::k_unTrackedDeviceIndex_Hmd,
                name,
                &mut error,
            )
        };
        if error == ETrackedPropertyError_TrackedProp_Success {
            Some(result)
        } else {
            None
        }
    }

    fn string_property_raw(&self, name: openvr::ETrackedDeviceProperty) -> String {
        let mut buffer = [0 as c_char; 256];
        let mut error = ETrackedPropertyError_TrackedProp_Success;
        let size = unsafe {
            (*self.system).GetStringTrackedDeviceProperty.unwrap()(
                openvr::k_unTrackedDeviceIndex_Hmd,
                name,
                buffer.as_mut_ptr(),
                buffer.len() as u32,
                &mut error,
            )
        };
        if size > 0 && error == ETrackedPropertyError_TrackedProp_Success {
            // The reported size counts the trailing NUL.
            let bytes =
                unsafe { slice::from_raw_parts(buffer.as_ptr() as *const u8, size as usize - 1) };
            str::from_utf8(bytes).unwrap_or("").to_string()
        } else {
            String::new()
        }
    }
}

impl VRSystem for OpenVRSystem {
    fn recommended_render_target_size(&self) -> (u32, u32) {
        let (mut width, mut height) = (0, 0);
        unsafe {
            (*self.system).GetRecommendedRenderTargetSize.unwrap()(&mut width, &mut height);
        }
        (width, height)
    }

    fn projection_raw(&self, eye: VREye) -> VRFieldOfView {
        let (mut left, mut right, mut top, mut bottom) = (0.0, 0.0, 0.0, 0.0);
        unsafe {
            (*self.system).GetProjectionRaw.unwrap()(
                eye_to_openvr(eye),
                &mut left,
                &mut right,
                &mut top,
                &mut bottom,
            );
        }
        VRFieldOfView {
            left,
            right,
            top,
            bottom,
        }
    }

    fn eye_to_head_transform(&self, eye: VREye) -> Option<Matrix34> {
        let matrix = unsafe { (*self.system).GetEyeToHeadTransform.unwrap()(eye_to_openvr(eye)) };
        Some(matrix.m)
    }

    fn adapter_identity(&self) -> Result<VRAdapterIdentity, VRRuntimeError> {
        // -1 leaves the adapter choice to the render backend; the runtime
        // only narrows it on D3D hosts.
        let mut index = -1;
        unsafe {
            (*self.system).GetDXGIOutputInfo.unwrap()(&mut index);
        }
        Ok(VRAdapterIdentity { index })
    }

    fn float_property(&self, property: VRDeviceProperty) -> Option<f32> {
        match property {
            VRDeviceProperty::DisplayFrequency => {
                self.float_property_raw(ETrackedDeviceProperty_Prop_DisplayFrequency_Float)
            }
            // OpenVR exposes no neck model property; the descriptor falls
            // back to its documented constant.
            VRDeviceProperty::NeckToEyeDistance => None,
            VRDeviceProperty::ManufacturerName | VRDeviceProperty::ModelNumber => None,
        }
    }

    fn string_property(&self, property: VRDeviceProperty) -> Option<String> {
        let name = match property {
            VRDeviceProperty::ManufacturerName => {
                ETrackedDeviceProperty_Prop_ManufacturerName_String
            }
            VRDeviceProperty::ModelNumber => ETrackedDeviceProperty_Prop_ModelNumber_String,
            VRDeviceProperty::DisplayFrequency | VRDeviceProperty::NeckToEyeDistance => {
                return None;
            }
        };
        let value = self.string_property_raw(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn reset_seated_zero_pose(&self) {
        unsafe {
            (*self.system).ResetSeatedZeroPose.unwrap()();
        }
    }
}

pub struct OpenVRCompositor {
    compositor: *mut openvr::VR_IVRCompositor_FnTable,
}

unsafe impl Send for OpenVRCompositor {}
unsafe impl Sync for OpenVRCompositor {}

impl OpenVRCompositor {
    pub(super) fn new(compositor: *mut openvr::VR_IVRCompositor_FnTable) -> OpenVRCompositor {
        OpenVRCompositor { compositor }
    }
}

impl VRCompositor for OpenVRCompositor {
    fn wait_get_poses(&self, poses: &mut [VRRawPose]) -> Result<(), VRRuntimeError> {
        // All-zero TrackedDevicePose_t is a valid "nothing tracked" sample.
        let mut raw: [openvr::TrackedDevicePose_t; openvr::k_unMaxTrackedDeviceCount] =
            unsafe { mem::zeroed() };
        let error = unsafe {
            (*self.compositor).WaitGetPoses.unwrap()(
                raw.as_mut_ptr(),
                raw.len() as u32,
                ptr::null_mut(),
                0,
            )
        };
        if error != EVRCompositorError_VRCompositorError_None {
            return Err(VRRuntimeError {
                code: error as u32,
                description: "WaitGetPoses failed".into(),
            });
        }
        let count = poses.len().min(raw.len());
        for (out, sample) in poses[..count].iter_mut().zip(raw[..count].iter()) {
            *out = convert_pose(sample);
        }
        Ok(())
    }
}

pub struct OpenVRExtendedDisplay {
    display: *mut openvr::VR_IVRExtendedDisplay_FnTable,
}

unsafe impl Send for OpenVRExtendedDisplay {}
unsafe impl Sync for OpenVRExtendedDisplay {}

impl OpenVRExtendedDisplay {
    pub(super) fn new(
        display: *mut openvr::VR_IVRExtendedDisplay_FnTable,
    ) -> OpenVRExtendedDisplay {
        OpenVRExtendedDisplay { display }
    }
}

impl VRExtendedDisplay for OpenVRExtendedDisplay {
    fn window_bounds(&self) -> (i32, i32, u32, u32) {
        let (mut x, mut y) = (0, 0);
        let (mut width, mut height) = (0, 0);
        unsafe {
            (*self.display).GetWindowBounds.unwrap()(&mut x, &mut y, &mut width, &mut height);
        }
        (x, y, width, height)
    }
}

fn eye_to_openvr(eye: VREye) -> openvr::EVREye {
    match eye {
        VREye::Left => EVREye_Eye_Left,
        VREye::Right => EVREye_Eye_Right,
    }
}

fn convert_pose(pose: &openvr::TrackedDevicePose_t) -> VRRawPose {
    VRRawPose {
        device_to_absolute: pose.mDeviceToAbsoluteTracking.m,
        linear_velocity: pose.vVelocity.v,
        angular_velocity: pose.vAngularVelocity.v,
        tracking_result: convert_tracking_result(pose.eTrackingResult),
        pose_is_valid: pose.bPoseIsValid,
        device_is_connected: pose.bDeviceIsConnected,
    }
}

fn convert_tracking_result(result: openvr::ETrackingResult) -> VRTrackingResult {
    match result {
        ETrackingResult_TrackingResult_Running_OK => VRTrackingResult::RunningOk,
        ETrackingResult_TrackingResult_Running_OutOfRange => VRTrackingResult::RunningOutOfRange,
        ETrackingResult_TrackingResult_Calibrating_InProgress => {
            VRTrackingResult::CalibratingInProgress
        }
        ETrackingResult_TrackingResult_Calibrating_OutOfRange => {
            VRTrackingResult::CalibratingOutOfRange
        }
        _ => VRTrackingResult::Uninitialized,
    }
}
