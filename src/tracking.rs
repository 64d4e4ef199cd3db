//! Per-frame tracking: compositor pose wait, validity and quality gating,
//! eye transform composition. Continues the `VRSession` impl.

use crate::error::{VRError, VRTrackingLoss};
use crate::math;
use crate::runtime::{VRRawPose, MAX_TRACKED_DEVICE_COUNT};
use crate::session::{VRSession, VRSessionState};
use crate::utils;
use crate::vr_eye::VREye;
use crate::vr_eye_transform::VREyeTransform;
use crate::vr_frame_data::VRFrameData;
use crate::vr_pose::{VRPose, VRTrackingQuality};

impl VRSession {
    /// Produces the head pose and both eye transforms for the upcoming
    /// frame. Blocks briefly on the compositor's pose prediction, the
    /// single bounded suspension point of the frame loop.
    ///
    /// Failures are per-frame transients: hold the previous frame's data or
    /// skip stereo output, then call again next frame. The runtime is never
    /// touched unless the session is connected.
    pub fn update_tracking(&mut self, near_z: f32, far_z: f32) -> Result<VRFrameData, VRError> {
        if self.state != VRSessionState::Connected {
            warn!("update_tracking() called while not connected");
            return Err(VRError::Misuse(
                "update_tracking() requires a connected session",
            ));
        }
        let compositor = match &self.compositor {
            Some(compositor) => compositor,
            None => return Err(VRError::Misuse("connected session lost its compositor")),
        };
        let descriptor = match &self.descriptor {
            Some(descriptor) => descriptor,
            None => return Err(VRError::Misuse("connected session lost its descriptor")),
        };

        let mut poses = [VRRawPose::default(); MAX_TRACKED_DEVICE_COUNT];
        if let Err(err) = compositor.wait_get_poses(&mut poses) {
            warn!(
                "compositor pose wait failed: {} (code {})",
                err.description, err.code
            );
            return Err(VRError::TrackingUnavailable(VRTrackingLoss::Compositor(
                err.code,
            )));
        }

        let raw = &poses[self.hmd_index as usize];
        if !raw.pose_is_valid {
            // Expected transient: skip the frame, don't warn.
            debug!("head pose invalid, frame skipped");
            return Err(VRError::TrackingUnavailable(VRTrackingLoss::PoseInvalid));
        }

        // Quality is a confidence signal, never a filter: degraded poses are
        // still extrapolated by the runtime and returned to the caller.
        let quality = raw.tracking_result.quality();
        if quality != VRTrackingQuality::Normal {
            debug!("tracking degraded: {:?}", raw.tracking_result);
        }

        let position = math::matrix_to_translation(&raw.device_to_absolute);
        let orientation = math::matrix_to_quaternion(&raw.device_to_absolute);
        let pose = VRPose {
            position,
            orientation,
            linear_velocity: raw.linear_velocity,
            angular_velocity: raw.angular_velocity,
            is_valid: true,
            quality,
        };

        let mut eyes = [VREyeTransform::default(); 2];
        for eye in &VREye::BOTH {
            let index = eye.index();
            // Rotating the fixed offset by the head quaternion replaces the
            // full head-matrix by eye-matrix multiply.
            let offset = math::rotate_vector_by_quaternion(&orientation, &self.eye_offsets[index]);
            eyes[index] = VREyeTransform {
                translation: [
                    position[0] + offset[0],
                    position[1] + offset[1],
                    position[2] + offset[2],
                ],
                projection: math::projection_from_raw(&descriptor.eye_fov[index], near_z, far_z),
            };
        }

        Ok(VRFrameData {
            timestamp: utils::timestamp(),
            pose,
            eyes,
        })
    }

    /// Controller pose and button polling. No runtime backend implements
    /// input yet, so this succeeds with no side effects; the contract exists
    /// so callers can wire it unconditionally.
    pub fn update_input(&mut self) -> Result<(), VRError> {
        Ok(())
    }

    /// Asks the runtime to re-zero the seated reference pose. Fire and
    /// forget; effective starting with the next `update_tracking()`.
    pub fn recenter(&mut self) {
        if let Some(system) = &self.system {
            system.reset_seated_zero_pose();
            debug!("recenter requested");
        }
    }
}
