use crate::math::{self, Matrix34};
use crate::runtime::{VRRawPose, VRTrackingResult};
use crate::vr_field_view::VRFieldOfView;

/// Scriptable device state shared between a `MockRuntime` and the test
/// driving it. Defaults simulate a virtual HTC Vive.
pub struct MockDeviceState {
    /// Answer given to the presence probe.
    pub hmd_present: bool,

    // Failure switches, one per acquisition step.
    pub fail_init_session: bool,
    pub fail_system: bool,
    pub fail_adapter: bool,
    pub fail_compositor: bool,
    pub fail_extended_display: bool,

    /// When set, every pose wait fails with this code.
    pub compositor_error: Option<u32>,

    // Call counters observed by tests.
    pub init_session_calls: u32,
    pub shutdown_calls: u32,
    pub wait_calls: u32,
    pub recenter_calls: u32,
    pub released: bool,

    // Device geometry.
    pub render_size: (u32, u32),
    pub eye_fov: [VRFieldOfView; 2],
    pub eye_to_head: [Option<Matrix34>; 2],
    pub display_frequency: Option<f32>,
    pub neck_to_eye: Option<f32>,
    pub window_bounds: (i32, i32, u32, u32),
    pub manufacturer: String,
    pub model: String,
    pub adapter_index: i32,

    /// Head sample handed out by every pose wait.
    pub hmd_pose: VRRawPose,
}

impl Default for MockDeviceState {
    fn default() -> MockDeviceState {
        MockDeviceState {
            hmd_present: true,
            fail_init_session: false,
            fail_system: false,
            fail_adapter: false,
            fail_compositor: false,
            fail_extended_display: false,
            compositor_error: None,
            init_session_calls: 0,
            shutdown_calls: 0,
            wait_calls: 0,
            recenter_calls: 0,
            released: false,
            render_size: (1512, 1680),
            eye_fov: [
                VRFieldOfView {
                    left: -1.39666,
                    right: 1.23994,
                    top: -1.47113,
                    bottom: 1.45802,
                },
                VRFieldOfView {
                    left: -1.23994,
                    right: 1.39666,
                    top: -1.47113,
                    bottom: 1.45802,
                },
            ],
            eye_to_head: [
                Some(translation_matrix([-0.035949998, 0.0, -0.015])),
                Some(translation_matrix([0.035949998, 0.0, -0.015])),
            ],
            display_frequency: Some(90.0),
            neck_to_eye: None,
            window_bounds: (0, 0, 2160, 1200),
            manufacturer: "Mock".into(),
            model: "VRDisplay".into(),
            adapter_index: 0,
            hmd_pose: VRRawPose {
                device_to_absolute: [
                    [1.0, 0.0, 0.0, 0.0],
                    [0.0, 1.0, 0.0, 1.6],
                    [0.0, 0.0, 1.0, 0.0],
                ],
                linear_velocity: [0.0, 0.0, 0.0],
                angular_velocity: [0.0, 0.0, 0.0],
                tracking_result: VRTrackingResult::RunningOk,
                pose_is_valid: true,
                device_is_connected: true,
            },
        }
    }
}

impl MockDeviceState {
    /// Repositions the head without touching validity or velocities.
    pub fn set_head_pose(&mut self, position: [f32; 3], orientation: [f32; 4]) {
        let mut m = math::quaternion_to_matrix(&orientation);
        m[0][3] = position[0];
        m[1][3] = position[1];
        m[2][3] = position[2];
        self.hmd_pose.device_to_absolute = m;
    }

    /// Replaces both eye transforms with pure translations.
    pub fn set_eye_offsets(&mut self, left: [f32; 3], right: [f32; 3]) {
        self.eye_to_head = [
            Some(translation_matrix(left)),
            Some(translation_matrix(right)),
        ];
    }

    pub fn set_pose_valid(&mut self, valid: bool) {
        self.hmd_pose.pose_is_valid = valid;
    }

    pub fn set_tracking_result(&mut self, result: VRTrackingResult) {
        self.hmd_pose.tracking_result = result;
    }
}

fn translation_matrix(t: [f32; 3]) -> Matrix34 {
    [
        [1.0, 0.0, 0.0, t[0]],
        [0.0, 1.0, 0.0, t[1]],
        [0.0, 0.0, 1.0, t[2]],
    ]
}
