use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::state::MockDeviceState;
use crate::error::VRRuntimeError;
use crate::math::Matrix34;
use crate::runtime::{
    VRAdapterIdentity, VRApplicationType, VRCompositor, VRDeviceProperty, VRExtendedDisplay,
    VRRawPose, VRRuntime, VRSessionHandle, VRSystem,
};
use crate::vr_eye::VREye;
use crate::vr_field_view::VRFieldOfView;

pub type MockStateHandle = Arc<Mutex<MockDeviceState>>;

/// Scripted in-process runtime. Every interface it hands out shares one
/// `MockDeviceState`; tests keep a handle and flip switches mid-session.
pub struct MockRuntime {
    state: MockStateHandle,
}

impl MockRuntime {
    pub fn new() -> MockRuntime {
        MockRuntime {
            state: Arc::new(Mutex::new(MockDeviceState::default())),
        }
    }

    /// Handle to the scripted state.
    pub fn state(&self) -> MockStateHandle {
        self.state.clone()
    }
}

impl VRRuntime for MockRuntime {
    fn is_runtime_present(&mut self) -> bool {
        self.state.lock().unwrap().hmd_present
    }

    fn init_session(
        &mut self,
        _app_type: VRApplicationType,
    ) -> Result<VRSessionHandle, VRRuntimeError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_init_session {
            return Err(VRRuntimeError {
                code: 108,
                description: "mock: session init scripted to fail".into(),
            });
        }
        state.init_session_calls += 1;
        Ok(VRSessionHandle(1))
    }

    fn shutdown_session(&mut self) {
        self.state.lock().unwrap().shutdown_calls += 1;
    }

    fn system(&mut self) -> Result<Arc<dyn VRSystem>, VRRuntimeError> {
        if self.state.lock().unwrap().fail_system {
            return Err(VRRuntimeError {
                code: 105,
                description: "mock: system interface scripted to fail".into(),
            });
        }
        Ok(Arc::new(MockSystem {
            state: self.state.clone(),
        }))
    }

    fn compositor(&mut self) -> Result<Arc<dyn VRCompositor>, VRRuntimeError> {
        if self.state.lock().unwrap().fail_compositor {
            return Err(VRRuntimeError {
                code: 105,
                description: "mock: compositor interface scripted to fail".into(),
            });
        }
        Ok(Arc::new(MockCompositor {
            state: self.state.clone(),
        }))
    }

    fn extended_display(&mut self) -> Result<Arc<dyn VRExtendedDisplay>, VRRuntimeError> {
        if self.state.lock().unwrap().fail_extended_display {
            return Err(VRRuntimeError {
                code: 105,
                description: "mock: extended display interface scripted to fail".into(),
            });
        }
        Ok(Arc::new(MockExtendedDisplay {
            state: self.state.clone(),
        }))
    }

    fn release(&mut self) {
        self.state.lock().unwrap().released = true;
    }
}

struct MockSystem {
    state: MockStateHandle,
}

impl VRSystem for MockSystem {
    fn recommended_render_target_size(&self) -> (u32, u32) {
        self.state.lock().unwrap().render_size
    }

    fn projection_raw(&self, eye: VREye) -> VRFieldOfView {
        self.state.lock().unwrap().eye_fov[eye.index()]
    }

    fn eye_to_head_transform(&self, eye: VREye) -> Option<Matrix34> {
        self.state.lock().unwrap().eye_to_head[eye.index()]
    }

    fn adapter_identity(&self) -> Result<VRAdapterIdentity, VRRuntimeError> {
        let state = self.state.lock().unwrap();
        if state.fail_adapter {
            return Err(VRRuntimeError {
                code: 200,
                description: "mock: adapter query scripted to fail".into(),
            });
        }
        Ok(VRAdapterIdentity {
            index: state.adapter_index,
        })
    }

    fn float_property(&self, property: VRDeviceProperty) -> Option<f32> {
        let state = self.state.lock().unwrap();
        match property {
            VRDeviceProperty::DisplayFrequency => state.display_frequency,
            VRDeviceProperty::NeckToEyeDistance => state.neck_to_eye,
            VRDeviceProperty::ManufacturerName | VRDeviceProperty::ModelNumber => None,
        }
    }

    fn string_property(&self, property: VRDeviceProperty) -> Option<String> {
        let state = self.state.lock().unwrap();
        match property {
            VRDeviceProperty::ManufacturerName => Some(state.manufacturer.clone()),
            VRDeviceProperty::ModelNumber => Some(state.model.clone()),
            VRDeviceProperty::DisplayFrequency | VRDeviceProperty::NeckToEyeDistance => None,
        }
    }

    fn reset_seated_zero_pose(&self) {
        self.state.lock().unwrap().recenter_calls += 1;
    }
}

struct MockCompositor {
    state: MockStateHandle,
}

impl VRCompositor for MockCompositor {
    fn wait_get_poses(&self, poses: &mut [VRRawPose]) -> Result<(), VRRuntimeError> {
        let hmd_pose = {
            let mut state = self.state.lock().unwrap();
            if let Some(code) = state.compositor_error {
                return Err(VRRuntimeError {
                    code,
                    description: "mock: pose wait scripted to fail".into(),
                });
            }
            state.wait_calls += 1;
            state.hmd_pose
        };
        // Stands in for the frame-interval wait of a real compositor.
        thread::sleep(Duration::from_millis(1));
        if let Some(head) = poses.first_mut() {
            *head = hmd_pose;
        }
        for pose in poses.iter_mut().skip(1) {
            *pose = VRRawPose::default();
        }
        Ok(())
    }
}

struct MockExtendedDisplay {
    state: MockStateHandle,
}

impl VRExtendedDisplay for MockExtendedDisplay {
    fn window_bounds(&self) -> (i32, i32, u32, u32) {
        self.state.lock().unwrap().window_bounds
    }
}
