//! Session lifecycle against the scripted mock runtime: presence check,
//! connect with rollback on each acquisition step, descriptor contents,
//! disconnect and shutdown ownership.

#![cfg(feature = "mock")]

use rust_hmd::api::{MockRuntime, MockStateHandle};
use rust_hmd::{VRError, VREye, VRSession, VRSessionState, VRSubsystem, DEFAULT_NECK_OFFSET};

const EPSILON: f32 = 1e-5;

fn new_session() -> (VRSession, MockStateHandle) {
    let runtime = MockRuntime::new();
    let state = runtime.state();
    (VRSession::new(Box::new(runtime)), state)
}

fn assert_near(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "{} vs {}",
        actual,
        expected
    );
}

#[test]
fn init_reports_missing_runtime() {
    let (mut session, state) = new_session();
    state.lock().unwrap().hmd_present = false;

    assert!(!session.init());
    assert_eq!(session.state(), VRSessionState::Uninitialized);
    assert_eq!(state.lock().unwrap().init_session_calls, 0);
}

#[test]
fn connect_requires_successful_init() {
    let (mut session, state) = new_session();

    let err = session.connect().unwrap_err();
    assert!(matches!(err, VRError::Unavailable));
    assert_eq!(session.state(), VRSessionState::Uninitialized);
    // The runtime must not have been touched.
    assert_eq!(state.lock().unwrap().init_session_calls, 0);
}

#[test]
fn connect_builds_descriptor_from_device() {
    let (mut session, state) = new_session();
    assert!(session.init());
    assert_eq!(session.state(), VRSessionState::RuntimeChecked);

    let descriptor = session.connect().expect("connect");
    assert!(session.is_connected());
    assert_eq!(session.state(), VRSessionState::Connected);

    assert_eq!(descriptor.eye_size[0].width, 1512);
    assert_eq!(descriptor.eye_size[0].height, 1680);
    assert_eq!(descriptor.eye_size[1], descriptor.eye_size[0]);
    // Raw tangents exactly as the device reports them, signs included.
    assert_near(descriptor.eye_fov[0].left, -1.39666);
    assert_near(descriptor.eye_fov[0].right, 1.23994);
    assert_near(descriptor.eye_fov[1].left, -1.23994);
    assert!(descriptor.eye_fov[0].top < 0.0);
    assert!(descriptor.eye_fov[0].bottom > 0.0);
    assert_eq!(descriptor.device_size.width, 2160);
    assert_eq!(descriptor.device_size.height, 1200);
    assert_near(descriptor.refresh_rate, 90.0);
    // The mock reports no neck model, so the default applies.
    assert_near(descriptor.neck_offset, DEFAULT_NECK_OFFSET);
    assert_eq!(descriptor.display_name, "Mock VRDisplay");

    let left = session.eye_offset(VREye::Left).expect("left offset");
    let right = session.eye_offset(VREye::Right).expect("right offset");
    assert_near(left[0], -0.035949998);
    assert_near(right[0], 0.035949998);
    assert_near(left[1], 0.0);
    assert_near(left[2], -0.015);

    let adapter = session.adapter_identity().expect("adapter");
    assert_eq!(adapter.index, 0);
    assert!(adapter.is_valid());

    assert_eq!(state.lock().unwrap().init_session_calls, 1);
}

#[test]
fn second_connect_is_a_no_op() {
    let (mut session, state) = new_session();
    assert!(session.init());
    let first = session.connect().expect("first connect");
    let second = session.connect().expect("second connect");

    assert_eq!(second.display_name, first.display_name);
    assert_eq!(second.eye_size, first.eye_size);
    assert_eq!(state.lock().unwrap().init_session_calls, 1);
}

#[test]
fn each_failed_step_unwinds_to_uninitialized() {
    struct Case {
        arm: fn(&mut rust_hmd::api::MockDeviceState),
        subsystem: VRSubsystem,
        shutdowns: u32,
    }
    let cases = [
        Case {
            arm: |s| s.fail_init_session = true,
            subsystem: VRSubsystem::Session,
            // Session init never succeeded, so there is nothing to shut down.
            shutdowns: 0,
        },
        Case {
            arm: |s| s.fail_system = true,
            subsystem: VRSubsystem::System,
            shutdowns: 1,
        },
        Case {
            arm: |s| s.fail_adapter = true,
            subsystem: VRSubsystem::Adapter,
            shutdowns: 1,
        },
        Case {
            arm: |s| s.fail_compositor = true,
            subsystem: VRSubsystem::Compositor,
            shutdowns: 1,
        },
        Case {
            arm: |s| s.fail_extended_display = true,
            subsystem: VRSubsystem::ExtendedDisplay,
            shutdowns: 1,
        },
    ];

    for case in &cases {
        let (mut session, state) = new_session();
        (case.arm)(&mut state.lock().unwrap());
        assert!(session.init());

        let err = session.connect().unwrap_err();
        match err {
            VRError::AcquisitionFailed { subsystem, .. } => {
                assert_eq!(subsystem, case.subsystem);
            }
            other => panic!("unexpected error for {:?}: {:?}", case.subsystem, other),
        }

        // Rollback leaves no partially connected state behind.
        assert_eq!(
            session.state(),
            VRSessionState::Uninitialized,
            "state after {:?} failure",
            case.subsystem
        );
        assert!(session.descriptor().is_none());
        assert!(session.eye_offset(VREye::Left).is_none());
        assert!(session.adapter_identity().is_none());
        assert_eq!(
            state.lock().unwrap().shutdown_calls,
            case.shutdowns,
            "shutdowns after {:?} failure",
            case.subsystem
        );
    }
}

#[test]
fn reconnect_after_failure_succeeds() {
    let (mut session, state) = new_session();
    state.lock().unwrap().fail_compositor = true;
    assert!(session.init());
    assert!(session.connect().is_err());
    assert_eq!(session.state(), VRSessionState::Uninitialized);

    state.lock().unwrap().fail_compositor = false;
    assert!(session.init());
    session.connect().expect("reconnect");
    assert!(session.is_connected());

    let counters = state.lock().unwrap();
    assert_eq!(counters.init_session_calls, 2);
    assert_eq!(counters.shutdown_calls, 1);
}

#[test]
fn disconnect_releases_owned_session() {
    let (mut session, state) = new_session();
    assert!(session.init());
    session.connect().expect("connect");

    session.disconnect();
    assert_eq!(session.state(), VRSessionState::Disconnected);
    assert!(!session.is_connected());
    assert!(session.descriptor().is_none());
    assert!(session.eye_offset(VREye::Right).is_none());
    assert!(session.adapter_identity().is_none());
    assert_eq!(state.lock().unwrap().shutdown_calls, 1);
}

#[test]
fn disconnect_when_not_connected_is_a_no_op() {
    let (mut session, state) = new_session();
    session.disconnect();
    assert_eq!(session.state(), VRSessionState::Uninitialized);
    assert_eq!(state.lock().unwrap().shutdown_calls, 0);
}

#[test]
fn shared_session_is_never_shut_down() {
    let runtime = MockRuntime::new();
    let state = runtime.state();
    let mut session =
        VRSession::with_shared_session(Box::new(runtime), rust_hmd::VRSessionHandle(7));

    assert!(session.init());
    session.connect().expect("connect");
    // The embedder already initialized the runtime session.
    assert_eq!(state.lock().unwrap().init_session_calls, 0);

    session.disconnect();
    assert_eq!(session.state(), VRSessionState::Disconnected);
    assert_eq!(state.lock().unwrap().shutdown_calls, 0);
}

#[test]
fn reconnect_after_disconnect_requires_init() {
    let (mut session, _state) = new_session();
    assert!(session.init());
    session.connect().expect("connect");
    session.disconnect();

    let err = session.connect().unwrap_err();
    assert!(matches!(err, VRError::Unavailable));

    assert!(session.init());
    session.connect().expect("reconnect");
    assert!(session.is_connected());
}

#[test]
fn shutdown_releases_the_loader() {
    let (mut session, state) = new_session();
    assert!(session.init());
    session.connect().expect("connect");

    session.shutdown();
    assert_eq!(session.state(), VRSessionState::Uninitialized);
    {
        let counters = state.lock().unwrap();
        assert!(counters.released);
        assert_eq!(counters.shutdown_calls, 1);
    }

    // The runtime may be probed and connected again after a shutdown.
    assert!(session.init());
    session.connect().expect("connect after shutdown");
    assert_eq!(state.lock().unwrap().init_session_calls, 2);
}

#[test]
fn reported_neck_offset_is_used_when_nonzero() {
    let (mut session, state) = new_session();
    {
        let mut state = state.lock().unwrap();
        state.neck_to_eye = Some(0.1);
        // No device eye transforms, so eye placement uses the neck model.
        state.eye_to_head = [None, None];
    }
    assert!(session.init());
    let descriptor = session.connect().expect("connect");

    assert_near(descriptor.neck_offset, 0.1);
    let left = session.eye_offset(VREye::Left).expect("left offset");
    assert_near(left[0], 0.0);
    assert_near(left[1], 0.0);
    assert_near(left[2], -0.1);
}

#[test]
fn zero_neck_offset_falls_back_to_default() {
    let (mut session, state) = new_session();
    {
        let mut state = state.lock().unwrap();
        // Zero is the runtime's "not provided" sentinel, never a real value.
        state.neck_to_eye = Some(0.0);
        state.eye_to_head = [None, None];
    }
    assert!(session.init());
    let descriptor = session.connect().expect("connect");

    assert_near(descriptor.neck_offset, DEFAULT_NECK_OFFSET);
    let right = session.eye_offset(VREye::Right).expect("right offset");
    assert_near(right[2], -DEFAULT_NECK_OFFSET);
}

#[test]
fn direct_mode_estimates_device_size() {
    let (mut session, state) = new_session();
    state.lock().unwrap().window_bounds = (0, 0, 0, 0);
    assert!(session.init());
    let descriptor = session.connect().expect("connect");

    // Both eye targets side by side.
    assert_eq!(descriptor.device_size.width, 3024);
    assert_eq!(descriptor.device_size.height, 1680);
}
