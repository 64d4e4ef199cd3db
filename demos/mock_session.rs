//! Full session lifecycle against the scripted mock device.
//!
//! Run with `cargo run --example mock_session`; set `RUST_LOG=debug` to see
//! the controller's own logging.

use rust_hmd::api::MockRuntime;
use rust_hmd::{VREye, VRSession};

fn main() {
    env_logger::init();

    let runtime = MockRuntime::new();
    let state = runtime.state();
    let mut session = VRSession::new(Box::new(runtime));

    if !session.init() {
        println!("no VR runtime present");
        return;
    }

    let descriptor = match session.connect() {
        Ok(descriptor) => descriptor,
        Err(err) => {
            println!("connect failed: {}", err);
            return;
        }
    };

    println!("connected to {}", descriptor.display_name);
    println!(
        "  per-eye target: {}x{} @ {} Hz",
        descriptor.eye_size[0].width, descriptor.eye_size[0].height, descriptor.refresh_rate
    );
    println!(
        "  panel: {}x{}, neck offset {} m",
        descriptor.device_size.width, descriptor.device_size.height, descriptor.neck_offset
    );

    // Turn the head a little each frame so the eye transforms move.
    for frame in 0..5u32 {
        let half_angle = frame as f32 * 0.05;
        state.lock().unwrap().set_head_pose(
            [0.0, 1.6, 0.0],
            [0.0, half_angle.sin(), 0.0, half_angle.cos()],
        );

        match session.update_tracking(0.1, 100.0) {
            Ok(data) => {
                println!(
                    "frame {}: head {:?}, eyes L{:?} R{:?}",
                    frame,
                    data.pose.position,
                    data.eye(VREye::Left).translation,
                    data.eye(VREye::Right).translation
                );
            }
            Err(err) => println!("frame {}: {}", frame, err),
        }
    }

    session.disconnect();
    session.shutdown();
    println!("session closed");
}
