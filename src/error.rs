//! Error types for the session and tracking surface.

use std::fmt;
use thiserror::Error;

/// Failure reported by the VR runtime: vendor error code plus its
/// human-readable description.
#[derive(Error, Debug, Clone)]
#[error("{description} (code {code})")]
pub struct VRRuntimeError {
    pub code: u32,
    pub description: String,
}

/// The acquisition step a connect failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRSubsystem {
    Session,
    System,
    Adapter,
    Compositor,
    ExtendedDisplay,
}

impl fmt::Display for VRSubsystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            VRSubsystem::Session => "session",
            VRSubsystem::System => "system",
            VRSubsystem::Adapter => "adapter",
            VRSubsystem::Compositor => "compositor",
            VRSubsystem::ExtendedDisplay => "extended display",
        };
        f.write_str(name)
    }
}

/// Why a frame produced no tracking data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRTrackingLoss {
    /// The compositor rejected the pose wait with a runtime error code.
    Compositor(u32),
    /// The head pose came back flagged invalid; the frame is skipped.
    PoseInvalid,
}

impl fmt::Display for VRTrackingLoss {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            VRTrackingLoss::Compositor(code) => write!(f, "compositor error {}", code),
            VRTrackingLoss::PoseInvalid => f.write_str("device pose invalid"),
        }
    }
}

/// Everything the session surface can fail with. None of these are fatal to
/// the host process; callers may retry or fall back to non-VR rendering.
#[derive(Error, Debug)]
pub enum VRError {
    /// No runtime has been confirmed present for this session. Returned by
    /// `connect()` unless a preceding `init()` reported the runtime.
    #[error("VR runtime not installed or no device present")]
    Unavailable,

    /// A connect acquisition step failed. The controller has already rolled
    /// back to the uninitialized state.
    #[error("{subsystem} acquisition failed: {source}")]
    AcquisitionFailed {
        subsystem: VRSubsystem,
        source: VRRuntimeError,
    },

    /// Transient per-frame tracking failure; the render loop should hold the
    /// previous pose or skip stereo output for this frame.
    #[error("tracking unavailable: {0}")]
    TrackingUnavailable(VRTrackingLoss),

    /// An operation was called in a state that does not support it.
    #[error("API misuse: {0}")]
    Misuse(&'static str),
}
