//! Session lifecycle: runtime presence check, ordered subsystem acquisition
//! with rollback on partial failure, disconnect and shutdown.

use std::sync::Arc;

use crate::error::{VRError, VRRuntimeError, VRSubsystem};
use crate::math;
use crate::runtime::{
    VRAdapterIdentity, VRApplicationType, VRCompositor, VRExtendedDisplay, VRRuntime,
    VRSessionHandle, VRSystem, HMD_DEVICE_INDEX, INVALID_DEVICE_INDEX,
};
use crate::vr_descriptor::VRDescriptor;
use crate::vr_eye::VREye;

// Lifecycle of the connection to the tracking runtime. Owned exclusively by
// VRSession; other components observe it through `is_connected()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub enum VRSessionState {
    Uninitialized,
    RuntimeChecked,
    Connected,
    Disconnected,
}

/// Drives one device session against a vendor runtime: presence check,
/// connect with rollback, per-frame tracking (see `update_tracking`),
/// disconnect and shutdown.
///
/// Single-threaded cooperative model: every state-changing call takes
/// `&mut self`, so the borrow checker enforces the required serialization.
pub struct VRSession {
    pub(crate) runtime: Box<dyn VRRuntime>,
    pub(crate) state: VRSessionState,
    // Session token currently in use, ours or the embedder's.
    session_handle: Option<VRSessionHandle>,
    // Token supplied by an embedding process that initialized the runtime
    // before us. When set, connect() reuses it and never inits or shuts
    // down the session itself.
    external_session: Option<VRSessionHandle>,
    // True only while a connect() performed by this controller owns the
    // session init; decides who runs the shutdown.
    owns_init: bool,
    pub(crate) system: Option<Arc<dyn VRSystem>>,
    pub(crate) compositor: Option<Arc<dyn VRCompositor>>,
    extended_display: Option<Arc<dyn VRExtendedDisplay>>,
    pub(crate) descriptor: Option<VRDescriptor>,
    // Head-local translation to each eye's optical center, left first.
    // Meaningful only while connected.
    pub(crate) eye_offsets: [[f32; 3]; 2],
    adapter: VRAdapterIdentity,
    // Device slot the head pose is read from; invalid unless connected.
    pub(crate) hmd_index: u32,
}

impl VRSession {
    /// Wraps a runtime this session will drive end to end.
    pub fn new(runtime: Box<dyn VRRuntime>) -> VRSession {
        VRSession {
            runtime,
            state: VRSessionState::Uninitialized,
            session_handle: None,
            external_session: None,
            owns_init: false,
            system: None,
            compositor: None,
            extended_display: None,
            descriptor: None,
            eye_offsets: [[0.0; 3]; 2],
            adapter: VRAdapterIdentity::INVALID,
            hmd_index: INVALID_DEVICE_INDEX,
        }
    }

    /// Wraps a runtime whose session was already initialized by an embedding
    /// process. `connect()` will reuse `handle`; the embedder keeps the
    /// shutdown responsibility.
    pub fn with_shared_session(runtime: Box<dyn VRRuntime>, handle: VRSessionHandle) -> VRSession {
        let mut session = VRSession::new(runtime);
        session.external_session = Some(handle);
        session
    }

    /// Checks whether the runtime is installed and a device is present.
    /// Pure query: nothing is acquired, and a negative result leaves the
    /// state unchanged. Idempotent.
    pub fn init(&mut self) -> bool {
        match self.state {
            VRSessionState::RuntimeChecked | VRSessionState::Connected => true,
            VRSessionState::Uninitialized | VRSessionState::Disconnected => {
                if self.runtime.is_runtime_present() {
                    self.state = VRSessionState::RuntimeChecked;
                    true
                } else {
                    debug!("VR runtime not present");
                    false
                }
            }
        }
    }

    /// Runs the ordered acquisition sequence: (a) runtime session, (b)
    /// system interface and adapter identity, (c) compositor, (d) extended
    /// display, (e) capability descriptor and fixed eye offsets. Any failure
    /// in (a)-(d) unwinds everything acquired so far and returns the state
    /// to `Uninitialized`; no partially connected state is observable.
    ///
    /// Calling this on a connected session is a no-op that returns the
    /// existing descriptor.
    pub fn connect(&mut self) -> Result<VRDescriptor, VRError> {
        if self.state == VRSessionState::Connected {
            warn!("connect() called on a connected session");
            return match &self.descriptor {
                Some(descriptor) => Ok(descriptor.clone()),
                None => Err(VRError::Misuse("connected session lost its descriptor")),
            };
        }
        if self.state != VRSessionState::RuntimeChecked {
            debug!("connect() without a successful init()");
            return Err(VRError::Unavailable);
        }

        // (a) Runtime session, unless the embedder brought one.
        match self.external_session {
            Some(handle) => {
                self.session_handle = Some(handle);
                self.owns_init = false;
            }
            None => match self.runtime.init_session(VRApplicationType::Scene) {
                Ok(handle) => {
                    self.session_handle = Some(handle);
                    self.owns_init = true;
                }
                Err(err) => return Err(self.abort_connect(VRSubsystem::Session, err)),
            },
        }

        // (b) System interface, then the adapter the backend must render on.
        let system = match self.runtime.system() {
            Ok(system) => system,
            Err(err) => return Err(self.abort_connect(VRSubsystem::System, err)),
        };
        self.system = Some(Arc::clone(&system));
        match system.adapter_identity() {
            Ok(adapter) => self.adapter = adapter,
            Err(err) => return Err(self.abort_connect(VRSubsystem::Adapter, err)),
        }

        // (c) Compositor.
        match self.runtime.compositor() {
            Ok(compositor) => self.compositor = Some(compositor),
            Err(err) => return Err(self.abort_connect(VRSubsystem::Compositor, err)),
        }

        // (d) Extended display.
        let extended_display = match self.runtime.extended_display() {
            Ok(display) => display,
            Err(err) => return Err(self.abort_connect(VRSubsystem::ExtendedDisplay, err)),
        };
        self.extended_display = Some(Arc::clone(&extended_display));

        // (e) Capability snapshot and fixed eye offsets. Individual queries
        // may degrade to sentinels but never abort the connect.
        let descriptor = VRDescriptor::fetch(&*system, &*extended_display);
        self.eye_offsets = fetch_eye_offsets(&*system, descriptor.neck_offset);
        self.hmd_index = HMD_DEVICE_INDEX;
        self.descriptor = Some(descriptor.clone());
        self.state = VRSessionState::Connected;
        info!(
            "VR session connected: {} ({}x{} per eye, {} Hz)",
            descriptor.display_name,
            descriptor.eye_size[0].width,
            descriptor.eye_size[0].height,
            descriptor.refresh_rate
        );
        Ok(descriptor)
    }

    /// Releases every acquired interface, invalidates the descriptor and
    /// cached device indices, and shuts the runtime session down only if
    /// this controller owned the init. No-op unless connected.
    pub fn disconnect(&mut self) {
        if self.state != VRSessionState::Connected {
            debug!("disconnect() on a session that is not connected");
            return;
        }
        self.release_acquired();
        self.state = VRSessionState::Disconnected;
        info!("VR session disconnected");
    }

    /// Disconnects if needed, then drops the runtime loader handle. A later
    /// `init()` may probe the runtime again.
    pub fn shutdown(&mut self) {
        if self.state == VRSessionState::Connected {
            warn!("shutdown() on a connected session, disconnecting first");
            self.disconnect();
        }
        self.runtime.release();
        self.state = VRSessionState::Uninitialized;
    }

    #[inline]
    pub fn state(&self) -> VRSessionState {
        self.state
    }

    /// The one state observation other components should rely on.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.state == VRSessionState::Connected
    }

    /// Capability snapshot of the connected device.
    pub fn descriptor(&self) -> Option<&VRDescriptor> {
        self.descriptor.as_ref()
    }

    /// Fixed head-local translation to one eye, while connected.
    pub fn eye_offset(&self, eye: VREye) -> Option<[f32; 3]> {
        if self.is_connected() {
            Some(self.eye_offsets[eye.index()])
        } else {
            None
        }
    }

    /// Adapter the render backend should create its device on, while
    /// connected.
    pub fn adapter_identity(&self) -> Option<VRAdapterIdentity> {
        if self.is_connected() {
            Some(self.adapter)
        } else {
            None
        }
    }

    // One failed step aborts the whole sequence: log the runtime's error,
    // unwind in reverse acquisition order, return to Uninitialized.
    fn abort_connect(&mut self, subsystem: VRSubsystem, err: VRRuntimeError) -> VRError {
        error!(
            "VR {} acquisition failed: {} (code {})",
            subsystem, err.description, err.code
        );
        self.release_acquired();
        self.state = VRSessionState::Uninitialized;
        VRError::AcquisitionFailed {
            subsystem,
            source: err,
        }
    }

    // Reverse of the acquisition order in connect(). Runs the runtime
    // shutdown only when this controller performed the init.
    fn release_acquired(&mut self) {
        self.extended_display = None;
        self.compositor = None;
        self.adapter = VRAdapterIdentity::INVALID;
        self.system = None;
        self.descriptor = None;
        self.eye_offsets = [[0.0; 3]; 2];
        self.hmd_index = INVALID_DEVICE_INDEX;
        if self.owns_init && self.session_handle.is_some() {
            self.runtime.shutdown_session();
        }
        self.session_handle = None;
        self.owns_init = false;
    }
}

// Head-to-eye translation per eye: from the device transform when one
// exists, else from the neck model (eyes sit `neck_offset` forward of the
// head origin).
fn fetch_eye_offsets(system: &dyn VRSystem, neck_offset: f32) -> [[f32; 3]; 2] {
    let mut offsets = [[0.0f32; 3]; 2];
    for eye in &VREye::BOTH {
        offsets[eye.index()] = match system.eye_to_head_transform(*eye) {
            Some(transform) => math::matrix_to_translation(&transform),
            None => [0.0, 0.0, -neck_offset],
        };
    }
    offsets
}
