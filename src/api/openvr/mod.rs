mod binding;
mod constants;
mod interfaces;
mod library;

use std::ffi::{CStr, CString};
use std::sync::Arc;

use self::binding as openvr;
use self::binding::*;
use self::interfaces::{OpenVRCompositor, OpenVRExtendedDisplay, OpenVRSystem};
use self::library::OpenVRLibrary;

use crate::error::VRRuntimeError;
use crate::runtime::{
    VRApplicationType, VRCompositor, VRExtendedDisplay, VRRuntime, VRSessionHandle, VRSystem,
};

/// OpenVR backend. Resolves openvr_api at runtime through `libloading` by
/// default; `OpenVRRuntime::linked` uses the statically linked entry points
/// instead, with identical behavior from there on.
pub struct OpenVRRuntime {
    lib: Option<OpenVRLibrary>,
}

impl OpenVRRuntime {
    pub fn new() -> OpenVRRuntime {
        OpenVRRuntime { lib: None }
    }

    #[cfg(feature = "openvr-linked")]
    pub fn linked() -> OpenVRRuntime {
        OpenVRRuntime {
            lib: Some(OpenVRLibrary::linked()),
        }
    }

    fn library(&mut self) -> Option<&OpenVRLibrary> {
        if self.lib.is_none() {
            match unsafe { OpenVRLibrary::load() } {
                Ok(lib) => self.lib = Some(lib),
                Err(err) => {
                    debug!("OpenVR library not loadable: {}", err);
                }
            }
        }
        self.lib.as_ref()
    }

    fn interface_table(&self, version: &str) -> Result<isize, VRRuntimeError> {
        let lib = match self.lib {
            Some(ref lib) => lib,
            None => {
                return Err(VRRuntimeError {
                    code: 0,
                    description: "OpenVR library not loaded".into(),
                });
            }
        };

        let plain = CString::new(version).unwrap();
        if !unsafe { (lib.is_interface_version_valid)(plain.as_ptr()) } {
            return Err(VRRuntimeError {
                code: EVRInitError_VRInitError_Init_InterfaceNotFound as u32,
                description: format!("runtime does not provide {}", version),
            });
        }

        let name = CString::new(format!("FnTable:{}", version)).unwrap();
        let mut error = EVRInitError_VRInitError_None;
        let table = unsafe { (lib.get_interface)(name.as_ptr(), &mut error) };
        if error != EVRInitError_VRInitError_None {
            return Err(VRRuntimeError {
                code: error as u32,
                description: init_error_description(lib, error),
            });
        }
        if table == 0 {
            return Err(VRRuntimeError {
                code: EVRInitError_VRInitError_Unknown as u32,
                description: format!("runtime returned no table for {}", version),
            });
        }
        Ok(table)
    }
}

impl VRRuntime for OpenVRRuntime {
    fn is_runtime_present(&mut self) -> bool {
        let lib = match self.library() {
            Some(lib) => lib,
            None => return false,
        };
        let installed = unsafe { (lib.is_runtime_installed)() };
        let present = unsafe { (lib.is_hmd_present)() };
        info!(
            "OpenVR: runtime {}installed, HMD {}present",
            if installed { "" } else { "not " },
            if present { "" } else { "not " }
        );
        installed && present
    }

    fn init_session(
        &mut self,
        app_type: VRApplicationType,
    ) -> Result<VRSessionHandle, VRRuntimeError> {
        let lib = match self.library() {
            Some(lib) => lib,
            None => {
                return Err(VRRuntimeError {
                    code: EVRInitError_VRInitError_Init_InstallationNotFound as u32,
                    description: "OpenVR runtime library not found".into(),
                });
            }
        };
        let mut error = EVRInitError_VRInitError_None;
        let token =
            unsafe { (lib.init_internal)(&mut error, application_type_to_openvr(app_type)) };
        if error != EVRInitError_VRInitError_None {
            return Err(VRRuntimeError {
                code: error as u32,
                description: init_error_description(lib, error),
            });
        }
        Ok(VRSessionHandle(token))
    }

    fn shutdown_session(&mut self) {
        if let Some(ref lib) = self.lib {
            unsafe {
                (lib.shutdown_internal)();
            }
        }
    }

    fn system(&mut self) -> Result<Arc<dyn VRSystem>, VRRuntimeError> {
        let table = self.interface_table(constants::IVRSystem_Version)?;
        Ok(Arc::new(OpenVRSystem::new(
            table as *mut openvr::VR_IVRSystem_FnTable,
        )))
    }

    fn compositor(&mut self) -> Result<Arc<dyn VRCompositor>, VRRuntimeError> {
        let table = self.interface_table(constants::IVRCompositor_Version)?;
        Ok(Arc::new(OpenVRCompositor::new(
            table as *mut openvr::VR_IVRCompositor_FnTable,
        )))
    }

    fn extended_display(&mut self) -> Result<Arc<dyn VRExtendedDisplay>, VRRuntimeError> {
        let table = self.interface_table(constants::IVRExtendedDisplay_Version)?;
        Ok(Arc::new(OpenVRExtendedDisplay::new(
            table as *mut openvr::VR_IVRExtendedDisplay_FnTable,
        )))
    }

    fn release(&mut self) {
        self.lib = None;
    }
}

fn init_error_description(lib: &OpenVRLibrary, error: openvr::EVRInitError) -> String {
    let text = unsafe { (lib.init_error_description)(error) };
    if text.is_null() {
        format!("OpenVR init error {}", error as u32)
    } else {
        unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
    }
}

fn application_type_to_openvr(app_type: VRApplicationType) -> openvr::EVRApplicationType {
    match app_type {
        VRApplicationType::Scene => EVRApplicationType_VRApplication_Scene,
        VRApplicationType::Overlay => EVRApplicationType_VRApplication_Overlay,
        VRApplicationType::Background => EVRApplicationType_VRApplication_Background,
    }
}
