use libloading as lib;

use super::binding as openvr;

// openvr_api entry points
pub type VRInitInternal =
    unsafe extern "C" fn(*mut openvr::EVRInitError, openvr::EVRApplicationType) -> u32;
pub type VRShutdownInternal = unsafe extern "C" fn();
pub type VRIsHmdPresent = unsafe extern "C" fn() -> bool;
pub type VRIsRuntimeInstalled = unsafe extern "C" fn() -> bool;
pub type VRGetGenericInterface =
    unsafe extern "C" fn(*const ::std::os::raw::c_char, *mut openvr::EVRInitError) -> isize;
pub type VRIsInterfaceVersionValid = unsafe extern "C" fn(*const ::std::os::raw::c_char) -> bool;
pub type VRGetInitErrorAsEnglishDescription =
    unsafe extern "C" fn(openvr::EVRInitError) -> *const ::std::os::raw::c_char;

#[cfg(target_os = "windows")]
const LIBRARY_NAME: &str = "openvr_api.dll";
#[cfg(target_os = "macos")]
const LIBRARY_NAME: &str = "libopenvr_api.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const LIBRARY_NAME: &str = "libopenvr_api.so";

pub struct OpenVRLibrary {
    // Keeps the loaded module alive for the copied entry points below.
    // None when the runtime is linked statically.
    _lib: Option<lib::Library>,
    pub init_internal: VRInitInternal,
    pub shutdown_internal: VRShutdownInternal,
    pub is_hmd_present: VRIsHmdPresent,
    pub is_runtime_installed: VRIsRuntimeInstalled,
    pub get_interface: VRGetGenericInterface,
    pub is_interface_version_valid: VRIsInterfaceVersionValid,
    pub init_error_description: VRGetInitErrorAsEnglishDescription,
}

impl OpenVRLibrary {
    pub unsafe fn load() -> Result<OpenVRLibrary, lib::Error> {
        let library = lib::Library::new(LIBRARY_NAME)?;
        Ok(OpenVRLibrary {
            init_internal: *library.get::<VRInitInternal>(b"VR_InitInternal\0")?,
            shutdown_internal: *library.get::<VRShutdownInternal>(b"VR_ShutdownInternal\0")?,
            is_hmd_present: *library.get::<VRIsHmdPresent>(b"VR_IsHmdPresent\0")?,
            is_runtime_installed: *library
                .get::<VRIsRuntimeInstalled>(b"VR_IsRuntimeInstalled\0")?,
            get_interface: *library.get::<VRGetGenericInterface>(b"VR_GetGenericInterface\0")?,
            is_interface_version_valid: *library
                .get::<VRIsInterfaceVersionValid>(b"VR_IsInterfaceVersionValid\0")?,
            init_error_description: *library.get::<VRGetInitErrorAsEnglishDescription>(
                b"VR_GetVRInitErrorAsEnglishDescription\0",
            )?,
            _lib: Some(library),
        })
    }
}

#[cfg(feature = "openvr-linked")]
#[allow(non_snake_case)]
#[link(name = "openvr_api")]
extern "C" {
    fn VR_InitInternal(
        error: *mut openvr::EVRInitError,
        application_type: openvr::EVRApplicationType,
    ) -> u32;
    fn VR_ShutdownInternal();
    fn VR_IsHmdPresent() -> bool;
    fn VR_IsRuntimeInstalled() -> bool;
    fn VR_GetGenericInterface(
        interface_version: *const ::std::os::raw::c_char,
        error: *mut openvr::EVRInitError,
    ) -> isize;
    fn VR_IsInterfaceVersionValid(interface_version: *const ::std::os::raw::c_char) -> bool;
    fn VR_GetVRInitErrorAsEnglishDescription(
        error: openvr::EVRInitError,
    ) -> *const ::std::os::raw::c_char;
}

#[cfg(feature = "openvr-linked")]
impl OpenVRLibrary {
    pub fn linked() -> OpenVRLibrary {
        OpenVRLibrary {
            _lib: None,
            init_internal: VR_InitInternal,
            shutdown_internal: VR_ShutdownInternal,
            is_hmd_present: VR_IsHmdPresent,
            is_runtime_installed: VR_IsRuntimeInstalled,
            get_interface: VR_GetGenericInterface,
            is_interface_version_valid: VR_IsInterfaceVersionValid,
            init_error_description: VR_GetVRInitErrorAsEnglishDescription,
        }
    }
}
