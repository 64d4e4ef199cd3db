#![allow(non_upper_case_globals)]

// Interface versions this backend is written against. The runtime is asked
// whether it still speaks these before any function table is fetched.
pub const IVRSystem_Version: &str = "IVRSystem_019";
pub const IVRCompositor_Version: &str = "IVRCompositor_022";
pub const IVRExtendedDisplay_Version: &str = "IVRExtendedDisplay_001";
