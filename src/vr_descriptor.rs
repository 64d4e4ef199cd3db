use crate::runtime::{VRDeviceProperty, VRExtendedDisplay, VRSystem};
use crate::vr_eye::VREye;
use crate::vr_field_view::VRFieldOfView;

// Fallback head-origin-to-eye distance in meters. Runtimes report the neck
// model as exactly zero when they have no value, so zero means "not
// provided" rather than "no offset".
pub const DEFAULT_NECK_OFFSET: f32 = 0.0805;

// Pixel dimensions of a render target or display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct VRSize {
    pub width: u32,
    pub height: u32,
}

// Device capability snapshot taken once per successful connect and handed to
// the render backend. Read-only afterwards; invalidated on disconnect.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct VRDescriptor {
    // Recommended render target size per eye, left first. Stored
    // independently per eye even though most devices are symmetric.
    pub eye_size: [VRSize; 2],

    // Raw projection bounds per eye, left first.
    pub eye_fov: [VRFieldOfView; 2],

    // Full panel size in pixels.
    pub device_size: VRSize,

    // Display refresh rate in Hz; zero when unknown.
    pub refresh_rate: f32,

    // Head-origin-to-eye distance used for eye placement when the device
    // reports no eye-to-head transform.
    pub neck_offset: f32,

    // Manufacturer and model, best effort; empty when the device reports
    // neither.
    pub display_name: String,
}

impl Default for VRDescriptor {
    fn default() -> VRDescriptor {
        VRDescriptor {
            eye_size: [VRSize::default(); 2],
            eye_fov: [VRFieldOfView::default(); 2],
            device_size: VRSize::default(),
            refresh_rate: 0.0,
            neck_offset: DEFAULT_NECK_OFFSET,
            display_name: String::new(),
        }
    }
}

impl VRDescriptor {
    // Queries every capability once. A failed query leaves a zero/empty
    // sentinel and never aborts: a degraded descriptor is still usable by
    // the render backend.
    pub(crate) fn fetch(system: &dyn VRSystem, display: &dyn VRExtendedDisplay) -> VRDescriptor {
        let (render_width, render_height) = system.recommended_render_target_size();
        let eye_size = [VRSize {
            width: render_width,
            height: render_height,
        }; 2];
        let eye_fov = [
            system.projection_raw(VREye::Left),
            system.projection_raw(VREye::Right),
        ];

        let (_, _, display_width, display_height) = display.window_bounds();
        let device_size = if display_width > 0 && display_height > 0 {
            VRSize {
                width: display_width,
                height: display_height,
            }
        } else {
            // Direct mode hides the panel window; estimate it as both eye
            // targets side by side.
            VRSize {
                width: render_width * 2,
                height: render_height,
            }
        };

        let refresh_rate = system
            .float_property(VRDeviceProperty::DisplayFrequency)
            .unwrap_or(0.0);

        let mut neck_offset = system
            .float_property(VRDeviceProperty::NeckToEyeDistance)
            .unwrap_or(0.0);
        if neck_offset == 0.0 {
            neck_offset = DEFAULT_NECK_OFFSET;
        }

        let manufacturer = system
            .string_property(VRDeviceProperty::ManufacturerName)
            .unwrap_or_default();
        let model = system
            .string_property(VRDeviceProperty::ModelNumber)
            .unwrap_or_default();
        let display_name = format!("{} {}", manufacturer, model).trim().to_string();

        VRDescriptor {
            eye_size,
            eye_fov,
            device_size,
            refresh_rate,
            neck_offset,
            display_name,
        }
    }
}
