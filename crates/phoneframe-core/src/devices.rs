use serde::{Deserialize, Serialize};

/// Width of the default preset
pub const DEFAULT_DEVICE_WIDTH: u32 = 390;

/// Named width for the phone frame. Only affects the chrome's visual width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePreset {
    pub name: String,
    /// CSS pixels
    pub width: u32,
}

impl DevicePreset {
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

pub fn default_device_presets() -> Vec<DevicePreset> {
    vec![
        DevicePreset::new("iPhone SE", 375),
        DevicePreset::new("iPhone 14", DEFAULT_DEVICE_WIDTH),
        DevicePreset::new("iPhone 14 Pro Max", 430),
        DevicePreset::new("Pixel 7", 412),
        DevicePreset::new("Galaxy S20", 360),
        DevicePreset::new("iPad Mini", 768),
    ]
}
