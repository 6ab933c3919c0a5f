use serde::{Deserialize, Serialize};

/// Viewports narrower than this default to [`Device::Mobile`]
pub const MOBILE_BREAKPOINT_PX: u32 = 640;

/// Width the preview frame is shown at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Full container width
    #[default]
    Desktop,

    /// 768px
    Tablet,

    /// 412px
    Mobile,
}

impl Device {
    pub fn css_width(&self) -> &'static str {
        match self {
            Device::Desktop => "100%",
            Device::Tablet => "768px",
            Device::Mobile => "412px",
        }
    }

    pub fn for_viewport_width(width: u32) -> Self {
        if width < MOBILE_BREAKPOINT_PX {
            Device::Mobile
        } else {
            Device::Desktop
        }
    }
}

impl std::str::FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Device::Desktop),
            "tablet" => Ok(Device::Tablet),
            "mobile" => Ok(Device::Mobile),
            other => Err(format!("Unknown device: {}", other)),
        }
    }
}
