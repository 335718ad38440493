use std::path::Path;

use log::{error, info};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::bg_subtract::SubtractorConfig;
use crate::detect::DetectionConfig;
use crate::display::DisplayConfig;
use crate::error::{Error, Result};
use crate::mask::MaskConfig;
use crate::overlay::OverlayConfig;

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct CaptureConfig {
    /// File path or camera index. Prompted for on stdin when absent.
    pub location: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Same notations as `strtoull(.., 0)`: hex, octal or decimal.
    pub base_address: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct MotionConfig {
    pub capture: CaptureConfig,
    pub allocator: AllocatorConfig,
    pub subtractor: SubtractorConfig,
    pub mask: MaskConfig,
    pub detection: DetectionConfig,
    pub overlay: OverlayConfig,
    pub display: DisplayConfig,
}

impl MotionConfig {
    /// Loads `path`, or falls back to the built-in defaults if it doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<MotionConfig> {
        let config = if path.exists() {
            info!("loading config from {}", path.display());
            load_config(path)?
        } else {
            info!("no config at {}, using defaults", path.display());
            MotionConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.mask.validate()?;
        if self.overlay.thickness == 0 {
            return Err(Error::InvalidConfig(
                "overlay.thickness must not be 0".to_string(),
            ));
        }
        // wait_key(0) blocks until a key is pressed
        if self.display.wait_ms < 1 {
            return Err(Error::InvalidConfig(
                "display.wait_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn open_file(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(res) => Ok(res),
        Err(e) => {
            error!("could not load config at {}", path.display());
            Err(e.into())
        }
    }
}

pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = open_file(path)?;
    Ok(toml::from_str(&contents)?)
}
