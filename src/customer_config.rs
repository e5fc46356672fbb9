//! Customer branding configuration.
//!
//! The file is a flat JSON object edited outside this service:
//!
//! ```json
//! { "customer_name": "Acme", "background_color": "#E9F7EF", "button_color": "#17A2B8" }
//! ```
//!
//! Loading never fails the process. Missing or `null` keys fall back one by
//! one, and a missing or unreadable file yields [`CustomerConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Relative location of the config file under the base directory.
pub const CONFIG_FILE: &str = "config/customer_config.json";

pub const DEFAULT_CUSTOMER_NAME: &str = "LinkedIn Post Generator";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#E9F7EF";
pub const DEFAULT_BUTTON_COLOR: &str = "#17A2B8";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCustomerConfig")]
pub struct CustomerConfig {
    pub customer_name: String,
    pub background_color: String,
    pub button_color: String,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            customer_name: DEFAULT_CUSTOMER_NAME.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            button_color: DEFAULT_BUTTON_COLOR.to_string(),
        }
    }
}

/// File shape: every key may be absent or `null`.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawCustomerConfig {
    customer_name: Option<String>,
    background_color: Option<String>,
    button_color: Option<String>,
}

impl From<RawCustomerConfig> for CustomerConfig {
    fn from(raw: RawCustomerConfig) -> Self {
        let defaults = Self::default();
        Self {
            customer_name: raw.customer_name.unwrap_or(defaults.customer_name),
            background_color: raw.background_color.unwrap_or(defaults.background_color),
            button_color: raw.button_color.unwrap_or(defaults.button_color),
        }
    }
}

impl CustomerConfig {
    /// Load the config, falling back to defaults with a warning on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                debug!("Loaded customer config from {}", path.display());
                config.sanitized()
            }
            Err(e) => {
                warn!("Using default customer config: {}", e);
                Self::default()
            }
        }
    }

    /// Strict variant of [`CustomerConfig::load`]. Colors are not sanitized.
    pub fn try_load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace implausible color values with their defaults.
    ///
    /// Colors end up inside `<style>` blocks and `style` attributes, so
    /// anything that could close the declaration is rejected.
    pub fn sanitized(mut self) -> Self {
        if !is_css_color(&self.background_color) {
            warn!(
                "Ignoring invalid background_color {:?}, using {}",
                self.background_color, DEFAULT_BACKGROUND_COLOR
            );
            self.background_color = DEFAULT_BACKGROUND_COLOR.to_string();
        }
        if !is_css_color(&self.button_color) {
            warn!(
                "Ignoring invalid button_color {:?}, using {}",
                self.button_color, DEFAULT_BUTTON_COLOR
            );
            self.button_color = DEFAULT_BUTTON_COLOR.to_string();
        }
        self
    }

    /// Hover shade for buttons: `#RRGGBB` gets a `CC` alpha suffix.
    pub fn button_hover_color(&self) -> String {
        let c = &self.button_color;
        if c.len() == 7 && c.starts_with('#') && c[1..].chars().all(|ch| ch.is_ascii_hexdigit()) {
            format!("{c}CC")
        } else {
            c.clone()
        }
    }
}

fn is_css_color(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "#(),.% -".contains(c))
}
