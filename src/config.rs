//! Watermark configuration.
//!
//! Everything the top-level [`crate::Watermark`] handle needs: the radix,
//! the emission seed, and how scripts are spelled when rendered as text.
//! All fields have defaults, so partial JSON documents are accepted.

use serde::{Deserialize, Serialize};
use crate::codec::MAX_RADIX;
use crate::{Error, Result};

/// Radix used when none is configured.
pub const DEFAULT_RADIX: u64 = 7;

/// Spelling of variables and slots in rendered scripts.
///
/// With the defaults, node 3's variable is `id3` and the slot path
/// "next, then digit" is `.v1.v0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStyle {
    pub variable_prefix: String,
    pub field_prefix: String,
}

impl Default for ScriptStyle {
    fn default() -> Self {
        Self {
            variable_prefix: "id".into(),
            field_prefix: "v".into(),
        }
    }
}

impl ScriptStyle {
    pub fn validate(&self) -> Result<()> {
        for (what, prefix) in [("variable_prefix", &self.variable_prefix), ("field_prefix", &self.field_prefix)] {
            let mut chars = prefix.chars();
            let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
            if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::Config(format!("{what} {prefix:?} is not an identifier prefix")));
            }
        }
        Ok(())
    }
}

/// Configuration for embedding and extracting watermarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Base the value is encoded in; also the minimum node count.
    pub radix: u64,
    /// Seed for the statement emission order.
    pub seed: u64,
    pub style: ScriptStyle,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            radix: DEFAULT_RADIX,
            seed: 0,
            style: ScriptStyle::default(),
        }
    }
}

impl WatermarkConfig {
    pub fn with_radix(mut self, radix: u64) -> Self {
        self.radix = radix;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_style(mut self, style: ScriptStyle) -> Self {
        self.style = style;
        self
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.radix < 2 {
            return Err(Error::InvalidRadix { radix: self.radix });
        }
        if self.radix > MAX_RADIX {
            return Err(Error::RadixTooLarge { radix: self.radix, max: MAX_RADIX });
        }
        self.style.validate()
    }
}
