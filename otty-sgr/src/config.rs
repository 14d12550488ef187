use serde::{Deserialize, Serialize};

use crate::color::TextAttribute;
use crate::error::Result;

/// Settings shared by every decoder built from the same configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SgrConfig {
    /// Attribute restored by `0`, `39` and `49`.
    pub default_attr: TextAttribute,
    /// Attribute active before the first sequence of a text is seen.
    pub initial_attr: TextAttribute,
}

impl SgrConfig {
    /// Load the configuration from a JSON document.
    ///
    /// Missing keys fall back to their defaults, colors are written as
    /// `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`SgrError::Config`](crate::SgrError::Config) when the
    /// document is not valid JSON or a color is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
