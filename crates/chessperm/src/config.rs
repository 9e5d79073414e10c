//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes: `{"password": {"min_chars": 12}}` is a complete config.

use chessperm_core::{Argon2Params, Canonicalizer, DEFAULT_MIN_PASSWORD_CHARS};
use chessperm_stego::{DEFAULT_CARRIER_HEIGHT, DEFAULT_CARRIER_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

/// Configuration for the [`Engine`](crate::Engine).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Password policy and stretching cost.
    pub password: PasswordPolicy,
    /// Synthesized carrier settings.
    pub carrier: CarrierConfig,
}

/// Password acceptance and Argon2id cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum length in characters after trimming.
    pub min_chars: usize,
    /// Argon2id cost parameters.
    pub argon2: Argon2Params,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_PASSWORD_CHARS,
            argon2: Argon2Params::default(),
        }
    }
}

/// Dimensions of the carrier synthesized when the caller supplies none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CARRIER_WIDTH,
            height: DEFAULT_CARRIER_HEIGHT,
        }
    }
}

impl EngineConfig {
    /// Production defaults with the cheapest Argon2 cost. Tests only.
    pub fn for_tests() -> Self {
        Self {
            password: PasswordPolicy {
                argon2: Argon2Params::insecure_fast(),
                ..PasswordPolicy::default()
            },
            carrier: CarrierConfig::default(),
        }
    }

    /// Parse a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Build the canonicalizer this config describes.
    pub fn canonicalizer(&self) -> Canonicalizer {
        Canonicalizer::new(self.password.argon2, self.password.min_chars)
    }
}
