use serde::Deserialize;
use thiserror::Error;

use crate::util::cwarn;

/// localStorage key holding an optional JSON override of [`ClientConfig`].
pub const CONFIG_STORAGE_KEY: &str = "tetris_client_config";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix joined onto `/api/game/...`; empty means same origin.
    pub api_base: String,
    pub tick_interval_ms: u32,
    /// Repeat period for press-and-hold controls.
    pub repeat_interval_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            tick_interval_ms: 500,
            repeat_interval_ms: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(raw)?;
        config.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "tick_interval_ms",
            });
        }
        if self.repeat_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "repeat_interval_ms",
            });
        }
        self.api_base = self.api_base.trim().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Reads the stored override, falling back to defaults when absent or bad.
    pub fn load() -> Self {
        let Some(raw) = read_stored_config() else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                cwarn(&format!("ignoring stored client config: {err}"));
                Self::default()
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_stored_config() -> Option<String> {
    let window = web_sys::window()?;
    let store = window.local_storage().ok()??;
    store.get_item(CONFIG_STORAGE_KEY).ok()?
}

// Host builds (tests) have no localStorage.
#[cfg(not(target_arch = "wasm32"))]
fn read_stored_config() -> Option<String> {
    None
}
