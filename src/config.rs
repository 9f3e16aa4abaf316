//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/ipgraph/config.toml` (XDG) or platform config dir
//! 2. Project config: `.ipgraph.toml`
//! 3. Environment variables: `IPGRAPH_*`, with `__` separating the section
//!    from the key (e.g. `IPGRAPH_CACHE__TTL_SECS=30`)
//!
//! Every field has a default, so the crate works with no config present:
//!
//! ```toml
//! [cache]
//! ttl_secs = 60
//!
//! [fetch]
//! max_depth = 3
//! include_disputes = false
//! include_siblings = false
//!
//! [ui]
//! debounce_ms = 150
//! ```

use std::ops::Deref;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::source::FetchOptions;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Response cache tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Staleness window for cached relationship responses, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Defaults for upstream relationship fetches.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default)]
    pub include_disputes: bool,
    #[serde(default)]
    pub include_siblings: bool,
}

impl FetchConfig {
    /// Fetch options derived from the configured defaults.
    pub fn options(&self) -> FetchOptions {
        FetchOptions {
            max_depth: self.max_depth,
            include_disputes: self.include_disputes,
            include_siblings: self.include_siblings,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            include_disputes: false,
            include_siblings: false,
        }
    }
}

/// Input-boundary tuning for the UI bindings.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Quiet window applied to filter-control input before store writes.
    /// A tuning knob, not a correctness requirement.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl UiConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    60
}

fn default_max_depth() -> u32 {
    3
}

fn default_debounce_ms() -> u64 {
    150
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        let user_config = Self::user_config_path();

        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(".ipgraph.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("IPGRAPH_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/ipgraph/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("ipgraph").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("ipgraph").join("config.toml"))
            .unwrap_or_default()
    }
}
