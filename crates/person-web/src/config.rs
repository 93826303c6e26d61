use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// `<data_dir>/person-web/state.json`, or `./person-web-state.json` when the
/// platform has no data directory.
pub fn default_state_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("person-web").join("state.json"))
        .unwrap_or_else(|| PathBuf::from("person-web-state.json"))
}

/// Server settings, read from an optional TOML file and then overridden by
/// command-line flags.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// `None` keeps everything in memory.
    #[serde(default = "default_state_file_opt")]
    pub state_file: Option<PathBuf>,

    /// Disables the state file, whatever `state_file` says.
    #[serde(default)]
    pub in_memory: bool,

    /// Write the `/test` record at startup.
    #[serde(default)]
    pub seed_on_start: bool,
}

fn default_state_file_opt() -> Option<PathBuf> {
    Some(default_state_file())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            state_file: default_state_file_opt(),
            in_memory: false,
            seed_on_start: false,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        if config.in_memory {
            config.state_file = None;
        }
        Ok(config)
    }
}
