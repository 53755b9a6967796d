use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::pagination::INITIAL_DISPLAY_COUNT;
use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Where the slang list comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// An `http(s)://` URL or a local path to a JSON array of entries.
    #[serde(default = "default_source")]
    pub source: String,
    /// Upper bound on the startup fetch before falling back to sample data.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Directory (or base URL) that entry audio filenames are resolved against.
    #[serde(default = "default_audio_base")]
    pub base: String,
    /// Player binary name or path.
    #[serde(default = "default_player")]
    pub player: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// How many entries the dictionary list shows before "view all".
    #[serde(default = "default_initial_count")]
    pub initial_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Holds the favorites slot and the log file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl DataConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            base: default_audio_base(),
            player: default_player(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            initial_count: default_initial_count(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_source() -> String {
    "data/slangs.json".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_audio_base() -> String {
    "assets/audio/".to_string()
}

fn default_player() -> String {
    "mpv".to_string()
}

fn default_initial_count() -> usize {
    INITIAL_DISPLAY_COUNT
}

fn default_data_dir() -> PathBuf {
    platform::data_dir()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            audio: AudioConfig::default(),
            display: DisplayConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}
