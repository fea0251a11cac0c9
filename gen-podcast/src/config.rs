// gen-podcast configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_STAGING_DIR: &str = "staging";
const DEFAULT_OUTPUT_DIR: &str = "podcasts";
const DEFAULT_SCRIPT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TITLE_MODEL: &str = "gpt-4o";
const DEFAULT_TTS_MODEL: &str = "tts-1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastConfig {
    /// Directory holding prompt templates and sound assets
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Working directory for in-progress clips
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Directory for finished podcasts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Model used for script generation
    #[serde(default = "default_script_model")]
    pub script_model: String,

    /// Model used for title generation
    #[serde(default = "default_title_model")]
    pub title_model: String,

    /// Model used for speech synthesis
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ASSETS_DIR)
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STAGING_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_script_model() -> String {
    DEFAULT_SCRIPT_MODEL.to_string()
}

fn default_title_model() -> String {
    DEFAULT_TITLE_MODEL.to_string()
}

fn default_tts_model() -> String {
    DEFAULT_TTS_MODEL.to_string()
}

impl Default for PodcastConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            staging_dir: default_staging_dir(),
            output_dir: default_output_dir(),
            script_model: default_script_model(),
            title_model: default_title_model(),
            tts_model: default_tts_model(),
        }
    }
}

impl PodcastConfig {
    /// Get the config file path: ~/.config/cli-programs/gen-podcast.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("gen-podcast.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: PodcastConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}
