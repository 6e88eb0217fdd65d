use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::fetcher;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub max_new_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_key: None,
            api_url: None,
            model: None,
            max_new_tokens: None,
            temperature: None,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    /// The bearer credential for the inference API. Checks the HF_API_KEY
    /// env var first, then the config file. There is no built-in default:
    /// startup fails with an explicit error when no key is found.
    pub fn resolve_api_key(&self) -> Result<String> {
        std::env::var("HF_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "no Hugging Face API key found; set HF_API_KEY or add \"api_key\" to {}",
                    Self::get_config_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "the config file".to_string())
                )
            })
    }

    /// The model queried when neither the CLI nor the config names one
    pub fn resolve_model(&self, override_model: Option<String>) -> String {
        override_model
            .or_else(|| self.model.clone())
            .unwrap_or_else(|| fetcher::DEFAULT_MODEL.to_string())
    }

    /// The full endpoint URL: an explicit URL wins, otherwise it is derived
    /// from the model name.
    pub fn resolve_api_url(&self, override_url: Option<String>, model: &str) -> String {
        override_url
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| fetcher::model_url(model))
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Default log file location, next to the config file
    pub fn default_log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("hf-chat.log"))
    }

    fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("hf-chat"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
