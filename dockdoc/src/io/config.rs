//! Analyzer configuration stored in `dockdoc.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "dockdoc.toml";

/// Analyzer configuration (TOML).
///
/// Every field is optional on disk; missing fields take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DockdocConfig {
    /// Where the generated Markdown report is written.
    pub output_path: PathBuf,

    pub explainer: ExplainerSettings,
}

/// Connection and model settings for the explanation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExplainerSettings {
    /// Model identifier sent with each request.
    pub model: String,

    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub api_base_url: String,

    /// Environment variable holding the bearer token.
    pub api_key_env: String,

    /// Transport timeout for a single request.
    pub request_timeout_secs: u64,

    pub generation: GenerationParams,
}

/// Fixed sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub max_completion_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            max_completion_tokens: 1000,
        }
    }
}

impl Default for ExplainerSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            api_base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            request_timeout_secs: 120,
            generation: GenerationParams::default(),
        }
    }
}

impl Default for DockdocConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("README.md"),
            explainer: ExplainerSettings::default(),
        }
    }
}

impl DockdocConfig {
    pub fn validate(&self) -> Result<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(anyhow!("output_path must be non-empty"));
        }
        self.explainer.validate()
    }
}

impl ExplainerSettings {
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(anyhow!("explainer.model must be non-empty"));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(anyhow!("explainer.api_base_url must be non-empty"));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(anyhow!("explainer.api_key_env must be non-empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("explainer.request_timeout_secs must be > 0"));
        }
        self.generation.validate()
    }
}

impl GenerationParams {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow!("generation.temperature must be within [0, 2]"));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(anyhow!("generation.top_p must be within (0, 1]"));
        }
        if !(-2.0..=2.0).contains(&self.frequency_penalty) {
            return Err(anyhow!("generation.frequency_penalty must be within [-2, 2]"));
        }
        if !(-2.0..=2.0).contains(&self.presence_penalty) {
            return Err(anyhow!("generation.presence_penalty must be within [-2, 2]"));
        }
        if self.max_completion_tokens == 0 {
            return Err(anyhow!("generation.max_completion_tokens must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DockdocConfig::default()`.
pub fn load_config(path: &Path) -> Result<DockdocConfig> {
    if !path.exists() {
        let cfg = DockdocConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DockdocConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &DockdocConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    crate::io::write_atomic(path, &buf)
}
