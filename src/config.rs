use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".ctxlaterc.json";

/// Environment variables holding the generation service credential, in
/// lookup order.
pub const API_KEY_ENV_VARS: &[&str] = &["CTXLATE_API_KEY", "OPENROUTER_API_KEY"];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Target locale code, e.g. `zh-CN`.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Source-language dictionary, relative to the source root.
    #[serde(default = "default_messages_file")]
    pub messages_file: String,
    /// Translated dictionary, relative to the source root.
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_file: Option<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Identifier of the translation function, matched exactly.
    #[serde(default = "default_translation_function")]
    pub translation_function: String,
    /// Terms the generation service must leave untranslated.
    #[serde(default)]
    pub preserve_terms: Vec<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of an OpenAI-compatible chat completions API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_secs: Option<u64>,
    #[serde(default)]
    pub max_retries: u32,
}

fn default_locale() -> String {
    "zh-CN".to_string()
}

fn default_messages_file() -> String {
    "messages/en.json".to_string()
}

fn default_output_file() -> String {
    "translations.json".to_string()
}

fn default_translation_function() -> String {
    "t".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_endpoint() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_max_concurrency() -> usize {
    8
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            messages_file: default_messages_file(),
            output_file: default_output_file(),
            evidence_file: None,
            ignores: Vec::new(),
            translation_function: default_translation_function(),
            preserve_terms: Vec::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            max_concurrency: default_max_concurrency(),
            request_timeout_secs: default_request_timeout_secs(),
            deadline_secs: None,
            max_retries: 0,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Patterns in `ignores` without `*` or `?` are literal paths, so
    /// `app/[locale]` is valid without escaping.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if self.translation_function.trim().is_empty() {
            bail!("'translationFunction' must not be empty");
        }
        if self.max_concurrency == 0 {
            bail!("'maxConcurrency' must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            bail!("'requestTimeoutSecs' must be at least 1");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

/// API credential from the environment, skipping empty values.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
