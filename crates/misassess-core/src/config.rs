//! misassess configuration.
//!
//! Every field has a default, so a missing config file is not an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the config file searched for in the current directory.
pub const CONFIG_FILE_NAME: &str = "misassess.toml";

/// Top-level misassess configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessConfig {
    /// Question bank to use instead of the built-in one.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
    /// Output directory for exported summaries and reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Command that receives the summary on stdin to place it on the clipboard.
    #[serde(default)]
    pub clipboard_command: Option<String>,
    /// How long the clipboard command may run, in milliseconds.
    #[serde(default = "default_clipboard_timeout")]
    pub clipboard_timeout_ms: u64,
    /// How long "Copied." stays visible, in milliseconds.
    #[serde(default = "default_copied_status")]
    pub copied_status_ms: u64,
    /// How long the copy-failure status stays visible, in milliseconds.
    #[serde(default = "default_copy_failed_status")]
    pub copy_failed_status_ms: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./misassess-results")
}
fn default_clipboard_timeout() -> u64 {
    2000
}
fn default_copied_status() -> u64 {
    1500
}
fn default_copy_failed_status() -> u64 {
    2500
}

impl Default for AssessConfig {
    fn default() -> Self {
        Self {
            question_bank: None,
            output_dir: default_output_dir(),
            clipboard_command: None,
            clipboard_timeout_ms: default_clipboard_timeout(),
            copied_status_ms: default_copied_status(),
            copy_failed_status_ms: default_copy_failed_status(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again. An unterminated `${` is kept as is.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order without an explicit path:
/// 1. `misassess.toml` in the current directory
/// 2. `~/.config/misassess/config.toml`
///
/// Environment variable override: `MISASSESS_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<AssessConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => AssessConfig::default(),
    };

    if let Ok(dir) = std::env::var("MISASSESS_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Parse a config document and resolve `${VAR}` references in it.
pub fn parse_config(content: &str) -> Result<AssessConfig> {
    let mut config: AssessConfig = toml::from_str(content)?;
    config.question_bank = config.question_bank.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);
    config.clipboard_command = config
        .clipboard_command
        .as_deref()
        .map(resolve_env_vars);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("misassess"))
}
