//! Configuration file management for ditto.
//!
//! Provides a TOML-based config file at `~/.config/ditto/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ditto_core::Plan;
use ditto_core::labels::{LabelOption, LabelRegistry};

/// Environment variable overriding the configured plan.
pub const PLAN_ENV: &str = "DITTO_PLAN";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub dashboard: DashboardSection,
    /// Replaces the built-in label list when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<LabelOption>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardSection {
    pub plan: String,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            plan: Plan::Starter.to_string(),
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the ditto config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/ditto` or `~/.config/ditto`,
/// including on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("ditto");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ditto")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load the config file, or `None` when there is none.
///
/// A file that exists but does not parse is an error.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file");
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    tracing::info!(path = %path.display(), "wrote config file");
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct DittoConfig {
    pub plan: Plan,
    pub labels: LabelRegistry,
}

impl DittoConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Plan: `cli_plan` > `DITTO_PLAN` env > `dashboard.plan` > `starter`
    /// - Labels: `[[labels]]` when present, otherwise the built-in list
    pub fn resolve(cli_plan: Option<Plan>) -> Result<Self> {
        let file_config = load_config()?;

        let plan = if let Some(plan) = cli_plan {
            plan
        } else if let Ok(raw) = std::env::var(PLAN_ENV) {
            raw.parse()
                .with_context(|| format!("{PLAN_ENV} env var is not a valid plan"))?
        } else if let Some(ref cfg) = file_config {
            cfg.dashboard
                .plan
                .parse()
                .context("invalid dashboard.plan in config file")?
        } else {
            Plan::Starter
        };

        let labels = match file_config {
            Some(cfg) if !cfg.labels.is_empty() => LabelRegistry::new(cfg.labels),
            _ => LabelRegistry::default(),
        };

        tracing::debug!(%plan, labels = labels.labels().len(), "resolved config");
        Ok(Self { plan, labels })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
