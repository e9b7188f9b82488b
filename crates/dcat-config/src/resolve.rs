//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG paths → system → defaults.

use std::path::{Path, PathBuf};

use crate::prior::PriorConfig;
use crate::validate::{validate_prior, ValidationResult};

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/dcat/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Outcome of prior path discovery.
#[derive(Debug, Clone, Default)]
pub struct ResolvedPrior {
    /// Path to the prior file (None means builtin default).
    pub path: Option<PathBuf>,

    /// Source of the prior, for diagnostics.
    pub source: ConfigSource,
}

/// Environment variable names.
pub const ENV_PRIOR_PATH: &str = "DCAT_PRIOR";
pub const ENV_CONFIG_DIR: &str = "DCAT_CONFIG_DIR";

/// Standard config file name.
pub const PRIOR_FILENAME: &str = "prior.json";

/// Application name for XDG directories.
const APP_NAME: &str = "dcat";

/// Resolve the prior file path.
///
/// Resolution order:
/// 1. Explicit CLI path (taken as-is; a missing file is reported on load)
/// 2. DCAT_PRIOR environment variable
/// 3. DCAT_CONFIG_DIR environment variable + prior.json
/// 4. XDG config directory (~/.config/dcat/prior.json)
/// 5. System config (/etc/dcat/prior.json)
/// 6. Built-in default (None)
pub fn resolve_prior(cli_path: Option<&Path>) -> ResolvedPrior {
    if let Some(path) = cli_path {
        return ResolvedPrior {
            path: Some(path.to_path_buf()),
            source: ConfigSource::CliArgument,
        };
    }

    if let Ok(env_path) = std::env::var(ENV_PRIOR_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(PRIOR_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(PRIOR_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    let system_path = system_config_dir().join(PRIOR_FILENAME);
    if system_path.exists() {
        return found(system_path, ConfigSource::SystemConfig);
    }

    ResolvedPrior::default()
}

fn found(path: PathBuf, source: ConfigSource) -> ResolvedPrior {
    ResolvedPrior {
        path: Some(path),
        source,
    }
}

/// Resolve, load, and validate the prior.
///
/// Falls back to [`PriorConfig::default`] when no file is found.
pub fn load_prior(cli_path: Option<&Path>) -> ValidationResult<(PriorConfig, ResolvedPrior)> {
    let resolved = resolve_prior(cli_path);
    let prior = match &resolved.path {
        Some(path) => PriorConfig::from_file(path)?,
        None => PriorConfig::default(),
    };
    validate_prior(&prior)?;
    Ok((prior, resolved))
}

/// Get the XDG config directory for dcat.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
