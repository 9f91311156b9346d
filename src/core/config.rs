//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.xo-user/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct XoConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PathsConfig {
    pub status_file: Option<String>,
    pub device_file: Option<String>,
    pub attr_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub status_file: Option<PathBuf>,
    pub device_file: Option<PathBuf>,
    pub attr_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_STATUS_FILE: &str = "/sys/module/kxo/initstate";
pub const DEFAULT_DEVICE_FILE: &str = "/dev/kxo";
pub const DEFAULT_ATTR_FILE: &str = "/sys/class/kxo/kxo/kxo_state";
pub const DEFAULT_LOG_FILE: &str = "xo-user.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub status_file: PathBuf,
    pub device_file: PathBuf,
    pub attr_file: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Configured level that did not parse, reported once logging is up.
    pub unknown_log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.xo-user/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".xo-user").join("config.toml"))
}

/// Where the loaded config came from.
///
/// Loading happens before the file logger exists, so the outcome is kept
/// here and reported with [`ConfigOrigin::log`] once logging is up.
#[derive(Debug)]
pub enum ConfigOrigin {
    File(PathBuf),
    Generated(PathBuf),
    GenerateFailed(PathBuf, std::io::Error),
    NoHome,
}

impl ConfigOrigin {
    pub fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("Loaded config from {}", path.display()),
            ConfigOrigin::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigOrigin::GenerateFailed(path, e) => {
                warn!("Failed to write default config to {}: {}", path.display(), e)
            }
            ConfigOrigin::NoHome => {
                warn!("Could not determine home directory, using default config")
            }
        }
    }
}

/// Load config from `~/.xo-user/config.toml`.
pub fn load_config() -> Result<(XoConfig, ConfigOrigin), ConfigError> {
    match config_path() {
        Some(path) => load_config_at(&path),
        None => Ok((XoConfig::default(), ConfigOrigin::NoHome)),
    }
}

/// If the file doesn't exist, generates a commented-out default and
/// returns `XoConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_at(path: &Path) -> Result<(XoConfig, ConfigOrigin), ConfigError> {
    if !path.exists() {
        let origin = match generate_default_config(path) {
            Ok(()) => ConfigOrigin::Generated(path.to_path_buf()),
            Err(e) => ConfigOrigin::GenerateFailed(path.to_path_buf(), e),
        };
        return Ok((XoConfig::default(), origin));
    }

    let config = load_config_from(path)?;
    Ok((config, ConfigOrigin::File(path.to_path_buf())))
}

pub fn load_config_from(path: &Path) -> Result<XoConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# xo-user Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [paths]
# status_file = "/sys/module/kxo/initstate"    # Or set XO_STATUS_FILE
# device_file = "/dev/kxo"                     # Or set XO_DEVICE_FILE
# attr_file = "/sys/class/kxo/kxo/kxo_state"   # Or set XO_ATTR_FILE

# [log]
# file = "xo-user.log"                         # Or set XO_LOG_FILE
# level = "info"                               # error, warn, info, debug, trace
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &XoConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup injected.
pub fn resolve_with_env(
    config: &XoConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let pick = |cli_value: &Option<PathBuf>, var: &str, file: &Option<String>, default: &str| {
        cli_value
            .clone()
            .or_else(|| env(var).map(PathBuf::from))
            .or_else(|| file.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(default))
    };

    let status_file = pick(
        &cli.status_file,
        "XO_STATUS_FILE",
        &config.paths.status_file,
        DEFAULT_STATUS_FILE,
    );
    let device_file = pick(
        &cli.device_file,
        "XO_DEVICE_FILE",
        &config.paths.device_file,
        DEFAULT_DEVICE_FILE,
    );
    let attr_file = pick(
        &cli.attr_file,
        "XO_ATTR_FILE",
        &config.paths.attr_file,
        DEFAULT_ATTR_FILE,
    );
    let log_file = pick(&cli.log_file, "XO_LOG_FILE", &config.log.file, DEFAULT_LOG_FILE);

    let configured_level = config.log.level.as_deref();
    let parsed_level = configured_level.and_then(|level| level.parse::<LevelFilter>().ok());
    let unknown_log_level = match (configured_level, parsed_level) {
        (Some(level), None) => Some(level.to_string()),
        _ => None,
    };

    // --verbose always wins over the configured level
    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        parsed_level.unwrap_or(LevelFilter::Info)
    };

    ResolvedConfig {
        status_file,
        device_file,
        attr_file,
        log_file,
        log_level,
        unknown_log_level,
    }
}
