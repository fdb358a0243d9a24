//! Application configuration.
//!
//! Values are layered: compiled defaults, then the optional
//! `config.toml` under the user's config directory, then `TABLEBOOK_*`
//! environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::store::StoreLimits;

/// Directory under `~/.config` holding the configuration file.
pub const CONFIG_DIR: &str = "tablebook";
/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";
/// Upper bound on roster size.
pub const DEFAULT_MAX_TABLES: usize = 30;
/// Upper bound on simultaneously active reservations.
pub const DEFAULT_MAX_RESERVATIONS: usize = 50;
/// Log directory, relative to the working directory unless absolute.
pub const DEFAULT_LOG_DIR: &str = "logs";

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tablebook configuration
#
# Every key can also be set through the environment, e.g.
# TABLEBOOK_MAX_RESERVATIONS=10

# Largest table number the store accepts.
max_tables = 30

# Maximum number of reservations held at once.
max_reservations = 50

# Where the log file is written.
log_dir = "logs"
"#;

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Largest table number accepted; also bounds the roster size.
    pub max_tables: usize,
    /// Maximum number of simultaneously active reservations.
    pub max_reservations: usize,
    /// Directory for `tablebook.log`.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_tables: DEFAULT_MAX_TABLES,
            max_reservations: DEFAULT_MAX_RESERVATIONS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl AppConfig {
    /// Load from the default config file and the environment.
    pub fn load() -> Result<Self> {
        Self::build(Some(&default_config_path()), true)
    }

    /// Load from an explicit file, ignoring the environment.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(Some(path.as_ref()), false)
    }

    fn build(file: Option<&Path>, with_env: bool) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("max_tables", DEFAULT_MAX_TABLES as i64)?
            .set_default("max_reservations", DEFAULT_MAX_RESERVATIONS as i64)?
            .set_default("log_dir", DEFAULT_LOG_DIR)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        if with_env {
            builder = builder.add_source(Environment::with_prefix("TABLEBOOK").try_parsing(true));
        }

        let config: AppConfig = builder
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_tables == 0 {
            bail!("max_tables must be at least 1");
        }
        if self.max_reservations == 0 {
            bail!("max_reservations must be at least 1");
        }
        Ok(())
    }

    /// Store bounds described by this configuration.
    pub fn limits(&self) -> StoreLimits {
        StoreLimits {
            max_tables: self.max_tables,
            max_reservations: self.max_reservations,
        }
    }
}

/// Location of the default configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented default configuration unless a file already exists.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = default_config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.limits(), StoreLimits::default());
        Ok(())
    }

    #[test]
    fn file_overrides_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "max_reservations = 5\nlog_dir = \"/tmp/tablebook\"\n")?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.max_tables, DEFAULT_MAX_TABLES);
        assert_eq!(config.max_reservations, 5);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/tablebook"));
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "max_tables = 25\nmax_reservations = 5\n")?;

        std::env::set_var("TABLEBOOK_MAX_RESERVATIONS", "7");
        let layered = AppConfig::build(Some(&path), true);
        let file_only = AppConfig::load_from(&path);
        std::env::remove_var("TABLEBOOK_MAX_RESERVATIONS");

        let layered = layered?;
        assert_eq!(layered.max_reservations, 7);
        assert_eq!(layered.max_tables, 25);
        assert_eq!(file_only?.max_reservations, 5);
        Ok(())
    }

    #[test]
    fn zero_limits_are_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "max_tables = 0\n")?;
        assert!(AppConfig::load_from(&path).is_err());
        Ok(())
    }

    #[test]
    fn default_template_parses_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);
        write_default_config(&path)?;
        assert!(path.exists());
        assert_eq!(AppConfig::load_from(&path)?, AppConfig::default());

        fs::write(&path, "max_tables = 12\n")?;
        write_default_config(&path)?;
        assert_eq!(AppConfig::load_from(&path)?.max_tables, 12);
        Ok(())
    }
}
