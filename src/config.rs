//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tstree/tstree.toml`
//! 3. Explicit config file (`--config`), must exist
//! 4. Environment variables: `TSTREE_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::PatternSyntax;

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "TSTREE";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("config error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Unified configuration for tstree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Pattern language for partial matches (regex, search or glob)
    pub pattern_syntax: PatternSyntax,
    /// Draw the menu banner before each prompt
    pub banner: bool,
    /// Colored terminal output (NO_COLOR still wins)
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pattern_syntax: PatternSyntax::Regex,
            banner: true,
            color: true,
        }
    }
}

/// Get the XDG config directory for tstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tstree.toml"))
}

impl Settings {
    /// Load settings with layered precedence from the real environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        SettingsLoader::new()
            .global(global_config_path())
            .file(config_file.map(Path::to_path_buf))
            .load()
    }

    /// Render as TOML, the format of the config files.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Commented template for `config init`.
    pub fn template() -> Result<String, SettingsError> {
        let body = Settings::default().to_toml()?;
        Ok(format!(
            "# tstree configuration\n\
             # pattern_syntax: \"regex\" (whole key), \"search\" (anywhere in key) or \"glob\"\n\
             # environment overrides: {ENV_PREFIX}_PATTERN_SYNTAX, {ENV_PREFIX}_BANNER, {ENV_PREFIX}_COLOR\n\n{body}"
        ))
    }
}

/// Builder for the layered load.
///
/// Each layer can be replaced, so tests can point at temporary files and
/// supply environment variables without touching the process environment.
#[derive(Debug, Default)]
pub struct SettingsLoader {
    global: Option<PathBuf>,
    file: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global config file; skipped when absent on disk.
    pub fn global(mut self, path: Option<PathBuf>) -> Self {
        self.global = path;
        self
    }

    /// Explicit config file; loading fails when it does not exist.
    pub fn file(mut self, path: Option<PathBuf>) -> Self {
        self.file = path;
        self
    }

    /// Use `vars` instead of the process environment.
    pub fn env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    #[instrument(level = "debug")]
    pub fn load(self) -> Result<Settings, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("pattern_syntax", defaults.pattern_syntax.to_string())?
            .set_default("banner", defaults.banner)?
            .set_default("color", defaults.color)?;

        if let Some(global) = self.global {
            if global.exists() {
                debug!("global config: {}", global.display());
                builder = builder.add_source(File::from(global).format(FileFormat::Toml));
            }
        }

        if let Some(file) = self.file {
            if !file.exists() {
                return Err(SettingsError::NotFound(file));
            }
            debug!("config file: {}", file.display());
            builder = builder.add_source(File::from(file).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(self.env),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }
}
