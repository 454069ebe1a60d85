//! Configuration system for userstore.
//!
//! This module provides the configuration structure for userstore with sensible
//! defaults and serde support. Configuration is loaded from a TOML file and
//! merged with command-line arguments in `main`.
//!
//! # Example
//!
//! ```
//! use userstore::config::Config;
//! use userstore::file::format::Format;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.format, Format::Json);
//! assert_eq!(config.indent_size, 4);
//!
//! // Create custom configuration
//! let custom = Config {
//!     format: Format::Xml,
//!     pause_between_steps: false,
//!     ..Config::default()
//! };
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::file::format::Format;

/// Configuration for the userstore application.
///
/// All fields have defaults via `Config::default()`, and any field missing
/// from a config file falls back to its default.
///
/// # Fields
///
/// * `format` - Which variant runs when `--format` is not given (default: json)
/// * `json_source` - JSON template (default: "data/datos_usuarios_orig.json")
/// * `json_destination` - JSON working file (default: "data/datos_usuarios.json")
/// * `xml_source` - XML template (default: "data/datos_usuarios_orig.xml")
/// * `xml_destination` - XML working file (default: "data/datos_usuarios.xml")
/// * `indent_size` - Spaces per indentation level when saving (default: 4)
/// * `create_backup` - Create .bak files before saving (default: false)
/// * `pause_between_steps` - Wait for a keypress between demo steps (default: true)
/// * `clear_screen` - Clear the terminal when the session starts (default: true)
/// * `root_element` - Container name for a collection created from scratch (default: "usuarios")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default storage format
    #[serde(default)]
    pub format: Format,

    /// JSON template copied into the working file
    #[serde(default = "default_json_source")]
    pub json_source: PathBuf,

    /// JSON working file
    #[serde(default = "default_json_destination")]
    pub json_destination: PathBuf,

    /// XML template copied into the working file
    #[serde(default = "default_xml_source")]
    pub xml_source: PathBuf,

    /// XML working file
    #[serde(default = "default_xml_destination")]
    pub xml_destination: PathBuf,

    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Wait for a keypress between steps
    #[serde(default = "default_true")]
    pub pause_between_steps: bool,

    /// Clear the terminal at startup
    #[serde(default = "default_true")]
    pub clear_screen: bool,

    /// Container name used when no file could be loaded
    #[serde(default = "default_root_element")]
    pub root_element: String,
}

fn default_json_source() -> PathBuf {
    PathBuf::from("data/datos_usuarios_orig.json")
}

fn default_json_destination() -> PathBuf {
    PathBuf::from("data/datos_usuarios.json")
}

fn default_xml_source() -> PathBuf {
    PathBuf::from("data/datos_usuarios_orig.xml")
}

fn default_xml_destination() -> PathBuf {
    PathBuf::from("data/datos_usuarios.xml")
}

fn default_indent_size() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_root_element() -> String {
    crate::document::record::DEFAULT_ROOT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: Format::default(),
            json_source: default_json_source(),
            json_destination: default_json_destination(),
            xml_source: default_xml_source(),
            xml_destination: default_xml_destination(),
            indent_size: default_indent_size(),
            create_backup: false,
            pause_between_steps: true,
            clear_screen: true,
            root_element: default_root_element(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/userstore/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("userstore");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        Self::load_from(&config_path).unwrap_or_else(|err| {
            tracing::warn!("ignoring config file: {:#}", err);
            Self::default()
        })
    }

    /// Loads configuration from an explicit file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to an explicit file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Returns the `(source, destination)` pair for a format.
    pub fn paths_for(&self, format: Format) -> (&Path, &Path) {
        match format {
            Format::Json => (&self.json_source, &self.json_destination),
            Format::Xml => (&self.xml_source, &self.xml_destination),
        }
    }
}
