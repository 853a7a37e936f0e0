//! Tutor Configuration
//!
//! Config file: ~/.config/physics-tutor/config.toml or
//! /etc/physics-tutor/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "TUTOR_CONFIG";

/// Class whose individuals populate the concept selector
pub const DEFAULT_CONCEPT_CLASS: &str = "PhysicsConcept";

/// Ontology file used when neither config nor CLI name one, relative to
/// the working directory (the bundled ontology when run from the repo root)
pub const DEFAULT_ONTOLOGY_FILE: &str = "data/physics_laws_ontology.toml";

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Where the ontology lives and which class lists the concepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyConfig {
    #[serde(default = "default_ontology_path")]
    pub path: PathBuf,

    #[serde(default = "default_concept_class")]
    pub concept_class: String,
}

fn default_ontology_path() -> PathBuf {
    PathBuf::from(DEFAULT_ONTOLOGY_FILE)
}

fn default_concept_class() -> String {
    DEFAULT_CONCEPT_CLASS.to_string()
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            path: default_ontology_path(),
            concept_class: default_concept_class(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "warn" or "tutor_common=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file; the TUI logs nowhere without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main tutor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorConfig {
    #[serde(default)]
    pub ontology: OntologyConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TutorConfig {
    /// Get default user config path: ~/.config/physics-tutor/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("physics-tutor").join("config.toml"))
    }

    /// Get system config path: /etc/physics-tutor/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/physics-tutor/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. `explicit` path (from --config)
    /// 2. $TUTOR_CONFIG
    /// 3. User config
    /// 4. System config
    /// 5. Defaults
    ///
    /// An explicitly named file must exist; the fallbacks are skipped when
    /// absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Self::load_from(Path::new(&path));
            }
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from(&system_path);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: TutorConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Apply the --ontology command-line override
    pub fn with_ontology_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.ontology.path = path;
        }
        self
    }

    /// Set output color mode
    pub fn set_color_mode(&mut self, mode: &str) -> Result<()> {
        self.output.color = match mode.to_lowercase().as_str() {
            "auto" => ColorMode::Auto,
            "always" | "on" | "yes" | "true" => ColorMode::Always,
            "never" | "off" | "none" | "no" | "false" => ColorMode::Never,
            _ => anyhow::bail!("Invalid color mode: '{}'. Valid values: auto, always, never", mode),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TutorConfig::default();
        assert_eq!(
            config.ontology.path,
            PathBuf::from("data/physics_laws_ontology.toml")
        );
        assert_eq!(config.ontology.concept_class, DEFAULT_CONCEPT_CLASS);
        assert_eq!(config.output.color, ColorMode::Auto);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TutorConfig = toml::from_str(
            r#"
[ontology]
path = "/srv/tutor/mechanics.json"
"#,
        )
        .unwrap();
        assert_eq!(config.ontology.path, PathBuf::from("/srv/tutor/mechanics.json"));
        assert_eq!(config.ontology.concept_class, DEFAULT_CONCEPT_CLASS);
        assert_eq!(config.output.color, ColorMode::Auto);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[output]\ncolor = \"never\"\n\n[logging]\nlevel = \"debug\"\nfile = \"/tmp/tutor.log\""
        )
        .unwrap();

        let config = TutorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.output.color, ColorMode::Never);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/tutor.log")));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let err = TutorConfig::load(Some(Path::new("/nonexistent/tutor.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tutor.toml"));
    }

    #[test]
    fn test_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ncolor = \"sepia\"").unwrap();
        assert!(TutorConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_ontology_override() {
        let config = TutorConfig::default().with_ontology_override(Some("custom.toml".into()));
        assert_eq!(config.ontology.path, PathBuf::from("custom.toml"));

        let config = TutorConfig::default().with_ontology_override(None);
        assert_eq!(config.ontology.path, PathBuf::from(DEFAULT_ONTOLOGY_FILE));
    }

    #[test]
    fn test_color_mode_parsing() {
        let mut config = TutorConfig::default();

        config.set_color_mode("always").unwrap();
        assert_eq!(config.output.color, ColorMode::Always);

        config.set_color_mode("OFF").unwrap();
        assert_eq!(config.output.color, ColorMode::Never);

        assert!(config.set_color_mode("invalid").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut original = TutorConfig::default();
        original.ontology.concept_class = "MechanicsConcept".to_string();
        original.output.color = ColorMode::Never;

        let text = toml::to_string(&original).unwrap();
        let parsed: TutorConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, original);
    }
}
