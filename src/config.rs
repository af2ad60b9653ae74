//! Command line configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via KNITOUT_CONFIG or --config)
//! 3. Environment variables

use knitout_codec::{split_carriers, Header};
use knitout_core::header::POSITIONS;
use knitout_core::{DiagnosticSink, Sink, Writer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "KNITOUT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Machine description written into the document headers.
    pub machine: MachineConfig,
    /// Where the finished document goes.
    pub output: OutputConfig,
}

impl Config {
    /// Loads configuration from file, then applies environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            config = Self::from_file(&path)?;
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path` (instead of KNITOUT_CONFIG), then
    /// applies environment variable overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.machine.apply_env_overrides();
        self.output.apply_env_overrides();
    }

    /// Checks the values that cannot be caught later by the writer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.machine.validate()
    }

    /// Saves configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        Ok(())
    }
}

/// Machine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Carrier names, front to back.
    pub carriers: Vec<String>,
    /// Value of the `Machine` header.
    pub name: Option<String>,
    /// Value of the `Gauge` header (needles per inch).
    pub gauge: Option<f64>,
    /// Value of the `Position` header.
    pub position: Option<String>,
    /// Further headers, written in this order after the ones above.
    pub headers: Vec<Header>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            carriers: (1..=10).map(|c| c.to_string()).collect(),
            name: Some("SWGXYZ".to_string()),
            gauge: Some(15.0),
            position: None,
            headers: Vec::new(),
        }
    }
}

impl MachineConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(carriers) = std::env::var("KNITOUT_CARRIERS") {
            let carriers = split_carriers(&carriers);
            if !carriers.is_empty() {
                self.carriers = carriers;
            }
        }

        if let Ok(name) = std::env::var("KNITOUT_MACHINE") {
            self.name = Some(name);
        }

        if let Ok(gauge) = std::env::var("KNITOUT_GAUGE") {
            if let Ok(g) = gauge.trim().parse() {
                self.gauge = Some(g);
            }
        }

        if let Ok(position) = std::env::var("KNITOUT_POSITION") {
            self.position = Some(position);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.carriers.is_empty() {
            return Err(ConfigError::ValidationError(
                "machine.carriers must not be empty".to_string(),
            ));
        }
        if let Some(blank) = self.carriers.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "machine.carriers[{}] is blank",
                blank
            )));
        }
        if let Some(ref position) = self.position {
            if !POSITIONS.contains(&position.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "machine.position must be one of: {}",
                    POSITIONS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Adds the configured headers to `writer`, in order.
    pub fn apply_headers<D: DiagnosticSink>(&self, writer: &mut Writer<D>) -> knitout_core::Result<()> {
        if let Some(ref name) = self.name {
            writer.add_header("Machine", name)?;
        }
        if let Some(gauge) = self.gauge {
            writer.add_header("Gauge", &gauge.to_string())?;
        }
        if let Some(ref position) = self.position {
            writer.add_header("Position", position)?;
        }
        for header in &self.headers {
            writer.add_header(&header.name, &header.value)?;
        }
        Ok(())
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file. Standard output when absent.
    pub path: Option<PathBuf>,
}

impl OutputConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("KNITOUT_OUTPUT") {
            self.path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
    }

    pub fn sink(&self) -> Sink {
        Sink::from_path(self.path.clone())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::ValidationError(msg) => {
                write!(f, "configuration validation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
