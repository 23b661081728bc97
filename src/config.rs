//! Startup Configuration
//!
//! The server reads one file describing the listener, the dataset converter and
//! a map of interface definitions keyed by interface name. TOML is the default
//! format; files ending in `.json` are read as JSON.

use crate::error::ConfigError;
use crate::search::{BoolMode, SearchOptions};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    /// HTTP listen address (e.g., "127.0.0.1:8080")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConverterKind {
    /// Run GDAL's `ogr2ogr` and read GeoJSON from its stdout.
    #[default]
    Ogr2ogr,
    /// Datasets are GeoJSON files already.
    Geojson,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    #[serde(default)]
    pub kind: ConverterKind,

    /// Converter executable, looked up on `PATH` when not absolute
    #[serde(default = "default_program")]
    pub program: String,

    /// Abort an interface's ingestion after this many seconds (unset = no limit)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            kind: ConverterKind::default(),
            program: default_program(),
            timeout_secs: None,
        }
    }
}

/// Configuration of one search interface.
///
/// The template fields (`display_name`, `class`, `type`, `region`, `state`)
/// take any value; strings are rendered against the feature attributes and
/// everything else is returned as configured.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceDefinition {
    /// Filled from the key of the `interfaces` map.
    #[serde(skip)]
    pub name: String,

    /// Locator handed to the converter
    pub dataset: String,

    /// Attribute whose value identifies a feature
    #[serde(alias = "idProperty")]
    pub id_property: String,

    #[serde(default, alias = "displayName")]
    pub display_name: Value,

    #[serde(default)]
    pub class: Value,

    #[serde(default, rename = "type")]
    pub kind: Value,

    #[serde(default)]
    pub region: Value,

    #[serde(default)]
    pub state: Value,

    #[serde(default, rename = "bool")]
    pub bool_mode: BoolMode,

    #[serde(default = "default_expand")]
    pub expand: bool,

    /// Regex over attribute keys that must not be indexed
    #[serde(default)]
    pub exclude: Option<String>,

    /// Keep the source feature in each result
    #[serde(default)]
    pub debug: bool,

    /// Read the bounding box from `minlat`/`maxlat`/`minlon`/`maxlon` attributes
    #[serde(default, alias = "extentsSupplied")]
    pub extents_supplied: bool,

    #[serde(skip)]
    exclude_pattern: Option<Regex>,
}

impl InterfaceDefinition {
    pub fn new(name: &str, dataset: &str, id_property: &str) -> Self {
        Self {
            name: name.to_string(),
            dataset: dataset.to_string(),
            id_property: id_property.to_string(),
            display_name: Value::Null,
            class: Value::Null,
            kind: Value::Null,
            region: Value::Null,
            state: Value::Null,
            bool_mode: BoolMode::default(),
            expand: default_expand(),
            exclude: None,
            debug: false,
            extents_supplied: false,
            exclude_pattern: None,
        }
    }

    pub fn with_display_name(mut self, template: impl Into<Value>) -> Self {
        self.display_name = template.into();
        self
    }

    pub fn with_exclude(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.exclude = Some(pattern.to_string());
        self.compile()?;
        Ok(self)
    }

    /// Compiled exclusion pattern, present once the definition is validated.
    pub fn exclude_pattern(&self) -> Option<&Regex> {
        self.exclude_pattern.as_ref()
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            bool_mode: self.bool_mode,
            expand: self.expand,
        }
    }

    fn compile(&mut self) -> Result<(), ConfigError> {
        if self.id_property.trim().is_empty() {
            return Err(ConfigError::MissingIdProperty(self.name.clone()));
        }
        self.exclude_pattern = match self.exclude.as_deref() {
            Some(pattern) => Some(Regex::new(pattern).map_err(|source| {
                ConfigError::InvalidExclude {
                    interface: self.name.clone(),
                    source,
                }
            })?),
            None => None,
        };
        Ok(())
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_program() -> String {
    "ogr2ogr".to_string()
}

fn default_expand() -> bool {
    true
}

impl ServerConfig {
    /// Load configuration from a TOML (or `.json`) file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => {
                tracing::warn!("No configuration file given; no interfaces will be served");
                Self::default()
            }
        };
        Ok(Self::merge_with_env(config))
    }

    fn merge_with_env(mut config: Self) -> Self {
        if let Ok(addr) = std::env::var("FEATURE_SEARCH_LISTEN_ADDR") {
            config.server.listen_addr = addr;
        }
        if let Ok(program) = std::env::var("FEATURE_SEARCH_OGR2OGR") {
            config.converter.program = program;
        }
        config
    }

    /// Stamps interface names onto their definitions and compiles their
    /// exclusion patterns.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        for (name, definition) in self.interfaces.iter_mut() {
            definition.name = name.clone();
            definition.compile()?;
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(self.server.listen_addr.clone()))
    }

    /// Definitions in interface-name order.
    pub fn definitions(&self) -> impl Iterator<Item = &InterfaceDefinition> {
        self.interfaces.values()
    }
}
