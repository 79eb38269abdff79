//! Configuration management.
//!
//! Settings come from a TOML file, then `FIELDSTORE_*` environment
//! variables override individual values:
//!
//! | Variable | Setting | Default |
//! |----------|---------|---------|
//! | `FIELDSTORE_CONFIG_PATH` | Config file location | platform config dir |
//! | `FIELDSTORE_API_BASE` | Backend base URL | `http://localhost:8080` |
//! | `FIELDSTORE_DATA_DIR` | Cache directory | platform data dir |
//! | `FIELDSTORE_CACHE_BACKEND` | `filesystem`, `sqlite` or `memory` | `filesystem` |
//! | `FIELDSTORE_HTTP_TIMEOUT_MS` | Request timeout | 10000 |
//! | `FIELDSTORE_HTTP_CONNECT_TIMEOUT_MS` | Connect timeout | 3000 |
//! | `FIELDSTORE_AUTH_TOKEN` | Bearer token | none |

use crate::remote::HttpConfig;
use crate::resources::ResourceKind;
use crate::storage::CacheBackendKind;
use crate::{Error, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default backend base URL.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Main configuration for fieldstore.
#[derive(Debug, Clone)]
pub struct FieldstoreConfig {
    /// Backend base URL; collection paths are appended to it.
    pub api_base: String,
    /// Directory holding the cache.
    pub data_dir: PathBuf,
    /// Cache backend.
    pub cache_backend: CacheBackendKind,
    /// HTTP client timeouts.
    pub http: HttpConfig,
    /// Bearer token, if configured.
    pub auth_token: Option<SecretString>,
    /// Page size overrides keyed by resource.
    pub items_per_page: BTreeMap<ResourceKind, usize>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Backend base URL.
    pub api_base: Option<String>,
    /// Data directory.
    pub data_dir: Option<String>,
    /// Cache backend name.
    pub cache_backend: Option<String>,
    /// Bearer token.
    pub auth_token: Option<String>,
    /// HTTP section.
    pub http: Option<ConfigFileHttp>,
    /// Per-resource sections.
    pub resources: Option<BTreeMap<String, ConfigFileResource>>,
}

/// HTTP section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileHttp {
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Per-resource section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileResource {
    /// Page size.
    pub items_per_page: Option<usize>,
}

impl Default for FieldstoreConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: default_data_dir(),
            cache_backend: CacheBackendKind::default(),
            http: HttpConfig::default(),
            auth_token: None,
            items_per_page: BTreeMap::new(),
        }
    }
}

/// Platform data directory, or `.fieldstore` when no home is known.
fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".fieldstore"),
        |dirs| dirs.data_local_dir().join("fieldstore"),
    )
}

impl FieldstoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration the way the CLI does.
    ///
    /// Uses `path` if given, else `FIELDSTORE_CONFIG_PATH`, else the default
    /// location; then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("FIELDSTORE_CONFIG_PATH").map(PathBuf::from));
        let config = match explicit {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or names an unknown
    /// cache backend or resource.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;
        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks `<config_dir>/fieldstore/config.toml`, then
    /// `~/.config/fieldstore/config.toml`. Returns defaults if neither
    /// exists or parses.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("fieldstore").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("fieldstore")
                .join("config.toml"),
        ];
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Ignoring config file"),
            }
        }

        Self::default()
    }

    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(api_base) = file.api_base {
            config.api_base = api_base;
        }
        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(backend) = file.cache_backend {
            config.cache_backend = backend.parse()?;
        }
        if let Some(token) = file.auth_token.filter(|t| !t.trim().is_empty()) {
            config.auth_token = Some(SecretString::from(token));
        }
        if let Some(http) = file.http {
            if let Some(timeout_ms) = http.timeout_ms {
                config.http.timeout_ms = timeout_ms;
            }
            if let Some(connect_timeout_ms) = http.connect_timeout_ms {
                config.http.connect_timeout_ms = connect_timeout_ms;
            }
        }
        for (name, section) in file.resources.unwrap_or_default() {
            let kind: ResourceKind = name.parse()?;
            if let Some(per_page) = section.items_per_page {
                config.items_per_page.insert(kind, per_page.max(1));
            }
        }

        Ok(config)
    }

    /// Applies `FIELDSTORE_*` environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("FIELDSTORE_API_BASE").filter(|v| !v.trim().is_empty()) {
            self.api_base = v;
        }
        if let Some(v) = lookup("FIELDSTORE_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("FIELDSTORE_CACHE_BACKEND") {
            match v.parse() {
                Ok(kind) => self.cache_backend = kind,
                Err(e) => tracing::warn!(error = %e, "Ignoring FIELDSTORE_CACHE_BACKEND"),
            }
        }
        if let Some(v) = lookup("FIELDSTORE_HTTP_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.trim().parse::<u64>() {
                self.http.timeout_ms = timeout_ms;
            }
        }
        if let Some(v) = lookup("FIELDSTORE_HTTP_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.trim().parse::<u64>() {
                self.http.connect_timeout_ms = connect_timeout_ms;
            }
        }
        if let Some(v) = lookup("FIELDSTORE_AUTH_TOKEN").filter(|v| !v.trim().is_empty()) {
            self.auth_token = Some(SecretString::from(v));
        }
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the cache backend.
    #[must_use]
    pub const fn with_cache_backend(mut self, kind: CacheBackendKind) -> Self {
        self.cache_backend = kind;
        self
    }

    /// Returns the page size for a resource.
    #[must_use]
    pub fn items_per_page(&self, kind: ResourceKind) -> usize {
        self.items_per_page
            .get(&kind)
            .copied()
            .unwrap_or(kind.spec().items_per_page)
    }

    /// Returns the collection URL for a resource.
    #[must_use]
    pub fn endpoint(&self, kind: ResourceKind) -> String {
        kind.spec().endpoint(&self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = FieldstoreConfig::new();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.cache_backend, CacheBackendKind::Filesystem);
        assert!(config.auth_token.is_none());
        assert_eq!(config.items_per_page(ResourceKind::Targets), 5);
        assert_eq!(
            config.endpoint(ResourceKind::Products),
            "http://localhost:8080/api/products"
        );
    }

    #[test]
    fn test_from_toml() {
        let config = FieldstoreConfig::from_toml(
            r#"
            api_base = "https://api.kavyapharm.example"
            data_dir = "/tmp/fieldstore"
            cache_backend = "sqlite"
            auth_token = "tok"

            [http]
            timeout_ms = 2500

            [resources.products]
            items_per_page = 25

            [resources.reports]
            items_per_page = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base, "https://api.kavyapharm.example");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/fieldstore"));
        assert_eq!(config.cache_backend, CacheBackendKind::Sqlite);
        assert_eq!(config.http.timeout_ms, 2500);
        assert_eq!(config.http.connect_timeout_ms, HttpConfig::default().connect_timeout_ms);
        assert_eq!(config.auth_token.as_ref().unwrap().expose_secret(), "tok");
        assert_eq!(config.items_per_page(ResourceKind::Products), 25);
        assert_eq!(config.items_per_page(ResourceKind::Dcrs), 1);
        assert_eq!(config.items_per_page(ResourceKind::Users), 10);
    }

    #[test]
    fn test_from_toml_rejects_unknown_names() {
        assert!(FieldstoreConfig::from_toml("cache_backend = \"redis\"").is_err());
        assert!(FieldstoreConfig::from_toml("[resources.warehouses]\nitems_per_page = 3").is_err());
        assert!(FieldstoreConfig::from_toml("api_base = ").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("FIELDSTORE_API_BASE", "http://10.0.0.5:9000"),
            ("FIELDSTORE_CACHE_BACKEND", "memory"),
            ("FIELDSTORE_HTTP_TIMEOUT_MS", "not-a-number"),
            ("FIELDSTORE_HTTP_CONNECT_TIMEOUT_MS", "750"),
            ("FIELDSTORE_AUTH_TOKEN", "env-token"),
        ]
        .into_iter()
        .collect();

        let config = FieldstoreConfig::new()
            .with_overrides_from(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.api_base, "http://10.0.0.5:9000");
        assert_eq!(config.cache_backend, CacheBackendKind::Memory);
        assert_eq!(config.http.timeout_ms, HttpConfig::default().timeout_ms);
        assert_eq!(config.http.connect_timeout_ms, 750);
        assert_eq!(config.auth_token.as_ref().unwrap().expose_secret(), "env-token");
    }

    #[test]
    fn test_invalid_env_backend_ignored() {
        let config = FieldstoreConfig::new()
            .with_overrides_from(|key| (key == "FIELDSTORE_CACHE_BACKEND").then(|| "redis".to_string()));
        assert_eq!(config.cache_backend, CacheBackendKind::Filesystem);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = FieldstoreConfig::load_from_file(Path::new("/nonexistent/fieldstore.toml"));
        assert!(err.is_err());
    }
}
