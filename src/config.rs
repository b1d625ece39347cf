//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the Supabase project URL.
pub const STORAGE_URL_ENV: &str = "VITE_SUPABASE_URL";

/// Environment variable holding the Supabase API key.
pub const STORAGE_KEY_ENV: &str = "VITE_SUPABASE_ANON_KEY";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storefront listing settings
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Target table settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Output format for the record list
    #[serde(default)]
    pub format: OutputFormat,
}

/// Where and how the product listing page is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Site origin, prepended to every relative product and image path
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path of the search results page
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Upper bound on listings returned by the single page fetch
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// User-Agent header sent with the fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Remote table the records are upserted into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Table name
    #[serde(default = "default_table")]
    pub table: String,

    /// Column used as the upsert conflict target
    #[serde(default = "default_conflict_column")]
    pub conflict_column: String,
}

fn default_origin() -> String {
    "https://www.metrotukku.fi".to_string()
}

fn default_search_path() -> String {
    "/fi/EUR/search".to_string()
}

fn default_page_size() -> u32 {
    200
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_table() -> String {
    "metrotukku_products".to_string()
}

fn default_conflict_column() -> String {
    "url".to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            search_path: default_search_path(),
            page_size: default_page_size(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StorefrontConfig {
    /// Full URL of the listing page: every product, sorted by relevance.
    pub fn listing_url(&self) -> String {
        format!(
            "{}{}?q=*%3A&page=&sort=relevance&pageSize={}",
            self.origin.trim_end_matches('/'),
            self.search_path,
            self.page_size
        )
    }

    /// Turns a site-relative path into an absolute URL by prefixing the origin.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), path)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { table: default_table(), conflict_column: default_conflict_column() }
    }
}

/// Config file looked up in the working directory.
const LOCAL_CONFIG_FILE: &str = "metrotukku.toml";

/// Directory under the platform config dir holding `config.toml`.
const CONFIG_DIR_NAME: &str = "metrotukku-sync";

impl std::str::FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses one TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;

        let config = text
            .parse::<Config>()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Places searched for a config file when none is given, highest priority first.
    pub fn search_paths() -> Vec<PathBuf> {
        std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE))
            .chain(dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml")))
            .collect()
    }

    /// Loads `explicit_path` if given (it must exist), else the first existing
    /// search path, else the defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        match Self::search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(origin) = std::env::var("METROTUKKU_ORIGIN") {
            self.storefront.origin = origin;
        }

        if let Ok(size) = std::env::var("METROTUKKU_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                self.storefront.page_size = s;
            }
        }

        if let Ok(table) = std::env::var("METROTUKKU_TABLE") {
            self.storage.table = table;
        }

        self
    }
}

/// Credentials for the remote table store.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// API key sent as `apikey` and bearer token
    pub api_key: String,
}

impl StorageCredentials {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { url: url.into(), api_key: api_key.into() }
    }

    /// Reads credentials from [`STORAGE_URL_ENV`] and [`STORAGE_KEY_ENV`].
    ///
    /// Missing variables come back as empty strings; the storage client
    /// rejects them when it is constructed.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var(STORAGE_URL_ENV).unwrap_or_default(),
            api_key: std::env::var(STORAGE_KEY_ENV).unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Output format for the record list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    /// Every format, in the order listed to users.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv];

    /// Lowercase name, as accepted by `--format` and the config file.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|f| f.as_str().eq_ignore_ascii_case(s)).ok_or_else(|| {
            let names: Vec<_> = Self::ALL.iter().map(|f| f.as_str()).collect();
            format!("unsupported output format '{}' (expected one of: {})", s, names.join(", "))
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
