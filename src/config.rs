//! Service configuration from file, environment, and CLI arguments.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{LensError, LensResult, ALLOWED_IMAGE_EXTENSIONS, DEFAULT_TOP_N, KEYWORD_CAP};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "PRODUCT_LENS_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "product-lens.toml";

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP service binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// CSV catalog with columns name, brand, description, category, price,
    /// rating, image_url.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    /// Optional JSON thesaurus merged over the built-in one.
    #[serde(default)]
    pub thesaurus_path: Option<PathBuf>,
    /// Image-to-text inference endpoint. Captioning is unavailable without it.
    #[serde(default)]
    pub caption_endpoint: Option<String>,
    /// Timeout for a single captioning call, in seconds.
    #[serde(default = "default_caption_timeout_secs")]
    pub caption_timeout_secs: u64,
    /// Largest request body accepted by the image endpoint, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Accepted image file extensions, lowercase.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Recommendations returned per query.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Maximum keywords per extraction.
    #[serde(default = "default_keyword_cap")]
    pub keyword_cap: usize,
    /// Origins allowed to call `/recommend` from a browser.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("productdata.csv")
}

fn default_caption_timeout_secs() -> u64 {
    60
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_keyword_cap() -> usize {
    KEYWORD_CAP
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:5174".to_string(),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            catalog_path: default_catalog_path(),
            thesaurus_path: None,
            caption_endpoint: None,
            caption_timeout_secs: default_caption_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
            allowed_extensions: default_allowed_extensions(),
            top_n: default_top_n(),
            keyword_cap: default_keyword_cap(),
            cors_origins: default_cors_origins(),
            log_level: default_log_level(),
        }
    }
}

impl ServiceConfig {
    /// Parse configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> LensResult<Self> {
        toml::from_str(content).map_err(|e| LensError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply `PRODUCT_LENS_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("PRODUCT_LENS_CATALOG") {
            self.catalog_path = PathBuf::from(path);
        }
        if let Some(addr) = lookup("PRODUCT_LENS_LISTEN") {
            self.listen_addr = addr;
        }
        if let Some(url) = lookup("PRODUCT_LENS_CAPTION_URL") {
            self.caption_endpoint = Some(url);
        }
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> LensResult<ServiceConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LensError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    ServiceConfig::from_toml_str(&content)
}

/// Resolve the configuration using priority order:
/// 1. Explicit path (CLI arg)
/// 2. PRODUCT_LENS_CONFIG environment variable
/// 3. product-lens.toml in the current directory
/// 4. Built-in defaults
///
/// Environment overrides are applied on top in every case.
pub fn resolve_config(explicit: Option<&Path>) -> LensResult<ServiceConfig> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
        .or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        });

    let mut config = match path {
        Some(path) => load_config(&path)?,
        None => ServiceConfig::default(),
    };
    config.apply_env();
    Ok(config)
}
