use serde::Deserialize;
use thiserror::Error;

/// Runtime configuration of the panel.
///
/// Built from compile-time environment variables and optionally overridden by a
/// `config.toml` served next to the bundle. Provided to the whole app via context.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub request_timeout_ms: u32,
    /// When false every permission check passes
    pub enable_permissions: bool,
    /// Log every request/response at debug level
    pub log_requests: bool,
}

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_MS: u32 = 30_000;

/// Path of the runtime override, relative to the page
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    features: FeaturesSection,
}

#[derive(Debug, Deserialize, Default)]
struct ApiSection {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_ms: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct FeaturesSection {
    enable_permissions: Option<bool>,
    log_requests: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AppConfig {
    /// Configuration baked in at build time (`CPANEL_*` variables)
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("CPANEL_API_URL"),
            option_env!("CPANEL_API_KEY"),
            option_env!("CPANEL_API_TIMEOUT_MS"),
            option_env!("CPANEL_ENABLE_PERMISSIONS"),
            option_env!("CPANEL_LOG_REQUESTS"),
        )
    }

    fn from_values(
        api_url: Option<&str>,
        api_key: Option<&str>,
        timeout_ms: Option<&str>,
        enable_permissions: Option<&str>,
        log_requests: Option<&str>,
    ) -> Self {
        Self {
            api_base_url: api_url
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.unwrap_or_default().to_string(),
            request_timeout_ms: timeout_ms
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            enable_permissions: enable_permissions.map(env_flag).unwrap_or(true),
            log_requests: log_requests
                .map(env_flag)
                .unwrap_or(cfg!(debug_assertions)),
        }
    }

    /// Apply the values present in a `config.toml` document on top of `self`.
    pub fn merge_toml(mut self, contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;

        if let Some(url) = file.api.base_url.filter(|s| !s.trim().is_empty()) {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = file.api.api_key {
            self.api_key = key;
        }
        if let Some(timeout) = file.api.timeout_ms {
            self.request_timeout_ms = timeout;
        }
        if let Some(flag) = file.features.enable_permissions {
            self.enable_permissions = flag;
        }
        if let Some(flag) = file.features.log_requests {
            self.log_requests = flag;
        }
        Ok(self)
    }

    /// Absolute URL of an API path ("/products" → "{base}/products")
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Load configuration: build-time values, then `config.toml` if the server has one.
///
/// A missing or broken file is logged and ignored.
pub async fn load_config() -> AppConfig {
    let base = AppConfig::from_env();

    let response = match gloo_net::http::Request::get(CONFIG_FILE).send().await {
        Ok(r) if r.ok() => r,
        Ok(r) => {
            log::info!("{} not served (HTTP {}), using build-time configuration", CONFIG_FILE, r.status());
            return base;
        }
        Err(e) => {
            log::info!("{} not loaded ({}), using build-time configuration", CONFIG_FILE, e);
            return base;
        }
    };

    let contents = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Failed to read {}: {}", CONFIG_FILE, e);
            return base;
        }
    };

    match base.clone().merge_toml(&contents) {
        Ok(config) => {
            log::info!("Loaded {} (api: {})", CONFIG_FILE, config.api_base_url);
            config
        }
        Err(e) => {
            log::warn!("{}", e);
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_values(None, None, None, None, None);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.api_key, "");
        assert_eq!(config.request_timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.enable_permissions);
    }

    #[test]
    fn test_env_values() {
        let config = AppConfig::from_values(
            Some("https://api.shop.test/v1/"),
            Some("secret"),
            Some("5000"),
            Some("false"),
            Some("1"),
        );
        assert_eq!(config.api_base_url, "https://api.shop.test/v1");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.request_timeout_ms, 5000);
        assert!(!config.enable_permissions);
        assert!(config.log_requests);
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let config = AppConfig::from_values(None, None, Some("soon"), None, None);
        assert_eq!(config.request_timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_merge_toml_overrides_only_present_keys() {
        let base = AppConfig::from_values(Some("http://a"), Some("k1"), None, None, Some("0"));
        let config = base
            .merge_toml(
                r#"
[api]
base_url = "https://b/api/"

[features]
enable_permissions = false
"#,
            )
            .unwrap();

        assert_eq!(config.api_base_url, "https://b/api");
        assert_eq!(config.api_key, "k1");
        assert!(!config.enable_permissions);
        assert!(!config.log_requests);
    }

    #[test]
    fn test_merge_empty_toml() {
        let base = AppConfig::from_values(None, None, None, None, None);
        assert_eq!(base.clone().merge_toml("").unwrap(), base);
    }

    #[test]
    fn test_merge_invalid_toml() {
        let base = AppConfig::from_values(None, None, None, None, None);
        assert!(base.merge_toml("[api\nbase_url = 1").is_err());
    }

    #[test]
    fn test_api_url() {
        let config = AppConfig::from_values(Some("http://host/api"), None, None, None, None);
        assert_eq!(config.api_url("/products"), "http://host/api/products");
        assert_eq!(config.api_url("products/1"), "http://host/api/products/1");
        assert_eq!(config.api_url("https://other/x"), "https://other/x");
    }
}
