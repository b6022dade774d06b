//! Configuration system (layered: code > env > .env file).

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Layered configuration for Outing.
///
/// API keys and base URLs are resolved by service name (`"openai"`,
/// `"ticketmaster"`, `"ipapi"`, `"ipinfo"`, `"open-meteo"`). Explicit
/// `set_*` calls take precedence over values loaded from the environment.
#[derive(Clone, Default)]
pub struct OutingConfig {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    base_urls: Arc<RwLock<HashMap<String, String>>>,
}

impl fmt::Debug for OutingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutingConfig")
            .field("api_keys", &"..")
            .field("base_urls", &self.base_urls)
            .finish()
    }
}

impl OutingConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (OPENAI_API_KEY, TICKETMASTER_API_KEY,
    /// plus *_BASE_URL overrides).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let config = Self::new();

        let env_mappings = [
            ("OPENAI_API_KEY", "openai"),
            ("TICKETMASTER_API_KEY", "ticketmaster"),
        ];

        for (env_var, service) in &env_mappings {
            if let Ok(key) = std::env::var(env_var) {
                config.set_api_key(service, key);
            }
        }

        let url_mappings = [
            ("OPENAI_BASE_URL", "openai"),
            ("TICKETMASTER_BASE_URL", "ticketmaster"),
            ("IPAPI_BASE_URL", "ipapi"),
            ("IPINFO_BASE_URL", "ipinfo"),
            ("OPEN_METEO_BASE_URL", "open-meteo"),
        ];

        for (env_var, service) in &url_mappings {
            if let Ok(url) = std::env::var(env_var) {
                config.set_base_url(service, url);
            }
        }

        config
    }

    pub fn set_api_key(&self, service: &str, key: String) {
        self.api_keys
            .write()
            .unwrap()
            .insert(service.to_string(), key);
    }

    pub fn get_api_key(&self, service: &str) -> Option<String> {
        self.api_keys.read().unwrap().get(service).cloned()
    }

    pub fn set_base_url(&self, service: &str, url: String) {
        self.base_urls
            .write()
            .unwrap()
            .insert(service.to_string(), url);
    }

    pub fn get_base_url(&self, service: &str) -> Option<String> {
        self.base_urls.read().unwrap().get(service).cloned()
    }

    /// Check whether a service has an API key configured.
    pub fn has_credentials(&self, service: &str) -> bool {
        self.get_api_key(service).is_some()
    }
}
