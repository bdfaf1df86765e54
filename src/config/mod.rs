use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub roles: RoleConfig,
    pub tree: TreeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub request_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    pub default_page_size: u32,
    /// Page size used when fetching "all" roles for selection widgets
    pub list_all_page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Log cycle cuts and orphan fallbacks while building trees
    pub log_anomalies: bool,
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("CONSOLE_API_BASE_URL") {
            self.api.base_url = v.trim().to_string();
        }
        if let Ok(v) = env::var("CONSOLE_API_TOKEN") {
            self.api.token = Some(v).filter(|t| !t.trim().is_empty());
        }
        if let Ok(v) = env::var("CONSOLE_API_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("CONSOLE_API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Role overrides
        if let Ok(v) = env::var("CONSOLE_ROLE_PAGE_SIZE") {
            self.roles.default_page_size = v.parse().unwrap_or(self.roles.default_page_size);
        }
        if let Ok(v) = env::var("CONSOLE_ROLE_LIST_ALL_PAGE_SIZE") {
            self.roles.list_all_page_size = v.parse().unwrap_or(self.roles.list_all_page_size);
        }

        // Tree overrides
        if let Ok(v) = env::var("CONSOLE_TREE_LOG_ANOMALIES") {
            self.tree.log_anomalies = v.parse().unwrap_or(self.tree.log_anomalies);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
                token: None,
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            roles: RoleConfig {
                default_page_size: 10,
                list_all_page_size: 1000,
            },
            tree: TreeConfig { log_anomalies: true },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.example.com".to_string(),
                token: None,
                request_timeout_secs: 15,
                enable_request_logging: true,
            },
            roles: RoleConfig {
                default_page_size: 20,
                list_all_page_size: 1000,
            },
            tree: TreeConfig { log_anomalies: true },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://app.example.com".to_string(),
                token: None,
                request_timeout_secs: 10,
                enable_request_logging: false,
            },
            roles: RoleConfig {
                default_page_size: 20,
                list_all_page_size: 1000,
            },
            tree: TreeConfig { log_anomalies: false },
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::development()
    }
}

// Global singleton config - initialized once on first access
pub static CONFIG: Lazy<ConsoleConfig> = Lazy::new(ConsoleConfig::from_env);

pub fn config() -> &'static ConsoleConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
