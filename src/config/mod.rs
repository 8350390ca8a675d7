use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_batch_messages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Deployment-specific identity data used when labelling legacy messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Author address that historically posted on behalf of the team
    pub legacy_admin_email: Option<String>,
}

impl IdentityConfig {
    pub fn is_legacy_admin(&self, author: &str) -> bool {
        match &self.legacy_admin_email {
            Some(email) => !email.is_empty() && email == author,
            None => false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_BATCH_MESSAGES") {
            self.api.max_batch_messages = v.parse().unwrap_or(self.api.max_batch_messages);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = parse_origins(&v);
        }

        // Identity overrides
        if let Ok(v) = env::var("IDENTITY_LEGACY_ADMIN_EMAIL") {
            let v = v.trim();
            self.identity.legacy_admin_email = (!v.is_empty()).then(|| v.to_string());
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                max_batch_messages: 1000,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            identity: IdentityConfig::default(),
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                max_batch_messages: 500,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            identity: IdentityConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
                max_batch_messages: 200,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            identity: IdentityConfig::default(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
