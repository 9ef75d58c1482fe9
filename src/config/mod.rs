use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub mirror: MirrorConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Default object class filter; None mirrors every class
    pub object_class_filter: Option<Vec<String>>,
    /// Emit an info log after every applied operation
    pub log_completed_operations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
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
        .with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a variable lookup; unparseable values keep the preset
    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Mirror overrides
        if let Some(v) = var("MIRROR_OBJECT_CLASS_FILTER") {
            self.mirror.object_class_filter = parse_class_list(&v);
        }
        if let Some(v) = var("MIRROR_LOG_COMPLETED") {
            self.mirror.log_completed_operations = v.parse().unwrap_or(self.mirror.log_completed_operations);
        }

        // Database overrides
        if let Some(v) = var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            mirror: MirrorConfig {
                object_class_filter: None,
                log_completed_operations: true,
            },
            database: DatabaseConfig {
                max_connections: 5,
                connection_timeout: 30,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            mirror: MirrorConfig {
                object_class_filter: None,
                log_completed_operations: true,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 10,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            mirror: MirrorConfig {
                object_class_filter: None,
                log_completed_operations: false,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 5,
            },
        }
    }
}

/// Comma-separated class names, lower-cased; an empty list means no filter
pub fn parse_class_list(value: &str) -> Option<Vec<String>> {
    let classes: Vec<String> = value
        .split(',')
        .map(|class| class.trim().to_ascii_lowercase())
        .filter(|class| !class.is_empty())
        .collect();
    if classes.is_empty() {
        None
    } else {
        Some(classes)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
