use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the toolbox.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_file =
            PathBuf::from(env::var("APP_DATA_FILE").unwrap_or_else(|_| "roadmap-data.json".to_string()));

        let root_namespace =
            env::var("APP_ROOT_NAMESPACE").unwrap_or_else(|_| "roadmap".to_string());
        if root_namespace.is_empty() || root_namespace.contains(':') {
            return Err(ConfigError::InvalidRootNamespace {
                value: root_namespace,
            });
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig {
                data_file,
                root_namespace,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings controlling where tool state is persisted.
///
/// The root namespace prefixes every composed key, so it must not contain
/// the `:` separator itself.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_file: PathBuf,
    pub root_namespace: String,
}

/// Tracing controls for the CLI host.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRootNamespace { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRootNamespace { value } => {
                write!(
                    f,
                    "APP_ROOT_NAMESPACE must be non-empty and must not contain ':' (got '{}')",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
