use std::env;

use crate::shared::types::ConfigDiagnostics;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// S3 storage configuration shared by the upload and analysis handlers
///
/// Every field is optional at startup. Missing values are reported when a request
/// reaches the object store, together with a [`ConfigDiagnostics`] snapshot.
#[derive(Clone, Default)]
pub struct StorageConfig {
    /// AWS region of the bucket
    pub region: Option<String>,
    /// Access key id for authentication
    pub access_key_id: Option<String>,
    /// Secret access key for authentication
    pub secret_access_key: Option<String>,
    /// Custom S3-compatible endpoint (e.g. MinIO); AWS is used when unset
    pub endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            storage: StorageConfig::from_env(),
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Forest AI API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Upload forest data and fetch its analysis reports".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|s| !s.trim().is_empty());

        Self {
            region: non_empty("FOREST_AI_AWS_REGION"),
            access_key_id: non_empty("FOREST_AI_S3_ACCESS_KEY_ID"),
            secret_access_key: non_empty("FOREST_AI_S3_ACCESS_KEY"),
            endpoint: non_empty("FOREST_AI_S3_ENDPOINT"),
        }
    }

    /// Which settings are present, safe to log and to return to callers
    pub fn diagnostics(&self) -> ConfigDiagnostics {
        ConfigDiagnostics {
            has_region: self.region.is_some(),
            has_access_key_id: self.access_key_id.is_some(),
            has_secret_key: self.secret_access_key.is_some(),
        }
    }
}

// Hand-written so the secret never reaches logs
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "***"))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "***"),
            )
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
