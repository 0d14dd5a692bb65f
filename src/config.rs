/// Configuration management for Picx
///
/// All configuration comes from environment variables, with development
/// defaults and hard failures for unsafe production values.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Managed GraphQL API settings
    pub api: ApiConfig,
    /// Object store (S3) settings
    pub storage: StorageConfig,
    /// Identity provider and session settings
    pub auth: AuthConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// Managed GraphQL API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// API key used for anonymous reads
    pub api_key: String,
}

/// Object store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding uploaded images
    pub bucket: String,
    /// Bucket region
    pub region: String,
    /// Custom endpoint for S3-compatible storage (MinIO etc.)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Base URL images are publicly served from; derived from bucket/region
    /// when unset
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<String>,
}

/// Identity provider and session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// User pool endpoint URL
    pub user_pool_endpoint: String,
    /// User pool app client id
    pub client_id: String,
    /// Secret signing the session cookie
    pub session_secret: String,
    /// Session lifetime in seconds
    pub session_ttl_secs: u64,
}

const DEV_SESSION_SECRET: &str = "picx-dev-session-secret";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("PICX_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PICX_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            api: {
                let endpoint = match std::env::var("GRAPHQL_ENDPOINT") {
                    Ok(value) => value,
                    Err(_) if production => {
                        return Err("GRAPHQL_ENDPOINT must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:20002/graphql".to_string(),
                };

                ApiConfig {
                    endpoint,
                    api_key: std::env::var("GRAPHQL_API_KEY")
                        .unwrap_or_else(|_| "da2-fakeApiId123456".to_string()),
                }
            },
            storage: StorageConfig {
                bucket: std::env::var("S3_BUCKET").unwrap_or_else(|_| "picx-images".to_string()),
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                endpoint: std::env::var("S3_ENDPOINT").ok(),
                public_base_url: std::env::var("S3_PUBLIC_BASE_URL").ok(),
                access_key_id: std::env::var("AWS_ACCESS_KEY_ID").ok(),
                secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").ok(),
            },
            auth: {
                let session_secret = match std::env::var("SESSION_SECRET") {
                    Ok(value) => value,
                    Err(_) if production => {
                        return Err("SESSION_SECRET must be set in production".to_string())
                    }
                    Err(_) => DEV_SESSION_SECRET.to_string(),
                };

                if production && session_secret.trim() == DEV_SESSION_SECRET {
                    return Err(
                        "SESSION_SECRET cannot use the development default in production"
                            .to_string(),
                    );
                }

                AuthConfig {
                    user_pool_endpoint: std::env::var("USER_POOL_ENDPOINT").unwrap_or_else(|_| {
                        "https://cognito-idp.us-east-1.amazonaws.com".to_string()
                    }),
                    client_id: std::env::var("USER_POOL_CLIENT_ID")
                        .unwrap_or_else(|_| "local-client-id".to_string()),
                    session_secret,
                    session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(3600),
                }
            },
        })
    }
}
