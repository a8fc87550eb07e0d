//! Configuration management

use serde::{Deserialize, Serialize};

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "*";

/// Default USSD session time-to-live in seconds.
///
/// A USSD dialog lasts well under two minutes at the telecom gateway, so
/// anything older than this has been abandoned.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 300;

/// Default Africa's Talking API username (sandbox account).
pub const DEFAULT_AT_USERNAME: &str = "sandbox";

/// Default Africa's Talking messaging endpoint.
pub const DEFAULT_AT_SMS_URL: &str = "https://api.africastalking.com/version1/messaging";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub session: SessionConfig,
    pub sms: SmsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// USSD session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub ttl_secs: u64,
}

/// Africa's Talking SMS transport configuration
///
/// A missing API key is a valid mode: the service runs with the simulated
/// gateway and logs outbound messages instead of delivering them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    pub username: String,
    pub api_key: Option<String>,
    pub endpoint: String,
    pub sender_id: Option<String>,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("COMMUTER_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: std::env::var("COMMUTER_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: std::env::var("COMMUTER_SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
                allow_credentials: std::env::var("CORS_ALLOW_CREDENTIALS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(false),
            },
            session: SessionConfig {
                ttl_secs: std::env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            },
            sms: SmsConfig {
                username: std::env::var("AT_USERNAME")
                    .unwrap_or_else(|_| DEFAULT_AT_USERNAME.to_string()),
                api_key: std::env::var("AT_API_KEY").ok().filter(|s| !s.is_empty()),
                endpoint: std::env::var("AT_SMS_URL")
                    .unwrap_or_else(|_| DEFAULT_AT_SMS_URL.to_string()),
                sender_id: std::env::var("AT_SENDER_ID").ok().filter(|s| !s.is_empty()),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.session.ttl_secs == 0 {
            anyhow::bail!("Session TTL must be greater than 0");
        }

        if self.sms.username.is_empty() {
            anyhow::bail!("SMS username cannot be empty");
        }

        if self.sms.api_key.is_some() && self.sms.endpoint.is_empty() {
            anyhow::bail!("SMS endpoint cannot be empty when an API key is configured");
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: false,
            },
            session: SessionConfig {
                ttl_secs: DEFAULT_SESSION_TTL_SECS,
            },
            sms: SmsConfig {
                username: DEFAULT_AT_USERNAME.to_string(),
                api_key: None,
                endpoint: DEFAULT_AT_SMS_URL.to_string(),
                sender_id: None,
            },
        }
    }
}
