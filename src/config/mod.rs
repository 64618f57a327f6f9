//! Configuration management for the wordstart service
//!
//! Configuration is read once at startup, from environment variables or a
//! TOML file, and is immutable afterwards. Handlers receive it through the
//! server state.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use thiserror::Error;

/// Default listening port
pub const DEFAULT_PORT: u16 = 40005;

/// Path prefix under which every route is mounted a second time
pub const DEFAULT_PATH_PREFIX: &str = "/thamini/wordstart";

/// Base URL of the upstream keyword planner API
pub const DEFAULT_API_BASE_URL: &str = "https://googleads.googleapis.com/v16";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Listening port
    pub port: u16,

    /// Verbose logging
    pub debug: bool,

    /// Alias prefix for all routes
    pub path_prefix: String,

    /// Enable permissive CORS
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,

    /// Log format (text, json)
    pub log_format: String,

    /// Upstream API settings
    pub upstream: UpstreamConfig,
}

/// Credentials for the upstream keyword provider
///
/// Unused by the mock generator; kept so a real provider can be wired in
/// without touching the configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub api_key: Option<String>,
    pub customer_id: Option<String>,
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            customer_id: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            debug: false,
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            enable_cors: true,
            enable_request_logging: true,
            log_format: String::from("text"),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                reason: format!("not a port number: {port}"),
            })?;
        }

        if let Ok(host) = std::env::var("HOST") {
            config.host = host.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "HOST".to_string(),
                reason: format!("not an IP address: {host}"),
            })?;
        }

        config.debug = std::env::var("DEBUG")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if let Ok(prefix) = std::env::var("WORDSTART_PATH_PREFIX") {
            config.path_prefix = prefix;
        }

        if let Ok(format) = std::env::var("WORDSTART_LOG_FORMAT") {
            config.log_format = format;
        }

        config.upstream.api_key = non_empty_var("GOOGLE_ADS_API_KEY");
        config.upstream.customer_id = non_empty_var("GOOGLE_ADS_CUSTOMER_ID");

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if !self.path_prefix.starts_with('/') || self.path_prefix.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "path_prefix".to_string(),
                reason: "Prefix must start with '/' and must not end with '/'".to_string(),
            });
        }

        Ok(())
    }

    /// Socket address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    host: Option<IpAddr>,
    port: Option<u16>,
    debug: Option<bool>,
    path_prefix: Option<String>,
    enable_cors: Option<bool>,
    enable_request_logging: Option<bool>,
    api_key: Option<String>,
    customer_id: Option<String>,
}

impl ConfigBuilder {
    /// Set bind host
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = Some(host);
        self
    }

    /// Set bind host from string
    pub fn host_str(mut self, host: &str) -> Result<Self, ConfigError> {
        self.host = Some(host.parse().map_err(|_| ConfigError::InvalidValue {
            field: "host".to_string(),
            reason: format!("Invalid address: {host}"),
        })?);
        Ok(self)
    }

    /// Set listening port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enable/disable verbose logging
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Set route alias prefix
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Enable/disable CORS
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = Some(enable);
        self
    }

    /// Enable/disable request logging
    pub fn enable_request_logging(mut self, enable: bool) -> Self {
        self.enable_request_logging = Some(enable);
        self
    }

    /// Set upstream API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set upstream customer id
    pub fn customer_id(mut self, id: impl Into<String>) -> Self {
        self.customer_id = Some(id.into());
        self
    }

    /// Build the config
    pub fn build(self) -> Result<Config, ConfigError> {
        let defaults = Config::default();
        let config = Config {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            debug: self.debug.unwrap_or(defaults.debug),
            path_prefix: self.path_prefix.unwrap_or(defaults.path_prefix),
            enable_cors: self.enable_cors.unwrap_or(defaults.enable_cors),
            enable_request_logging: self
                .enable_request_logging
                .unwrap_or(defaults.enable_request_logging),
            log_format: defaults.log_format,
            upstream: UpstreamConfig {
                api_key: self.api_key,
                customer_id: self.customer_id,
                base_url: defaults.upstream.base_url,
            },
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for name in [
            "PORT",
            "HOST",
            "DEBUG",
            "WORDSTART_PATH_PREFIX",
            "WORDSTART_LOG_FORMAT",
            "GOOGLE_ADS_API_KEY",
            "GOOGLE_ADS_CUSTOMER_ID",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 40005);
        assert_eq!(config.bind_address().to_string(), "0.0.0.0:40005");
    }

    #[test]
    fn test_config_builder() {
        let config = Config::builder()
            .host_str("127.0.0.1")
            .unwrap()
            .port(9000)
            .debug(true)
            .enable_cors(false)
            .build()
            .unwrap();

        assert_eq!(config.bind_address().port(), 9000);
        assert!(config.debug);
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        assert!(Config::builder().path_prefix("no-slash").build().is_err());
        assert!(Config::builder().path_prefix("/trailing/").build().is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(Config::builder().port(0).build().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.debug);
        assert!(config.upstream.api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("PORT", "8081");
        std::env::set_var("DEBUG", "True");
        std::env::set_var("GOOGLE_ADS_API_KEY", "key-123");
        std::env::set_var("GOOGLE_ADS_CUSTOMER_ID", "");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.port, 8081);
        assert!(config.debug);
        assert_eq!(config.upstream.api_key.as_deref(), Some("key-123"));
        assert!(config.upstream.customer_id.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_bad_port() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
port = 41000
debug = true

[upstream]
customer_id = "123-456"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.port, 41000);
        assert!(config.debug);
        assert_eq!(config.path_prefix, DEFAULT_PATH_PREFIX);
        assert_eq!(config.upstream.customer_id.as_deref(), Some("123-456"));
        assert_eq!(config.upstream.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_from_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/wordstart.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
