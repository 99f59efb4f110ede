//! Configuration management for yalda-relay.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values
//!
//! The bot token and the completion API key have no defaults; startup fails
//! if either is missing after all sources are applied.

use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::ServerConfig;
use crate::cli::Args;
use crate::completion::{CompletionParams, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::dispatch::DEFAULT_API_BASE;
use crate::worker::{PoolConfig, DEFAULT_DRAIN_TIMEOUT, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerSection,
    /// Messaging platform configuration.
    pub telegram: TelegramSection,
    /// Completion service configuration.
    pub completion: CompletionSection,
    /// Reply worker pool configuration.
    pub pool: PoolSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable graceful shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            graceful_shutdown: true,
        }
    }
}

/// Telegram Bot API section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSection {
    /// Bot token (required).
    pub bot_token: Option<String>,
    /// Bot API host.
    pub api_base: String,
    /// Public URL this server is reachable at, used to register the webhook.
    pub public_base_url: Option<String>,
    /// Secret the platform echoes in `X-Telegram-Bot-Api-Secret-Token`.
    pub webhook_secret: Option<String>,
    /// Timeout for `sendMessage`, in seconds.
    pub send_timeout_secs: u64,
}

impl Default for TelegramSection {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            public_base_url: None,
            webhook_secret: None,
            send_timeout_secs: 10,
        }
    }
}

/// Completion service section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSection {
    /// API key (required).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Token ceiling per reply.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CompletionSection {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 300,
            temperature: 0.9,
            timeout_secs: 60,
        }
    }
}

/// Worker pool section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSection {
    /// Concurrent reply workers.
    pub workers: usize,
    /// Jobs buffered while all workers are busy.
    pub queue_capacity: usize,
    /// Seconds to wait for queued replies on shutdown.
    pub drain_timeout_secs: u64,
}

impl Default for PoolSection {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            drain_timeout_secs: DEFAULT_DRAIN_TIMEOUT.as_secs(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = var("HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(token) = var("TELEGRAM_TOKEN") {
            self.telegram.bot_token = Some(token);
        }

        if let Some(base) = var("BASE_URL") {
            self.telegram.public_base_url = Some(base);
        }

        if let Some(secret) = var("TELEGRAM_WEBHOOK_SECRET") {
            self.telegram.webhook_secret = Some(secret);
        }

        if let Some(key) = var("OPENAI_API_KEY") {
            self.completion.api_key = Some(key);
        }

        if let Some(base) = var("OPENAI_BASE_URL") {
            self.completion.base_url = base;
        }

        if let Some(model) = var("OPENAI_MODEL") {
            self.completion.model = model;
        }

        if let Some(level) = var("YALDA_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.server.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain and validate it.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Config::default();

        // Load from config file if specified
        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        // Apply environment variable overrides
        config.apply_env();

        // Apply CLI argument overrides (highest priority)
        config.apply_args(args);

        config.validate()?;
        Ok(config)
    }

    /// Check that every required secret is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token().is_none() {
            return Err(ConfigError::Missing("TELEGRAM_TOKEN"));
        }
        if self.api_key().is_none() {
            return Err(ConfigError::Missing("OPENAI_API_KEY"));
        }
        Ok(())
    }

    /// Bot token, if set and non-empty.
    pub fn bot_token(&self) -> Option<&str> {
        self.telegram.bot_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Completion API key, if set and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.completion.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Convert to ServerConfig for the API server.
    pub fn to_server_config(&self) -> Result<ServerConfig, ConfigError> {
        let host: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.server.host.clone()))?;

        let mut server_config = ServerConfig::new(host.to_string(), self.server.port);
        if !self.server.graceful_shutdown {
            server_config = server_config.without_graceful_shutdown();
        }

        Ok(server_config)
    }

    /// Sampling parameters for the completion service.
    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams {
            model: self.completion.model.clone(),
            max_tokens: self.completion.max_tokens,
            temperature: self.completion.temperature,
        }
    }

    /// Completion request timeout.
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion.timeout_secs)
    }

    /// `sendMessage` timeout.
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.telegram.send_timeout_secs)
    }

    /// Worker pool sizing.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            workers: self.pool.workers,
            queue_capacity: self.pool.queue_capacity,
            drain_timeout: Duration::from_secs(self.pool.drain_timeout_secs),
        }
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Invalid host address.
    InvalidHost(String),
    /// A required setting is absent.
    Missing(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidHost(host) => write!(f, "invalid host address: {}", host),
            Self::Missing(name) => write!(f, "{} must be set", name),
        }
    }
}

impl std::error::Error for ConfigError {}
