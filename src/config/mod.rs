//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, ConsoleConfig, DatabaseConfig, LogFormat, LoggingConfig, OpenAiConfig,
    ServerConfig,
};
