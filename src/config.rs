//! Configuration for the echo server and the framing client.
//!
//! Supports both command-line arguments and TOML configuration file.
//! CLI arguments take precedence over config file values.

use clap::Parser;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::protocol::Message;

/// Command-line arguments for the echo server
#[derive(Parser, Debug)]
#[command(name = "echo-server")]
#[command(version = "0.1.0")]
#[command(about = "A raw TCP echo server", long_about = None)]
pub struct ServerArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind to (e.g., 127.0.0.1:3000)
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Port to listen on, replacing the port of the listen address
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Accept backlog of the listening socket
    #[arg(short = 'b', long)]
    pub backlog: Option<i32>,

    /// Size of the per-connection echo buffer in bytes
    #[arg(long)]
    pub buffer_size: Option<usize>,

    /// Number of worker threads (defaults to number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Command-line arguments for the framing client
#[derive(Parser, Debug)]
#[command(name = "frame-client")]
#[command(version = "0.1.0")]
#[command(about = "Sends one framed message and prints the framed reply", long_about = None)]
pub struct ClientArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Server address to connect to
    #[arg(short = 'C', long)]
    pub connect: Option<String>,

    /// Integer field of the message to send
    #[arg(long, allow_negative_numbers = true)]
    pub int_property: Option<i32>,

    /// String field of the message to send
    #[arg(long)]
    pub string_property: Option<String>,

    /// Do not wait for Enter before connecting and before exiting
    #[arg(long)]
    pub no_prompt: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Server-related configuration
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Accept backlog
    #[serde(default = "default_backlog")]
    pub backlog: i32,
    /// Echo buffer size per connection
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Number of worker threads
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            backlog: default_backlog(),
            buffer_size: default_buffer_size(),
            workers: None,
        }
    }
}

/// Client-related configuration
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Server address to connect to
    #[serde(default = "default_listen")]
    pub connect: String,
    #[serde(default = "default_int_property")]
    pub int_property: i32,
    #[serde(default = "default_string_property")]
    pub string_property: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect: default_listen(),
            int_property: default_int_property(),
            string_property: default_string_property(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_backlog() -> i32 {
    128
}

fn default_buffer_size() -> usize {
    1024
}

fn default_int_property() -> i32 {
    200
}

fn default_string_property() -> String {
    "Hello World".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub backlog: i32,
    pub buffer_size: usize,
    pub workers: Option<usize>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_args(ServerArgs::parse())
    }

    /// Merge parsed CLI args with the TOML file they point at (CLI takes precedence).
    pub fn from_args(cli: ServerArgs) -> Result<Self, ConfigError> {
        let toml_config = TomlConfig::load_optional(cli.config.as_deref())?;

        let listen = cli.listen.unwrap_or(toml_config.server.listen);
        let mut listen: SocketAddr = listen
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(listen.clone()))?;
        if let Some(port) = cli.port {
            listen.set_port(port);
        }

        Ok(Config {
            listen,
            backlog: cli.backlog.unwrap_or(toml_config.server.backlog),
            buffer_size: cli
                .buffer_size
                .unwrap_or(toml_config.server.buffer_size)
                .max(1),
            workers: cli.workers.or(toml_config.server.workers),
            log_level: cli.log_level.unwrap_or(toml_config.logging.level),
        })
    }
}

/// Final resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub connect: String,
    pub message: Message,
    pub prompt: bool,
    pub log_level: String,
}

impl ClientOptions {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_args(ClientArgs::parse())
    }

    pub fn from_args(cli: ClientArgs) -> Result<Self, ConfigError> {
        let toml_config = TomlConfig::load_optional(cli.config.as_deref())?;

        Ok(ClientOptions {
            connect: cli.connect.unwrap_or(toml_config.client.connect),
            message: Message::new(
                cli.int_property.unwrap_or(toml_config.client.int_property),
                cli.string_property
                    .unwrap_or(toml_config.client.string_property),
            ),
            prompt: !cli.no_prompt,
            log_level: cli.log_level.unwrap_or(toml_config.logging.level),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.server.listen, "127.0.0.1:3000");
        assert_eq!(config.server.backlog, 128);
        assert_eq!(config.server.buffer_size, 1024);
        assert_eq!(config.client.connect, "127.0.0.1:3000");
        assert_eq!(config.client.int_property, 200);
        assert_eq!(config.client.string_property, "Hello World");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [server]
            listen = "0.0.0.0:4000"
            backlog = 64
            buffer_size = 4096
            workers = 4

            [client]
            connect = "localhost:4000"
            int_property = -3

            [logging]
            level = "debug"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:4000");
        assert_eq!(config.server.backlog, 64);
        assert_eq!(config.server.buffer_size, 4096);
        assert_eq!(config.server.workers, Some(4));
        assert_eq!(config.client.connect, "localhost:4000");
        assert_eq!(config.client.int_property, -3);
        assert_eq!(config.client.string_property, "Hello World");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_server_defaults_from_args() {
        let config = Config::from_args(ServerArgs::parse_from(["echo-server"])).unwrap();
        assert_eq!(config.listen, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.backlog, 128);
        assert_eq!(config.buffer_size, 1024);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_port_overrides_listen() {
        let args = ServerArgs::parse_from(["echo-server", "-l", "0.0.0.0:1", "-p", "9000"]);
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.listen, "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn test_invalid_listen_address() {
        let args = ServerArgs::parse_from(["echo-server", "--listen", "not-an-address"]);
        assert!(matches!(
            Config::from_args(args),
            Err(ConfigError::InvalidAddress(addr)) if addr == "not-an-address"
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let args = ServerArgs::parse_from(["echo-server", "-c", "/nonexistent/echo.toml"]);
        assert!(matches!(
            Config::from_args(args),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_client_args_override_defaults() {
        let args = ClientArgs::parse_from([
            "frame-client",
            "--connect",
            "127.0.0.1:4000",
            "--int-property",
            "-7",
            "--string-property",
            "hi",
            "--no-prompt",
        ]);
        let options = ClientOptions::from_args(args).unwrap();
        assert_eq!(options.connect, "127.0.0.1:4000");
        assert_eq!(options.message, Message::new(-7, "hi"));
        assert!(!options.prompt);
    }

    #[test]
    fn test_client_defaults() {
        let options = ClientOptions::from_args(ClientArgs::parse_from(["frame-client"])).unwrap();
        assert_eq!(options.connect, "127.0.0.1:3000");
        assert_eq!(options.message, Message::new(200, "Hello World"));
        assert!(options.prompt);
    }
}
