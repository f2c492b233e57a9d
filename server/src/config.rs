//! Server configuration, parsed from the command line.

use clap::Parser;
use std::time::Duration;

/// Command line arguments for the server binary.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about)]
pub struct Args {
    /// Server IP address to bind to
    #[clap(short = 'H', long, default_value = "0.0.0.0")]
    pub host: String,
    /// Server port to listen on
    #[clap(short, long, default_value = "6000")]
    pub port: u16,
    /// Seconds a connection may stay silent before it is closed
    #[clap(short = 't', long, default_value = "30")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub idle_timeout: Duration,
}

impl ServerConfig {
    /// Loopback config on an OS-assigned port.
    pub fn local() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 6000,
            idle_timeout: Duration::from_secs(30),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            idle_timeout: Duration::from_secs(args.idle_timeout_secs),
        }
    }
}
