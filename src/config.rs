use crate::error::{DashboardError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_PATH: &str = "data/avocado.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;
const DEFAULT_SESSION_TTL: u64 = 24 * 60 * 60; // 24 hours in seconds

pub const DATA_PATH_VAR: &str = "AVOCADO_DATA_PATH";
pub const HOST_VAR: &str = "DASHBOARD_HOST";
pub const PORT_VAR: &str = "DASHBOARD_PORT";
pub const SESSION_TTL_VAR: &str = "DASHBOARD_SESSION_TTL_SECS";

/// Runtime settings for the dashboard server
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// CSV file loaded at startup
    pub data_path: PathBuf,

    /// Interface the listener binds to
    pub host: String,

    pub port: u16,

    /// Idle lifetime of a browser session
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment and arguments
    ///
    /// Precedence: positional arguments, then environment, then defaults.
    /// Usage: `dashboard [data_path] [port]`.
    pub fn from_env_and_args(args: &[String]) -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok(), args)
    }

    /// Same as [`Config::from_env_and_args`] with an explicit variable lookup
    pub fn resolve<F>(lookup: F, args: &[String]) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(DATA_PATH_VAR) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = parse_port(&port)?;
        }
        if let Some(ttl) = lookup(SESSION_TTL_VAR) {
            let secs = ttl
                .trim()
                .parse::<u64>()
                .map_err(|_| DashboardError::Config(format!("invalid session TTL '{}'", ttl)))?;
            config.session_ttl = Duration::from_secs(secs);
        }

        // args[0] is the program name
        if let Some(path) = args.get(1) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(port) = args.get(2) {
            config.port = parse_port(port)?;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(DashboardError::Config(format!("invalid port '{}'", raw))),
    }
}
