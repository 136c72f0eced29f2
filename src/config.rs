//! Configuration parsing for the quickstart.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Sensible defaults for a local GreptimeDB

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::Parser;

/// Path suffix of GreptimeDB's OTLP/HTTP metrics endpoint.
const OTLP_METRICS_PATH: &str = "/v1/otlp/v1/metrics";

/// Export process runtime metrics to GreptimeDB over OTLP/HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "greptime-quickstart")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address of the GreptimeDB HTTP endpoint
    #[arg(long, env = "GREPTIME_HOST", default_value = "localhost")]
    pub host: String,

    /// Database the metrics are written into
    #[arg(long, env = "GREPTIME_DATABASE", default_value = "public")]
    pub database: String,

    /// Username of the database
    #[arg(short, long, env = "GREPTIME_USERNAME", default_value = "")]
    pub username: String,

    /// Password of the database
    #[arg(short, long, env = "GREPTIME_PASSWORD", default_value = "")]
    pub password: String,

    /// Port of the HTTP endpoint (omitted from the URL when unset)
    #[arg(short = 'P', long, env = "GREPTIME_PORT")]
    pub port: Option<u16>,

    /// Use plain HTTP instead of HTTPS
    #[arg(long, env = "GREPTIME_NO_SECURE")]
    pub no_secure: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    ///
    /// On invalid arguments clap prints the error plus usage and exits the
    /// process with a non-zero status.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the OTLP/HTTP metrics endpoint URL.
    ///
    /// Template: `{scheme}://{host}[:{port}]/v1/otlp/v1/metrics`, where the
    /// scheme is `http` when `--no-secure` is set and `https` otherwise, and
    /// the port segment only appears when a port was configured.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.no_secure { "http" } else { "https" };
        let mut url = format!("{}://{}", scheme, self.host);
        if let Some(port) = self.port {
            url = format!("{}:{}", url, port);
        }
        url.push_str(OTLP_METRICS_PATH);
        url
    }

    /// Base64 credential token for the HTTP Basic `Authorization` header.
    ///
    /// Always encodes `{username}:{password}`, even when both are empty;
    /// GreptimeDB accepts the empty credential pair for unauthenticated
    /// local instances.
    pub fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        STANDARD.encode(credentials.as_bytes())
    }

    /// Create a default configuration for testing.
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            host: "localhost".into(),
            database: "public".into(),
            username: String::new(),
            password: String::new(),
            port: None,
            no_secure: false,
            log_level: "info".into(),
        }
    }
}
