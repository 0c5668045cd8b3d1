use burrow_telemetry::LogFormat;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "BURROW_LISTEN_ADDR";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const MAX_CONNECTIONS_ENV: &str = "BURROW_DB_MAX_CONNECTIONS";
pub const ACQUIRE_TIMEOUT_ENV: &str = "BURROW_DB_ACQUIRE_TIMEOUT_SECS";
pub const PUBLIC_BASE_URL_ENV: &str = "BURROW_PUBLIC_BASE_URL";
pub const CAPTCHA_SECRET_KEY_ENV: &str = "CAPTCHA_SECRETKEY";
pub const CAPTCHA_SITE_KEY_ENV: &str = "CAPTCHA_SITEKEY";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9090";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "burrow")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = DATABASE_URL_ENV, hide_env_values = true)]
    pub database_url: String,

    #[arg(long, env = MAX_CONNECTIONS_ENV, default_value_t = 10)]
    pub max_connections: u32,

    #[arg(long, env = ACQUIRE_TIMEOUT_ENV, default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// Origin used in short URLs, e.g. `https://sho.rt`. Defaults to the
    /// request's Host header.
    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    /// hCaptcha secret. CAPTCHA is disabled when unset.
    #[arg(long, env = CAPTCHA_SECRET_KEY_ENV, hide_env_values = true)]
    pub captcha_secret_key: Option<String>,

    #[arg(long, env = CAPTCHA_SITE_KEY_ENV)]
    pub captcha_site_key: Option<String>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,
}
