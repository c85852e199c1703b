use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

fn positive_env<T>(name: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value > T::default())
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Base URL of the ranking backend, without a trailing slash.
pub fn backend_url() -> String {
    non_empty_env("BACKEND_URL")
        .map(|url| url.trim_end_matches('/').to_owned())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned())
}

pub fn static_dir() -> String {
    non_empty_env("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned())
}

pub fn server_port() -> u16 {
    positive_env("PORT").unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn upstream_http_timeout() -> Duration {
    positive_env("UPSTREAM_HTTP_TIMEOUT_SECS")
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS))
}

pub fn upstream_connect_timeout() -> Duration {
    positive_env("UPSTREAM_CONNECT_TIMEOUT_SECS")
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS))
}

pub fn max_body_bytes() -> usize {
    positive_env("MAX_BODY_BYTES").unwrap_or(DEFAULT_MAX_BODY_BYTES)
}
