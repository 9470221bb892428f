use std::{env, fs, num::NonZeroUsize, time::Duration};

const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
const DEFAULT_CACHE_MAX_ENTRIES: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Application configuration loaded from environment variables.
///
/// Every variable `X` may instead be supplied through a secret file named
/// by `X_FILE`; a readable, non-empty file wins over `X`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to SQLite database file (default: "arena.db")
    pub database_path: String,
    /// Redis connection URL, used when the `redis` feature is enabled.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub redis_url: String,
    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 10,000)
    pub cache_max_entries: NonZeroUsize,
    /// Port from `SERVER_PORT`, used when no `--port`/`PORT` is given.
    pub server_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_PATH` - SQLite database path (default: "arena.db")
    /// - `REDIS_URL` - Redis connection URL; when unset it is built from
    ///   `REDIS_HOST` (default: "redis") and `REDIS_PORT` (default: 6379)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `SERVER_PORT` - Fallback listen port
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |name: &str| read_setting(&lookup, name);

        let redis_url = setting("REDIS_URL").unwrap_or_else(|| {
            let host = setting("REDIS_HOST").unwrap_or_else(|| "redis".to_string());
            let port = setting("REDIS_PORT").unwrap_or_else(|| "6379".to_string());
            format!("redis://{host}:{port}")
        });

        Self {
            database_path: setting("DATABASE_PATH").unwrap_or_else(|| "arena.db".to_string()),
            redis_url,
            cache_ttl_seconds: parse_setting(&setting, "CACHE_TTL_SECONDS")
                .filter(|seconds| *seconds > 0)
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            cache_max_entries: parse_setting(&setting, "CACHE_MAX_ENTRIES")
                .unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
            server_port: parse_setting(&setting, "SERVER_PORT"),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Resolves `name`, preferring the content of the file named by `{name}_FILE`.
fn read_setting<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let file_var = format!("{name}_FILE");
    if let Some(path) = lookup(&file_var) {
        match fs::read_to_string(&path) {
            Ok(content) if !content.trim().is_empty() => return Some(content.trim().to_string()),
            Ok(_) => tracing::warn!(variable = %file_var, path = %path, "Secret file is empty"),
            Err(err) => {
                tracing::warn!(variable = %file_var, path = %path, error = %err, "Cannot read secret file")
            }
        }
    }

    lookup(name).filter(|value| !value.is_empty())
}

fn parse_setting<T, S>(setting: &S, name: &str) -> Option<T>
where
    T: std::str::FromStr,
    S: Fn(&str) -> Option<String>,
{
    let raw = setting(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "Ignoring invalid value");
            None
        }
    }
}
