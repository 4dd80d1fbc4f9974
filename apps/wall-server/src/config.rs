//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;
use wall_core::WallPolicy;
use wall_infra::database::DatabaseConfig;

#[cfg(feature = "rate-limit")]
use wall_infra::RateLimitConfig;

use crate::background::SchedulerConfig;

/// Longest accepted post lifetime: one year.
const MAX_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub wall: WallConfig,
    pub scheduler: SchedulerConfig,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
}

/// Wall admission settings.
#[derive(Debug, Clone, Default)]
pub struct WallConfig {
    pub policy: WallPolicy,
    /// Extra words for the abuse filter dictionary.
    pub blocked_words: Vec<String>,
    /// Phrases for automated filler posts; empty means the built-in set.
    pub filler_phrases: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_or("DB_MIN_CONNECTIONS", 2),
            connect_timeout: Duration::from_secs(env_or("DB_CONNECT_TIMEOUT_SECS", 10)),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            database,
            wall: WallConfig::from_env(),
            scheduler: SchedulerConfig::from_env(),
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig {
                max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", 10),
                window: Duration::from_secs(env_or("RATE_LIMIT_WINDOW_SECS", 60)),
            },
        }
    }
}

impl WallConfig {
    pub fn from_env() -> Self {
        let defaults = WallPolicy::default();

        Self {
            policy: WallPolicy {
                ttl: parse_ttl(env::var("WALL_TTL_SECS").ok().as_deref(), defaults.ttl),
                max_post_length: parse_max_post_length(
                    env::var("WALL_MAX_POST_LENGTH").ok().as_deref(),
                    defaults.max_post_length,
                ),
            },
            blocked_words: split_list(&env::var("WALL_BLOCKED_WORDS").unwrap_or_default(), ','),
            filler_phrases: split_list(&env::var("FILLER_PHRASES").unwrap_or_default(), '|'),
        }
    }
}

/// Parse `key` or fall back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Post TTL in whole seconds, between one second and a year.
fn parse_ttl(raw: Option<&str>, default: TimeDelta) -> TimeDelta {
    let Some(raw) = raw else {
        return default;
    };

    let ttl = raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| (1..=MAX_TTL_SECS).contains(secs))
        .and_then(TimeDelta::try_seconds);

    ttl.unwrap_or_else(|| {
        tracing::warn!(
            value = raw,
            max_secs = MAX_TTL_SECS,
            default_secs = default.num_seconds(),
            "Invalid WALL_TTL_SECS, using default"
        );
        default
    })
}

/// Maximum post length; zero would reject every post.
fn parse_max_post_length(raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<usize>() {
        Ok(len) if len > 0 => len,
        _ => {
            tracing::warn!(value = raw, default, "Invalid WALL_MAX_POST_LENGTH, using default");
            default
        }
    }
}

/// Split a delimited setting, dropping blank entries.
fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
