//! Runtime settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9090";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// How an article's votes react to a decrement past zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VotePolicy {
    /// Votes may go negative.
    #[default]
    Unclamped,
    /// Votes never drop below zero.
    ClampAtZero,
}

impl VotePolicy {
    /// Apply an increment the way the store does.
    pub fn apply(self, votes: i32, inc: i32) -> Option<i32> {
        let next = votes.checked_add(inc)?;
        Some(match self {
            VotePolicy::Unclamped => next,
            VotePolicy::ClampAtZero => next.max(0),
        })
    }
}

impl FromStr for VotePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unclamped" => Ok(VotePolicy::Unclamped),
            "clamp_at_zero" | "clamped" => Ok(VotePolicy::ClampAtZero),
            _ => Err(ConfigError::Invalid {
                key: "VOTE_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub vote_policy: VotePolicy,
    pub body_limit_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset and blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let max_connections = parse_or(get("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let body_limit_bytes = parse_or(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?;
        let vote_policy = match get("VOTE_POLICY") {
            Some(v) => v.parse()?,
            None => VotePolicy::default(),
        };

        Ok(Settings {
            database_url,
            bind_addr,
            max_connections,
            vote_policy,
            body_limit_bytes,
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}
