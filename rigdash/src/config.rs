use std::{
    env,
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

pub const API_URL: &str = "RIGDASH_API_URL";
pub const API_KEY: &str = "RIGDASH_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidUrl(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConfigError::Missing(key) => write!(f, "Expected {} in the environment", key),
            ConfigError::InvalidUrl(url) => {
                write!(f, "{} must be an http(s) url, got `{}`", API_URL, url)
            }
        }
    }
}

impl StdError for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let require = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let api_url = require(API_URL)?;
        if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(api_url));
        }
        let api_key = require(API_KEY)?;

        Ok(Self { api_url, api_key })
    }
}
