use crate::domain::{CatalogContext, LanguageId, StoreId};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub language_id: LanguageId,
    pub store_id: StoreId,
    pub default_list_limit: usize,
    pub max_list_limit: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = parse_or_default::<u16>(&env_map, "PORT", "8080", "must be a valid u16")?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let language_id =
            parse_or_default::<i64>(&env_map, "LANGUAGE_ID", "1", "must be a valid integer")?;
        let store_id = parse_or_default::<i64>(&env_map, "STORE_ID", "0", "must be a valid integer")?;

        let default_list_limit = parse_or_default::<usize>(
            &env_map,
            "DEFAULT_LIST_LIMIT",
            "1",
            "must be a non-negative integer",
        )?;
        let max_list_limit = parse_or_default::<usize>(
            &env_map,
            "MAX_LIST_LIMIT",
            "100",
            "must be a non-negative integer",
        )?;

        if default_list_limit > max_list_limit {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_LIST_LIMIT".to_string(),
                format!("must not exceed MAX_LIST_LIMIT ({})", max_list_limit),
            ));
        }

        Ok(Config {
            port,
            database_path,
            language_id: LanguageId(language_id),
            store_id: StoreId(store_id),
            default_list_limit,
            max_list_limit,
        })
    }

    /// Context for a request served now in the configured language and store.
    pub fn context(&self) -> CatalogContext {
        CatalogContext::at_now(self.language_id, self.store_id)
    }

    /// Requested listing limit, defaulted and capped.
    pub fn list_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_list_limit)
            .min(self.max_list_limit)
    }
}

fn parse_or_default<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
    expectation: &str,
) -> Result<T, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.trim())
        .unwrap_or(default)
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), expectation.to_string()))
}
