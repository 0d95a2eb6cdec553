pub mod categories;

use crate::error::{Error, Result};
use crate::indexer::nutrition::HealthThresholds;
use crate::recommend::RecommendOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub recommend: RecommendConfig,
    pub health: HealthThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_rate_limit: u64,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Rows sampled from the dataset; 0 keeps every row
    pub sample_size: usize,
    pub sample_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub default_top_n: usize,
    pub max_top_n: usize,
    pub candidate_multiplier: usize,
    pub exhaustive: bool,
    pub category_config_path: Option<PathBuf>,
}

impl RecommendConfig {
    pub fn options(&self) -> RecommendOptions {
        RecommendOptions {
            candidate_multiplier: self.candidate_multiplier,
            exhaustive: self.exhaustive,
        }
    }
}

/// Read `key` from the environment, falling back to `default`
fn env_or<T: FromStr>(key: &str, default: &str) -> Result<T> {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {key} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("PORT", "3000")?;
        let api_rate_limit = env_or("API_RATE_LIMIT", "100")?;
        let max_request_body_size = env_or("MAX_REQUEST_BODY_SIZE", "1048576")?;

        let dataset_path = std::env::var("DATASET_PATH")
            .unwrap_or_else(|_| "./data/RAW_recipes.csv".to_string())
            .into();
        let sample_size = env_or("SAMPLE_SIZE", "500")?;
        let sample_seed = env_or("SAMPLE_SEED", "42")?;

        let default_top_n = env_or("DEFAULT_TOP_N", "5")?;
        let max_top_n = env_or("MAX_TOP_N", "50")?;
        let candidate_multiplier = env_or("CANDIDATE_MULTIPLIER", "2")?;
        let exhaustive = env_or("EXHAUSTIVE_SEARCH", "false")?;
        let category_config_path = std::env::var("CATEGORY_CONFIG_PATH").ok().map(PathBuf::from);

        let defaults = HealthThresholds::default();
        let health = HealthThresholds {
            max_calories: env_or("HEALTH_MAX_CALORIES", &defaults.max_calories.to_string())?,
            max_sugar: env_or("HEALTH_MAX_SUGAR", &defaults.max_sugar.to_string())?,
            min_protein: env_or("HEALTH_MIN_PROTEIN", &defaults.min_protein.to_string())?,
            max_fat: env_or("HEALTH_MAX_FAT", &defaults.max_fat.to_string())?,
            max_sodium: env_or("HEALTH_MAX_SODIUM", &defaults.max_sodium.to_string())?,
        };

        Ok(Settings {
            server: ServerConfig {
                host,
                port,
                api_rate_limit,
                max_request_body_size,
            },
            dataset: DatasetConfig {
                path: dataset_path,
                sample_size,
                sample_seed,
            },
            recommend: RecommendConfig {
                default_top_n,
                max_top_n,
                candidate_multiplier,
                exhaustive,
                category_config_path,
            },
            health,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.recommend.max_top_n == 0 {
            return Err(Error::Config("MAX_TOP_N must be non-zero".to_string()));
        }

        if self.recommend.default_top_n == 0
            || self.recommend.default_top_n > self.recommend.max_top_n
        {
            return Err(Error::Config(format!(
                "DEFAULT_TOP_N must be between 1 and {}",
                self.recommend.max_top_n
            )));
        }

        if self.recommend.candidate_multiplier == 0 {
            return Err(Error::Config(
                "CANDIDATE_MULTIPLIER must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_rate_limit: 100,
            max_request_body_size: 1048576,
        },
        dataset: DatasetConfig {
            path: "/tmp/recipes.csv".into(),
            sample_size: 0,
            sample_seed: 42,
        },
        recommend: RecommendConfig {
            default_top_n: 5,
            max_top_n: 50,
            candidate_multiplier: 2,
            exhaustive: false,
            category_config_path: None,
        },
        health: HealthThresholds::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());
        settings.server.port = 3000;

        settings.recommend.default_top_n = 51;
        assert!(settings.validate().is_err());
        settings.recommend.default_top_n = 0;
        assert!(settings.validate().is_err());
        settings.recommend.default_top_n = 5;

        settings.recommend.candidate_multiplier = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_recommend_options() {
        let mut settings = test_settings();
        settings.recommend.exhaustive = true;
        settings.recommend.candidate_multiplier = 3;

        let options = settings.recommend.options();
        assert!(options.exhaustive);
        assert_eq!(options.candidate_multiplier, 3);
    }

    #[test]
    fn test_env_or_parses_and_defaults() {
        let value: usize = env_or("RECOMMENDER_TEST_UNSET_VARIABLE", "7").unwrap();
        assert_eq!(value, 7);

        let invalid: Result<usize> = env_or("RECOMMENDER_TEST_UNSET_VARIABLE", "seven");
        assert!(matches!(invalid, Err(Error::Config(_))));
    }
}
