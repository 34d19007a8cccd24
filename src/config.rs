use serde::Deserialize;

/// Connection settings for a `RidderService`.
///
/// `max_retries` and `seconds_between_retries` are handed to the HTTP
/// transport unchanged; emptiness of `api_url`/`api_key` is checked by
/// `RidderService::new`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    pub api_url: String,
    pub api_key: String,
    pub max_retries: Option<u32>,
    pub seconds_between_retries: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

impl ServiceConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_url: std::env::var("RIDDER_API_URL")
                .map_err(|_| anyhow::anyhow!("RIDDER_API_URL environment variable required"))?,
            api_key: std::env::var("RIDDER_API_KEY")
                .map_err(|_| anyhow::anyhow!("RIDDER_API_KEY environment variable required"))?,
            max_retries: optional_number("RIDDER_MAX_RETRIES")?,
            seconds_between_retries: optional_number("RIDDER_SECONDS_BETWEEN_RETRIES")?,
            timeout_seconds: optional_number("RIDDER_TIMEOUT_SECONDS")?,
        };

        // Never log the API key
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Ridder API URL: {}", config.api_url);
        if let Some(retries) = config.max_retries {
            tracing::debug!("Max retries: {}", retries);
        }

        Ok(config)
    }
}

fn optional_number<T: std::str::FromStr>(name: &str) -> anyhow::Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{} must be a non-negative number", name)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_leaves_retry_settings_unset() {
        let config = ServiceConfig::new("https://ridder.example.com/api/", "secret");
        assert_eq!(config.api_url, "https://ridder.example.com/api/");
        assert_eq!(config.api_key, "secret");
        assert!(config.max_retries.is_none());
        assert!(config.seconds_between_retries.is_none());
        assert!(config.timeout_seconds.is_none());
    }

    #[test]
    fn test_optional_number_parses_and_rejects() {
        std::env::set_var("RIDDER_TEST_OPTIONAL_OK", " 3 ");
        std::env::set_var("RIDDER_TEST_OPTIONAL_BAD", "three");
        std::env::set_var("RIDDER_TEST_OPTIONAL_EMPTY", "");

        assert_eq!(optional_number::<u32>("RIDDER_TEST_OPTIONAL_OK").unwrap(), Some(3));
        assert!(optional_number::<u32>("RIDDER_TEST_OPTIONAL_BAD").is_err());
        assert_eq!(optional_number::<u32>("RIDDER_TEST_OPTIONAL_EMPTY").unwrap(), None);
        assert_eq!(optional_number::<u32>("RIDDER_TEST_OPTIONAL_UNSET").unwrap(), None);
    }
}
