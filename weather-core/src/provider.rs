use crate::{Config, WeatherError, WeatherSnapshot, provider::wttr::WttrProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod wttr;

/// A remote source of raw weather snapshots.
///
/// `None` asks the provider to infer the location from the caller's network origin.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, location: Option<&str>) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the provider described by config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let provider = WttrProvider::new(&config.base_url, config.request_timeout())?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config_builds() {
        let provider = provider_from_config(&Config::default());
        assert!(provider.is_ok());
    }
}
