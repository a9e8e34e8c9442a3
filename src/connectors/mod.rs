//! Odds provider connectors

pub mod odds_api;
pub mod traits;

pub use odds_api::OddsApiConnector;
pub use traits::*;

use crate::{config::ProviderConfig, ScannerError, Result};
use std::fmt;

/// Supported odds providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// the-odds-api.com
    OddsApi,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OddsApi => write!(f, "the-odds-api"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = ScannerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "the-odds-api" | "odds-api" | "oddsapi" => Ok(Provider::OddsApi),
            _ => Err(ScannerError::Config(format!("Unknown odds provider: {}", s))),
        }
    }
}

/// Connector factory for creating odds providers
pub struct ConnectorFactory;

impl ConnectorFactory {
    /// Create the connector named in the provider configuration
    pub fn create_provider(config: ProviderConfig) -> Result<Box<dyn OddsProvider>> {
        match config.name.parse::<Provider>()? {
            Provider::OddsApi => Ok(Box::new(OddsApiConnector::new(config)?)),
        }
    }
}

#[async_trait::async_trait]
impl OddsProvider for Box<dyn OddsProvider> {
    async fn fetch_events(&self, sport_key: &str, bookmakers: &[String]) -> Result<Vec<crate::data::Event>> {
        (**self).fetch_events(sport_key, bookmakers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("the-odds-api".parse::<Provider>().unwrap(), Provider::OddsApi);
        assert_eq!("OddsAPI".parse::<Provider>().unwrap(), Provider::OddsApi);
        assert!("betfair".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::OddsApi.to_string(), "the-odds-api");
    }

    #[test]
    fn test_boxed_provider_forwards() {
        let mut mock = MockOddsProvider::new();
        mock.expect_fetch_events()
            .returning(|sport_key, _| Ok(vec![crate::data::Event::new("ev1", sport_key, "Home", "Away")]))
            .times(1);

        let boxed: Box<dyn OddsProvider> = Box::new(mock);
        let events = tokio_test::block_on(boxed.fetch_events("soccer_epl", &[])).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sport_key, "soccer_epl");
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let config = ProviderConfig {
            name: "betfair".to_string(),
            ..ProviderConfig::default()
        };
        assert!(ConnectorFactory::create_provider(config).is_err());
    }
}
