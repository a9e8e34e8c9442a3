//! The Odds API connector implementation

use crate::{
    config::ProviderConfig,
    connectors::traits::OddsProvider,
    data::{Event, Quote, Side},
    ScannerError,
    Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const TOTALS_MARKET: &str = "totals";

/// REST connector for The Odds API (`/v4/sports/{sport}/odds`)
pub struct OddsApiConnector {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OddsApiConnector {
    /// Create a new connector; the API key must already be expanded
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ScannerError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Odds endpoint URL for a league
    pub fn odds_url(&self, sport_key: &str, bookmakers: &[String]) -> Result<Url> {
        let endpoint = format!(
            "{}/sports/{}/odds",
            self.config.api_base.trim_end_matches('/'),
            sport_key
        );
        let bookmakers = bookmakers.join(",");
        let url = Url::parse_with_params(
            &endpoint,
            &[
                ("apiKey", self.config.api_key.as_str()),
                ("markets", self.config.markets.as_str()),
                ("oddsFormat", self.config.odds_format.as_str()),
                ("bookmakers", bookmakers.as_str()),
                ("dateFormat", self.config.date_format.as_str()),
            ],
        )
        .map_err(|e| ScannerError::Config(format!("Invalid odds endpoint {}: {}", endpoint, e)))?;

        Ok(url)
    }

    /// Parse an odds response body into events.
    ///
    /// The body must be a JSON array. Each element is parsed on its own, so a
    /// malformed event is skipped without losing the rest of the league.
    pub fn parse_events(body: &str, sport_key: &str) -> Result<Vec<Event>> {
        let raw: Vec<Value> = serde_json::from_str(body)
            .map_err(|e| ScannerError::DataParsing(format!("Failed to parse odds response: {}", e)))?;

        let events = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<ApiEvent>(value) {
                Ok(event) => Some(event.into_event(sport_key)),
                Err(e) => {
                    warn!(sport = %sport_key, "Skipping malformed event: {}", e);
                    None
                }
            })
            .collect();

        Ok(events)
    }
}

#[async_trait]
impl OddsProvider for OddsApiConnector {
    async fn fetch_events(&self, sport_key: &str, bookmakers: &[String]) -> Result<Vec<Event>> {
        let url = self.odds_url(sport_key, bookmakers)?;
        debug!(sport = %sport_key, "Requesting odds from {}", url.path());

        // Request URLs carry the API key, so errors are formatted without them.
        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            if e.is_timeout() {
                ScannerError::Timeout(format!("Odds request for {} timed out", sport_key))
            } else {
                ScannerError::Connection(format!("Odds request for {} failed: {}", sport_key, e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScannerError::Connection(format!("Failed to read odds response: {}", e.without_url())))?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(100).collect();
            return Err(ScannerError::Connection(format!("HTTP {}: {}", status.as_u16(), excerpt)).into());
        }

        Self::parse_events(&body, sport_key)
    }
}

// The Odds API response types. Every field is optional: incomplete data is
// dropped quote by quote rather than failing the whole event.
#[derive(Debug, Deserialize)]
struct ApiEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    home_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    away_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    commence_time: Option<String>,
    #[serde(default)]
    bookmakers: Vec<ApiBookmaker>,
}

#[derive(Debug, Deserialize)]
struct ApiBookmaker {
    #[serde(default, deserialize_with = "lenient_string")]
    key: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    title: Option<String>,
    #[serde(default)]
    markets: Vec<ApiMarket>,
}

#[derive(Debug, Deserialize)]
struct ApiMarket {
    #[serde(default, deserialize_with = "lenient_string")]
    key: Option<String>,
    #[serde(default)]
    outcomes: Vec<ApiOutcome>,
}

#[derive(Debug, Deserialize)]
struct ApiOutcome {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    point: Option<f64>,
}

impl ApiEvent {
    fn into_event(self, sport_key: &str) -> Event {
        let commence_time = self
            .commence_time
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc));

        let quotes = self
            .bookmakers
            .into_iter()
            .flat_map(|book| {
                let name = book.title.or(book.key).unwrap_or_else(|| "unknown".to_string());
                book.markets
                    .into_iter()
                    .filter(|market| market.key.as_deref() == Some(TOTALS_MARKET))
                    .flat_map(|market| market.outcomes)
                    .filter_map(move |outcome| {
                        let side = outcome.name?.parse::<Side>().ok()?;
                        Some(Quote::new(name.clone(), side, outcome.point?, outcome.price?))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Event {
            id: self.id.unwrap_or_default(),
            sport_key: sport_key.to_string(),
            home_team: self.home_team.unwrap_or_else(|| "Home".to_string()),
            away_team: self.away_team.unwrap_or_else(|| "Away".to_string()),
            commence_time,
            quotes,
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
