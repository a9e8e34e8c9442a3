//! Sporting events and their quotes

use super::Quote;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A match with the totals quotes collected for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Provider-assigned identifier
    pub id: String,
    /// League the event belongs to
    pub sport_key: String,
    /// Home team
    pub home_team: String,
    /// Away team
    pub away_team: String,
    /// Kickoff time, when the feed supplied a valid one
    pub commence_time: Option<DateTime<Utc>>,
    /// Quotes across all bookmakers and lines
    pub quotes: Vec<Quote>,
}

impl Event {
    /// Create an event without quotes
    pub fn new(
        id: impl Into<String>,
        sport_key: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sport_key: sport_key.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            commence_time: None,
            quotes: Vec::new(),
        }
    }

    /// Set the kickoff time
    pub fn with_commence_time(mut self, commence_time: DateTime<Utc>) -> Self {
        self.commence_time = Some(commence_time);
        self
    }

    /// Replace the quotes
    pub fn with_quotes(mut self, quotes: Vec<Quote>) -> Self {
        self.quotes = quotes;
        self
    }

    /// "Home vs Away"
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}
