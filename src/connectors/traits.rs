//! Odds provider trait

use crate::{data::Event, Result};
use async_trait::async_trait;

/// Source of totals quotes, one league per call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsProvider: Send + Sync {
    /// Fetch the events of a league with their totals quotes, restricted to
    /// the given bookmakers
    async fn fetch_events(&self, sport_key: &str, bookmakers: &[String]) -> Result<Vec<Event>>;
}
