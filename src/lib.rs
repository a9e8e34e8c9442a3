//! Totals Surebet Scanner
//!
//! Scans sports-betting odds feeds for two-way totals (Over/Under) markets and
//! detects surebets: line prices across bookmakers whose implied probabilities
//! sum below one, guaranteeing a profit whichever side wins.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod connectors;
pub mod data;
pub mod report;
pub mod strategy;
pub mod utils;

// Re-export commonly used types
pub use config::ScannerConfig;
pub use connectors::{OddsApiConnector, OddsProvider};
pub use data::{Event, Line, LineBook, Quote, Side};
pub use strategy::{evaluate, normalize, scan, ArbitrageResult, LeagueScanner, SurebetOpportunity};

/// Result type used throughout the application
pub type Result<T> = anyhow::Result<T>;

/// Common error types for the surebet scanner
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScannerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    DataParsing(String),

    /// Odds outside the evaluator's domain
    #[error("Invalid odds: over={odds_over}, under={odds_under}")]
    InvalidOdds {
        /// Over price handed to the evaluator
        odds_over: f64,
        /// Under price handed to the evaluator
        odds_under: f64,
    },

    /// Negative or non-finite bankroll
    #[error("Invalid bankroll: {0}")]
    InvalidBankroll(f64),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),
}

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }

    #[test]
    fn test_invalid_odds_display() {
        let err = ScannerError::InvalidOdds { odds_over: 0.0, odds_under: 1.9 };
        assert_eq!(err.to_string(), "Invalid odds: over=0, under=1.9");
    }
}
