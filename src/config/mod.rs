//! Configuration management module

pub mod settings;

pub use settings::*;

use crate::{strategy::ScanParams, ScannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the surebet scanner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Scan configuration
    #[serde(default)]
    pub scan: ScanConfig,
    /// Odds provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// What to scan and how to price it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// League keys to scan
    pub sports: Vec<String>,
    /// Bookmaker allow-list; empty means the default set
    pub bookmakers: Vec<String>,
    /// Total stake split across both sides
    pub bankroll: f64,
    /// Minimum ROI in percent
    pub min_roi: f64,
    /// Commission in percent taken out of every price
    pub commission_pct: f64,
    /// Debug output
    pub verbose: bool,
}

/// Odds provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider name
    pub name: String,
    /// REST API base URL
    pub api_base: String,
    /// API key; `${VAR}` references are expanded from the environment
    pub api_key: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Leagues fetched concurrently
    pub max_concurrent_requests: usize,
    /// Market key requested
    pub markets: String,
    /// Odds format requested
    pub odds_format: String,
    /// Date format requested
    pub date_format: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sports: ConfigDefaults::LEAGUES.iter().map(|s| s.to_string()).collect(),
            bookmakers: Vec::new(),
            bankroll: ConfigDefaults::BANKROLL,
            min_roi: ConfigDefaults::MIN_ROI,
            commission_pct: ConfigDefaults::COMMISSION_PCT,
            verbose: false,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ConfigDefaults::PROVIDER.to_string(),
            api_base: ConfigDefaults::API_BASE.to_string(),
            api_key: ConfigDefaults::API_KEY.to_string(),
            request_timeout_secs: ConfigDefaults::REQUEST_TIMEOUT_SECS,
            max_concurrent_requests: ConfigDefaults::MAX_CONCURRENT_REQUESTS,
            markets: ConfigDefaults::MARKETS.to_string(),
            odds_format: ConfigDefaults::ODDS_FORMAT.to_string(),
            date_format: ConfigDefaults::DATE_FORMAT.to_string(),
        }
    }
}

impl ScannerConfig {
    /// Load configuration from a TOML file, expanding environment variables
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ScannerError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: ScannerConfig = toml::from_str(&content)
            .map_err(|e| ScannerError::Config(format!("Failed to parse config: {}", e)))?;

        config.expand_env_vars()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.sports.is_empty() {
            return Err(ScannerError::Config("At least one league must be configured".to_string()).into());
        }
        for sport in &self.scan.sports {
            ConfigValidator::validate_key(sport, "League")?;
        }
        for bookmaker in &self.scan.bookmakers {
            ConfigValidator::validate_key(bookmaker, "Bookmaker")?;
        }

        ConfigValidator::validate_non_negative(self.scan.bankroll, "Bankroll")?;
        ConfigValidator::validate_finite(self.scan.min_roi, "Minimum ROI")?;
        ConfigValidator::validate_commission(self.scan.commission_pct)?;

        ConfigValidator::validate_url(&self.provider.api_base, "Provider base URL")?;
        if self.provider.api_key.is_empty() {
            return Err(ScannerError::Config("Provider API key cannot be empty".to_string()).into());
        }
        if self.provider.request_timeout_secs == 0 {
            return Err(ScannerError::Config("Request timeout must be greater than 0".to_string()).into());
        }
        if self.provider.max_concurrent_requests == 0 {
            return Err(ScannerError::Config("Concurrent requests must be greater than 0".to_string()).into());
        }

        Ok(())
    }

    /// Expand `${VAR}` references in the provider settings
    pub fn expand_env_vars(&mut self) -> Result<()> {
        self.provider.api_base = EnvExpander::expand(&self.provider.api_base)?;
        self.provider.api_key = EnvExpander::expand(&self.provider.api_key)?;
        Ok(())
    }

    /// Bookmaker allow-list, falling back to the default set when empty
    pub fn effective_bookmakers(&self) -> Vec<String> {
        if self.scan.bookmakers.is_empty() {
            ConfigDefaults::BOOKMAKERS.iter().map(|s| s.to_string()).collect()
        } else {
            self.scan.bookmakers.clone()
        }
    }

    /// Pricing parameters for the scan
    pub fn scan_params(&self) -> ScanParams {
        ScanParams {
            commission_pct: self.scan.commission_pct,
            bankroll: self.scan.bankroll,
            min_roi: self.scan.min_roi,
        }
    }
}
