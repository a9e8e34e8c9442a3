//! Settings management utilities

use crate::{ScannerError, Result};
use std::env;

/// Environment variable expansion utility
pub struct EnvExpander;

impl EnvExpander {
    /// Expand `${VAR_NAME}` references in a string
    pub fn expand(input: &str) -> Result<String> {
        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find("${") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find('}').ok_or_else(|| {
                ScannerError::Config("Unclosed environment variable reference".to_string())
            })?;
            let var_name = &after[..end];
            let var_value = env::var(var_name).map_err(|_| {
                ScannerError::Config(format!("Environment variable '{}' not found", var_name))
            })?;
            result.push_str(&var_value);
            rest = &after[end + 1..];
        }
        result.push_str(rest);

        Ok(result)
    }
}

/// Configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a league or bookmaker key (`soccer_epl`, `williamhill`)
    pub fn validate_key(key: &str, name: &str) -> Result<()> {
        if key.is_empty() {
            return Err(ScannerError::Config(format!("{} cannot be empty", name)).into());
        }

        if !key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
            return Err(ScannerError::Config(format!(
                "{} '{}' must contain only lowercase letters, digits and underscores",
                name, key
            ))
            .into());
        }

        Ok(())
    }

    /// Validate a commission percentage, below 100; zero or negative means no commission
    pub fn validate_commission(value: f64) -> Result<()> {
        if value.is_nan() || value >= 100.0 {
            return Err(ScannerError::Config("Commission must be below 100 percent".to_string()).into());
        }
        Ok(())
    }

    /// Validate a finite, non-negative value
    pub fn validate_non_negative(value: f64, name: &str) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(ScannerError::Config(format!("{} must be a non-negative number", name)).into());
        }
        Ok(())
    }

    /// Validate a finite value
    pub fn validate_finite(value: f64, name: &str) -> Result<()> {
        if !value.is_finite() {
            return Err(ScannerError::Config(format!("{} must be a finite number", name)).into());
        }
        Ok(())
    }

    /// Validate an HTTP(S) URL
    pub fn validate_url(url: &str, name: &str) -> Result<()> {
        if url.is_empty() {
            return Err(ScannerError::Config(format!("{} cannot be empty", name)).into());
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ScannerError::Config(format!("{} must be a valid URL", name)).into());
        }

        url::Url::parse(url).map_err(|e| ScannerError::Config(format!("{} must be a valid URL: {}", name, e)))?;

        Ok(())
    }
}

/// Configuration defaults
pub struct ConfigDefaults;

impl ConfigDefaults {
    /// Odds provider name
    pub const PROVIDER: &'static str = "the-odds-api";

    /// Odds provider base URL
    pub const API_BASE: &'static str = "https://api.the-odds-api.com/v4";

    /// API key, read from the environment
    pub const API_KEY: &'static str = "${ODDS_API_KEY}";

    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 25;

    /// Leagues fetched concurrently
    pub const MAX_CONCURRENT_REQUESTS: usize = 4;

    /// Market requested from the provider
    pub const MARKETS: &'static str = "totals";

    /// Odds format requested from the provider
    pub const ODDS_FORMAT: &'static str = "decimal";

    /// Date format requested from the provider
    pub const DATE_FORMAT: &'static str = "iso";

    /// Default bankroll
    pub const BANKROLL: f64 = 100.0;

    /// Default minimum ROI in percent
    pub const MIN_ROI: f64 = 0.0;

    /// Default commission in percent
    pub const COMMISSION_PCT: f64 = 0.0;

    /// Leagues scanned when none are configured
    pub const LEAGUES: &'static [&'static str] = &[
        "soccer_fifa_world_cup",
        "soccer_uefa_europa_league",
        "soccer_conmebol_copa_libertadores",
        "soccer_epl",
        "soccer_spain_la_liga",
        "soccer_italy_serie_a",
        "soccer_germany_bundesliga",
        "soccer_france_ligue_one",
        "soccer_netherlands_eredivisie",
        "soccer_portugal_primeira_liga",
        "soccer_fa_cup",
        "soccer_brazil_campeonato",
        "soccer_argentina_primera_division",
        "soccer_usa_mls",
        "soccer_chile_campeonato",
    ];

    /// Bookmakers queried when the allow-list is empty
    pub const BOOKMAKERS: &'static [&'static str] = &[
        "betsson",
        "onexbet",
        "coolbet",
        "pinnacle",
        "marathonbet",
        "williamhill",
        "betonlineag",
        "mybookieag",
        "everygame",
        "betanysports",
    ];
}
