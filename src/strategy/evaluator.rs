//! Surebet coefficient and stake split for a two-way market

use crate::ScannerError;
use serde::Serialize;

/// Outcome of pricing one Over/Under pair at a bankroll
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArbitrageResult {
    /// Sum of implied probabilities, `1/over + 1/under`
    pub coefficient: f64,
    /// `coefficient < 1.0`
    pub is_surebet: bool,
    /// Bankroll the stakes were split from
    pub bankroll: f64,
    /// Stake on Over
    pub stake_over: f64,
    /// Stake on Under
    pub stake_under: f64,
    /// Return whichever side wins
    pub payout: f64,
    /// `payout - bankroll`
    pub profit: f64,
    /// Profit as a percentage of bankroll
    pub roi_pct: f64,
}

/// `1/odds_over + 1/odds_under`
pub fn coefficient(odds_over: f64, odds_under: f64) -> f64 {
    1.0 / odds_over + 1.0 / odds_under
}

/// Price an Over/Under pair.
///
/// Stakes are split in proportion to each side's implied probability, so the
/// payout is the same whichever side wins. Odds must be finite and positive
/// and the bankroll finite and non-negative.
pub fn evaluate(odds_over: f64, odds_under: f64, bankroll: f64) -> Result<ArbitrageResult, ScannerError> {
    let valid = |odds: f64| odds.is_finite() && odds > 0.0;
    if !valid(odds_over) || !valid(odds_under) {
        return Err(ScannerError::InvalidOdds { odds_over, odds_under });
    }
    if !bankroll.is_finite() || bankroll < 0.0 {
        return Err(ScannerError::InvalidBankroll(bankroll));
    }

    let k = coefficient(odds_over, odds_under);
    let stake_over = bankroll * (1.0 / odds_over) / k;
    let stake_under = bankroll * (1.0 / odds_under) / k;
    let payout = bankroll / k;
    let profit = payout - bankroll;
    let roi_pct = if bankroll <= 0.0 { 0.0 } else { 100.0 * profit / bankroll };

    Ok(ArbitrageResult {
        coefficient: k,
        is_surebet: k < 1.0,
        bankroll,
        stake_over,
        stake_under,
        payout,
        profit,
        roi_pct,
    })
}
