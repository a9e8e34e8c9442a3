//! Console and JSON rendering of scan results

use crate::{strategy::SurebetOpportunity, ScannerError, Result};
use std::fmt::Write;

/// Printed when a scan finds nothing
pub const NO_RESULTS_HINT: &str =
    "No surebets found with the current filters. Try again during match days or lower --min-roi.";

const SEPARATOR_WIDTH: usize = 70;

/// Render one opportunity as a console block
pub fn render_console(opportunity: &SurebetOpportunity, verbose: bool) -> String {
    let result = &opportunity.result;
    let kickoff = opportunity
        .commence_time
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_else(|| "?".to_string());

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH));
    let _ = writeln!(
        out,
        "SPORT: {} | EVENT: {} | KO: {}",
        opportunity.sport_key, opportunity.event_title, kickoff
    );
    let _ = writeln!(out, "LINE: {:+} totals (Over/Under)", opportunity.line);
    let _ = writeln!(out, "Over:  {:.3} @ {}", opportunity.over.odds, opportunity.over.bookmaker);
    let _ = writeln!(out, "Under: {:.3} @ {}", opportunity.under.odds, opportunity.under.bookmaker);
    let _ = writeln!(out, "K = {:.6}  -> SUREBET", result.coefficient);
    let _ = writeln!(
        out,
        "Stake split (bankroll {:.2}): Over={:.2} | Under={:.2}",
        result.bankroll, result.stake_over, result.stake_under
    );
    let _ = writeln!(
        out,
        "Payout: {:.2}  | Profit: {:.2}  | ROI: {:.2}%",
        result.payout, result.profit, result.roi_pct
    );
    if verbose {
        let _ = writeln!(out, "DEBUG: event_id={}", opportunity.event_id);
    }
    out
}

/// Render one opportunity as a single-line JSON object
pub fn render_json(opportunity: &SurebetOpportunity) -> Result<String> {
    let json = serde_json::to_string(opportunity)
        .map_err(|e| ScannerError::DataParsing(format!("Failed to serialize opportunity: {}", e)))?;
    Ok(json)
}
