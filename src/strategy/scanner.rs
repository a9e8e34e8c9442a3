//! Event scan: normalize, evaluate, filter

use super::{evaluate, normalize, ArbitrageResult};
use crate::{
    data::{EffectiveQuote, Event, Line},
    log_surebet, ScannerError,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Parameters shared by every event in a scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanParams {
    /// Commission taken out of every price, in percent
    pub commission_pct: f64,
    /// Bankroll to split across both sides
    pub bankroll: f64,
    /// Minimum ROI (percent) a surebet must reach to be reported
    pub min_roi: f64,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            commission_pct: 0.0,
            bankroll: 100.0,
            min_roi: 0.0,
        }
    }
}

/// A qualifying surebet on one line of one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurebetOpportunity {
    /// League
    pub sport_key: String,
    /// Provider event identifier
    pub event_id: String,
    /// "Home vs Away"
    pub event_title: String,
    /// Kickoff time
    pub commence_time: Option<DateTime<Utc>>,
    /// Totals line
    pub line: Line,
    /// Winning Over quote
    pub over: EffectiveQuote,
    /// Winning Under quote
    pub under: EffectiveQuote,
    /// Coefficient and stake split
    pub result: ArbitrageResult,
}

/// A line the evaluator refused to price
#[derive(Debug, Clone, PartialEq)]
pub struct ScanDiagnostic {
    /// League
    pub sport_key: String,
    /// Provider event identifier
    pub event_id: String,
    /// Line that was skipped
    pub line: Line,
    /// Why it was skipped
    pub error: ScannerError,
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] event {} line {:+}: {}",
            self.sport_key, self.event_id, self.line, self.error
        )
    }
}

/// Everything a scan produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    /// Surebets meeting the ROI threshold, in event then line order
    pub opportunities: Vec<SurebetOpportunity>,
    /// Lines skipped because of degenerate prices
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Events looked at
    pub events_scanned: usize,
    /// Two-sided lines priced
    pub lines_evaluated: usize,
}

/// Scan events and return the surebets with `roi >= min_roi`
pub fn scan(events: &[Event], commission_pct: f64, bankroll: f64, min_roi: f64) -> Vec<SurebetOpportunity> {
    let params = ScanParams {
        commission_pct,
        bankroll,
        min_roi,
    };
    scan_events(events, &params).opportunities
}

/// Scan events, keeping diagnostics and counters alongside the surebets
pub fn scan_events(events: &[Event], params: &ScanParams) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for event in events {
        outcome.events_scanned += 1;
        let book = normalize(&event.quotes, params.commission_pct);
        if book.is_empty() {
            debug!(event_id = %event.id, quotes = event.quotes.len(), "No two-sided lines for event");
            continue;
        }

        for (line, quotes) in book.iter() {
            outcome.lines_evaluated += 1;
            let result = match evaluate(quotes.over.odds, quotes.under.odds, params.bankroll) {
                Ok(result) => result,
                Err(error) => {
                    warn!(event_id = %event.id, line = %line, "Skipping line: {}", error);
                    outcome.diagnostics.push(ScanDiagnostic {
                        sport_key: event.sport_key.clone(),
                        event_id: event.id.clone(),
                        line,
                        error,
                    });
                    continue;
                }
            };

            if !result.is_surebet || result.roi_pct < params.min_roi {
                continue;
            }

            log_surebet!(info, event.sport_key, event.title(), line, result.roi_pct,
                coefficient = result.coefficient, "Surebet found");

            outcome.opportunities.push(SurebetOpportunity {
                sport_key: event.sport_key.clone(),
                event_id: event.id.clone(),
                event_title: event.title(),
                commence_time: event.commence_time,
                line,
                over: quotes.over.clone(),
                under: quotes.under.clone(),
                result,
            });
        }
    }

    outcome
}
