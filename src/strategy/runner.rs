//! Multi-league scan driven by an odds provider

use super::scanner::{scan_events, ScanDiagnostic, ScanParams, SurebetOpportunity};
use crate::{connectors::OddsProvider, log_retrieval, utils::metrics};
use futures_util::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// What to scan
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// League keys, scanned and reported in this order
    pub sports: Vec<String>,
    /// Bookmaker allow-list forwarded to the provider
    pub bookmakers: Vec<String>,
    /// Commission, bankroll and ROI threshold
    pub params: ScanParams,
}

/// Per-league totals
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueSummary {
    /// League key
    pub sport_key: String,
    /// Events returned by the provider
    pub events: usize,
    /// Surebets reported for the league
    pub surebets: usize,
    /// Whether the retrieval failed and the league was treated as empty
    pub fetch_failed: bool,
}

/// Result of a multi-league scan
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Scan identifier carried by every log line of the run
    pub scan_id: Uuid,
    /// Surebets in league order
    pub opportunities: Vec<SurebetOpportunity>,
    /// One entry per requested league
    pub leagues: Vec<LeagueSummary>,
    /// Lines skipped because of degenerate prices
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl ScanSummary {
    /// Total surebets found
    pub fn total(&self) -> usize {
        self.opportunities.len()
    }
}

/// Fetches each league from an [`OddsProvider`] and scans its events.
///
/// Retrievals run concurrently up to `max_concurrent`; a failed retrieval
/// counts as a league with no events.
pub struct LeagueScanner<P> {
    provider: P,
    max_concurrent: usize,
}

impl<P: OddsProvider> LeagueScanner<P> {
    /// Create a scanner over a provider
    pub fn new(provider: P, max_concurrent: usize) -> Self {
        Self {
            provider,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Scan every requested league
    pub async fn run(&self, request: &ScanRequest) -> ScanSummary {
        let scan_id = Uuid::new_v4();
        let span = info_span!("scan", scan_id = %scan_id);

        async move {
            let started = Instant::now();
            info!(leagues = request.sports.len(), bookmakers = request.bookmakers.len(), "Starting scan");

            let fetched: Vec<_> = stream::iter(request.sports.iter())
                .map(|sport_key| async move {
                    let fetch = self.provider.fetch_events(sport_key, &request.bookmakers).await;
                    (sport_key, fetch)
                })
                .buffered(self.max_concurrent)
                .collect()
                .await;

            let mut summary = ScanSummary {
                scan_id,
                ..ScanSummary::default()
            };

            for (sport_key, fetch) in fetched {
                let (events, fetch_failed) = match fetch {
                    Ok(events) => (events, false),
                    Err(e) => {
                        warn!(sport = %sport_key, "Retrieval failed, treating league as empty: {:#}", e);
                        metrics::record_retrieval_failure(sport_key);
                        (Vec::new(), true)
                    }
                };
                log_retrieval!(debug, sport_key, events.len(), "Events retrieved");

                let outcome = scan_events(&events, &request.params);
                metrics::record_league_scan(
                    sport_key,
                    outcome.events_scanned,
                    outcome.lines_evaluated,
                    outcome.opportunities.len(),
                );

                summary.leagues.push(LeagueSummary {
                    sport_key: sport_key.clone(),
                    events: events.len(),
                    surebets: outcome.opportunities.len(),
                    fetch_failed,
                });
                summary.opportunities.extend(outcome.opportunities);
                summary.diagnostics.extend(outcome.diagnostics);
            }

            let elapsed = started.elapsed();
            metrics::record_scan_duration(elapsed);
            info!(
                surebets = summary.total(),
                diagnostics = summary.diagnostics.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Scan completed"
            );
            summary
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        connectors::{MockOddsProvider, OddsProvider},
        data::{Event, Quote, Side},
        Result, ScannerError,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Provider that records how many retrievals overlap
    #[derive(Default)]
    struct InFlightProvider {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OddsProvider for InFlightProvider {
        async fn fetch_events(&self, sport_key: &str, _bookmakers: &[String]) -> Result<Vec<Event>> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(current, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![surebet_event(sport_key)])
        }
    }

    fn request(sports: &[&str]) -> ScanRequest {
        ScanRequest {
            sports: sports.iter().map(|s| s.to_string()).collect(),
            bookmakers: vec!["pinnacle".to_string(), "betsson".to_string()],
            params: ScanParams::default(),
        }
    }

    fn surebet_event(sport_key: &str) -> Event {
        Event::new(format!("{}-1", sport_key), sport_key, "Home", "Away").with_quotes(vec![
            Quote::new("Pinnacle", Side::Over, 2.5, 2.10),
            Quote::new("Betsson", Side::Under, 2.5, 2.05),
        ])
    }

    #[tokio::test]
    async fn test_failed_league_does_not_abort_scan() {
        let mut provider = MockOddsProvider::new();
        provider
            .expect_fetch_events()
            .returning(|sport_key: &str, _bookmakers: &[String]| {
                if sport_key == "soccer_epl" {
                    Err(ScannerError::Connection("HTTP 500".to_string()).into())
                } else {
                    Ok(vec![surebet_event(sport_key)])
                }
            })
            .times(3);

        let scanner = LeagueScanner::new(provider, 2);
        let summary = scanner.run(&request(&["soccer_usa_mls", "soccer_epl", "soccer_fa_cup"])).await;

        assert_eq!(summary.total(), 2);
        assert_eq!(summary.opportunities[0].sport_key, "soccer_usa_mls");
        assert_eq!(summary.opportunities[1].sport_key, "soccer_fa_cup");
        assert_eq!(summary.leagues.len(), 3);
        assert!(summary.leagues[1].fetch_failed);
        assert_eq!(summary.leagues[1].events, 0);
    }

    #[tokio::test]
    async fn test_bookmakers_forwarded_to_provider() {
        let mut provider = MockOddsProvider::new();
        provider
            .expect_fetch_events()
            .returning(|sport_key: &str, bookmakers: &[String]| {
                assert_eq!(sport_key, "soccer_epl");
                assert_eq!(bookmakers.to_vec(), vec!["pinnacle".to_string(), "betsson".to_string()]);
                Ok(Vec::new())
            })
            .times(1);

        let scanner = LeagueScanner::new(provider, 4);
        let summary = scanner.run(&request(&["soccer_epl"])).await;

        assert_eq!(summary.total(), 0);
        assert_eq!(summary.leagues[0].events, 0);
        assert!(!summary.leagues[0].fetch_failed);
    }

    #[tokio::test]
    async fn test_retrievals_bounded_by_max_concurrent() {
        let sports = ["l1", "l2", "l3", "l4", "l5", "l6"];
        let scanner = LeagueScanner::new(InFlightProvider::default(), 2);
        let summary = scanner.run(&request(&sports)).await;

        let provider = scanner.provider();
        assert_eq!(provider.calls.load(Ordering::SeqCst), sports.len());
        assert_eq!(provider.peak.load(Ordering::SeqCst), 2);
        assert_eq!(provider.in_flight.load(Ordering::SeqCst), 0);

        let order: Vec<&str> = summary.leagues.iter().map(|l| l.sport_key.as_str()).collect();
        assert_eq!(order, sports);
        assert_eq!(summary.total(), sports.len());
    }

    #[tokio::test]
    async fn test_single_slot_runs_retrievals_one_at_a_time() {
        let scanner = LeagueScanner::new(InFlightProvider::default(), 1);
        scanner.run(&request(&["l1", "l2", "l3"])).await;

        assert_eq!(scanner.provider().peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_leagues_is_a_no_op() {
        let provider = MockOddsProvider::new();
        let scanner = LeagueScanner::new(provider, 0);
        let summary = scanner.run(&request(&[])).await;

        assert_eq!(summary.total(), 0);
        assert!(summary.leagues.is_empty());
    }
}
