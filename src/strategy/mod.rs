//! Surebet detection engine

pub mod evaluator;
pub mod normalizer;
pub mod runner;
pub mod scanner;

pub use evaluator::{coefficient, evaluate, ArbitrageResult};
pub use normalizer::normalize;
pub use runner::{LeagueScanner, LeagueSummary, ScanRequest, ScanSummary};
pub use scanner::{scan, scan_events, ScanDiagnostic, ScanOutcome, ScanParams, SurebetOpportunity};
