use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use surebet_scanner::{
    config::{ConfigDefaults, ScannerConfig},
    connectors::ConnectorFactory,
    report,
    strategy::{LeagueScanner, ScanRequest},
    utils::{logger, metrics},
    Result,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "surebet")]
#[command(about = "Surebet scanner for Over/Under totals markets")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log file path
    #[arg(long, default_value = "logs/surebet.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan leagues for surebets
    Scan(ScanArgs),
    /// Validate configuration
    Validate,
    /// List the default leagues and bookmakers
    Leagues,
}

#[derive(Args, Debug, Default)]
struct ScanArgs {
    /// Leagues to scan (overrides the configured list)
    #[arg(long, num_args = 1..)]
    sports: Vec<String>,

    /// Total capital split across both sides
    #[arg(long)]
    bankroll: Option<f64>,

    /// Minimum ROI in percent to report
    #[arg(long)]
    min_roi: Option<f64>,

    /// Commission in percent taken out of every price; zero or negative means none
    #[arg(long, allow_negative_numbers = true)]
    commission: Option<f64>,

    /// Comma-separated bookmaker allow-list
    #[arg(long)]
    bookmakers: Option<String>,

    /// Debug output
    #[arg(short, long)]
    verbose: bool,

    /// Print opportunities as JSON lines
    #[arg(long)]
    json: bool,

    /// Print Prometheus metrics to stderr after the scan
    #[arg(long)]
    metrics: bool,
}

impl ScanArgs {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply_to(&self, config: &mut ScannerConfig) {
        if !self.sports.is_empty() {
            config.scan.sports = self.sports.clone();
        }
        if let Some(bankroll) = self.bankroll {
            config.scan.bankroll = bankroll;
        }
        if let Some(min_roi) = self.min_roi {
            config.scan.min_roi = min_roi;
        }
        if let Some(commission) = self.commission {
            config.scan.commission_pct = commission;
        }
        if let Some(bookmakers) = &self.bookmakers {
            config.scan.bookmakers = bookmakers
                .split(',')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string)
                .collect();
        }
        if self.verbose {
            config.scan.verbose = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    logger::init(&log_filter(&cli), &cli.log_file)?;

    info!("Starting {} v{}", surebet_scanner::APP_NAME, surebet_scanner::VERSION);

    match cli.command {
        Commands::Scan(args) => run_scan(load_config(cli.config.as_ref())?, args).await,
        Commands::Validate => validate_config(load_config(cli.config.as_ref())?),
        Commands::Leagues => {
            show_defaults();
            Ok(())
        }
    }
}

/// Log filter for the run; `scan -v` raises only this crate's targets to debug
fn log_filter(cli: &Cli) -> String {
    match &cli.command {
        Commands::Scan(args) if args.verbose => {
            format!("surebet_scanner=debug,{}=debug,{}", env!("CARGO_CRATE_NAME"), cli.log_level)
        }
        _ => cli.log_level.clone(),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ScannerConfig> {
    match path {
        Some(path) => {
            let config = ScannerConfig::from_file(path)?;
            info!("Configuration loaded from: {}", path.display());
            Ok(config)
        }
        None => {
            let mut config = ScannerConfig::default();
            config.expand_env_vars()?;
            Ok(config)
        }
    }
}

async fn run_scan(mut config: ScannerConfig, args: ScanArgs) -> Result<()> {
    args.apply_to(&mut config);
    config.validate()?;

    let prometheus = if args.metrics {
        Some(metrics::install_prometheus()?)
    } else {
        None
    };

    let request = ScanRequest {
        sports: config.scan.sports.clone(),
        bookmakers: config.effective_bookmakers(),
        params: config.scan_params(),
    };
    let provider = ConnectorFactory::create_provider(config.provider.clone())?;
    let scanner = LeagueScanner::new(provider, config.provider.max_concurrent_requests);

    let summary = scanner.run(&request).await;

    for opportunity in &summary.opportunities {
        if args.json {
            println!("{}", report::render_json(opportunity)?);
        } else {
            print!("{}", report::render_console(opportunity, config.scan.verbose));
        }
    }
    for diagnostic in &summary.diagnostics {
        warn!("{}", diagnostic);
    }
    if summary.total() == 0 && !args.json {
        println!("{}", report::NO_RESULTS_HINT);
    }

    if let Some(handle) = prometheus {
        eprintln!("{}", handle.render());
    }

    Ok(())
}

fn validate_config(config: ScannerConfig) -> Result<()> {
    info!("Validating configuration...");

    match config.validate() {
        Ok(_) => {
            info!("Configuration is valid");
            println!("Configuration validation passed!");
            Ok(())
        }
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            Err(e)
        }
    }
}

fn show_defaults() {
    println!("Default leagues:");
    for league in ConfigDefaults::LEAGUES {
        println!("  {}", league);
    }
    println!("Default bookmakers:");
    for bookmaker in ConfigDefaults::BOOKMAKERS {
        println!("  {}", bookmaker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_scan_overrides() {
        let cli = Cli::parse_from([
            "surebet",
            "scan",
            "--sports",
            "soccer_epl",
            "soccer_usa_mls",
            "--bankroll",
            "300",
            "--min-roi",
            "0.3",
            "--bookmakers",
            " pinnacle, ,betsson ",
            "-v",
        ]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };

        let mut config = ScannerConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.scan.sports, vec!["soccer_epl", "soccer_usa_mls"]);
        assert_eq!(config.scan.bankroll, 300.0);
        assert_eq!(config.scan.min_roi, 0.3);
        assert_eq!(config.scan.commission_pct, 0.0);
        assert_eq!(config.scan.bookmakers, vec!["pinnacle", "betsson"]);
        assert!(config.scan.verbose);
    }

    #[test]
    fn test_verbose_scopes_debug_to_crate() {
        let cli = Cli::parse_from(["surebet", "scan", "-v"]);
        let filter = log_filter(&cli);
        assert!(filter.starts_with("surebet_scanner=debug,"));
        assert!(filter.ends_with(",info"));
        assert!(!filter.split(',').any(|directive| directive == "debug"));

        let cli = Cli::parse_from(["surebet", "--log-level", "warn", "scan"]);
        assert_eq!(log_filter(&cli), "warn");
    }

    #[test]
    fn test_negative_commission_accepted() {
        let cli = Cli::parse_from(["surebet", "scan", "--commission", "-1"]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };

        let mut config = ScannerConfig::default();
        config.provider.api_key = "test_key".to_string();
        args.apply_to(&mut config);

        assert_eq!(config.scan.commission_pct, -1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_bookmaker_list_falls_back_to_defaults() {
        let args = ScanArgs {
            bookmakers: Some(String::new()),
            ..ScanArgs::default()
        };
        let mut config = ScannerConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.effective_bookmakers().len(), ConfigDefaults::BOOKMAKERS.len());
    }
}
