mod commands;
mod input;
mod output;
mod preferences;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::process;

use commands::mortgage::LoanArgs;
use commands::theme::ThemeArgs;
use mortgage_calc_core::MortgageError;
use preferences::{PreferenceStore, Theme};

/// Mortgage payment calculator
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage payment calculator",
    long_about = "Validate loan parameters and compute the level monthly payment, \
                  total payment and total interest of a fixed-rate mortgage, \
                  with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Display theme for table output (defaults to the saved preference)
    #[arg(long, global = true)]
    theme: Option<Theme>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the monthly payment for a loan
    Calculate(LoanArgs),
    /// Check loan parameters without calculating
    Validate(LoanArgs),
    /// Show or change the saved display theme
    Theme(ThemeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, takes precedence over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = PreferenceStore::locate();
    let theme = cli
        .theme
        .unwrap_or_else(|| store.as_ref().map(PreferenceStore::load_theme).unwrap_or_default());
    log::debug!("using {} theme", theme.as_str());

    let mut failed = false;
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::mortgage::run_calculate(args),
        Commands::Validate(args) => {
            let result = commands::mortgage::run_validate(args);
            if let Ok(ref value) = result {
                failed = value.get("isValid") == Some(&serde_json::Value::Bool(false));
            }
            result
        }
        Commands::Theme(args) => commands::theme::run_theme(args, store.as_ref()),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, theme);
            process::exit(if failed { 1 } else { 0 });
        }
        Err(e) => {
            report_error(e.as_ref());
            process::exit(1);
        }
    }
}

fn report_error(e: &(dyn std::error::Error + 'static)) {
    if let Some(MortgageError::ValidationFailed(result)) = e.downcast_ref::<MortgageError>() {
        eprintln!("{}: invalid loan inputs", "error".red().bold());
        for (field, message) in &result.errors {
            eprintln!("  {}: {}", field.to_string().yellow(), message);
        }
        return;
    }
    eprintln!("{}: {}", "error".red().bold(), e);
}
