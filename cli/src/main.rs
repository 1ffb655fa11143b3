mod table;
mod tui;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use visitledger_core::{
    compute_contribution, format_money, month_name, parse_month, resolve_data_dir, AppConfig,
    ConfigStore, FileVisitRecordRepository, InMemoryVisitRecordRepository, LedgerService,
    MonthSelection, Session,
};

#[derive(Parser)]
#[command(name = "visitledger")]
#[command(about = "Monthly visit log with pension contribution totals", long_about = None)]
struct Cli {
    /// Directory holding config.json and records.json (default: ~/.visitledger)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record the visits for a month (usage: set mar 2 --year 2024)
    Set {
        /// Month as 1-12 or a name
        month: String,
        /// 0, 1 or 2
        visits: u8,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Show the twelve months of a year
    Show {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Total the contributions of selected months
    Summary {
        #[arg(long)]
        year: Option<i32>,
        /// Comma separated months, e.g. 1,feb,3
        #[arg(long, value_delimiter = ',', conflicts_with = "all")]
        months: Vec<String>,
        /// Include every month
        #[arg(long)]
        all: bool,
    },
    /// Contribution for a visit count at the configured rate
    Calc {
        visits: u8,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Open the Terminal User Interface
    Tui {
        #[arg(long)]
        year: Option<i32>,
        /// Keep records in memory only
        #[arg(long)]
        ephemeral: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("visitledger=warn,visitledger_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn current_year() -> i32 {
    Local::now().year()
}

/// Opens the file-backed ledger described by the config in `data_dir`.
fn open_ledger(
    data_dir: &Path,
    config: &AppConfig,
) -> Result<LedgerService<FileVisitRecordRepository>> {
    let repo = FileVisitRecordRepository::new(data_dir, config.owner.clone())?;
    Ok(LedgerService::new(repo, config.rate)?)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let config_store = ConfigStore::new(&data_dir);
    debug!(data_dir = %data_dir.display(), "resolved data directory");
    let command = cli.command.unwrap_or(Commands::Tui {
        year: None,
        ephemeral: false,
    });

    match command {
        Commands::Init { force } => {
            if config_store.path().exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    config_store.path().display()
                );
            }
            config_store.save(&AppConfig::default())?;
            println!("Wrote {}", config_store.path().display());
        }
        Commands::Set { month, visits, year } => {
            let config = config_store.load()?;
            let year = year.unwrap_or_else(current_year);
            let month = parse_month(&month)?;
            let record = open_ledger(&data_dir, &config)?.upsert_month(year, month, visits)?;
            println!("Saved {} {}: {}", month_name(month), year, record.visits);
            let symbol = &config.currency_symbol;
            println!("  Employer: {}", format_money(record.employer_contribution, symbol));
            println!("  Employee: {}", format_money(record.employee_contribution, symbol));
        }
        Commands::Show { year } => {
            let config = config_store.load()?;
            let year = year.unwrap_or_else(current_year);
            let view = open_ledger(&data_dir, &config)?.year_view(year)?;
            table::print_year(&view, &config.currency_symbol);
        }
        Commands::Summary { year, months, all } => {
            let config = config_store.load()?;
            let year = year.unwrap_or_else(current_year);
            let selection = if all {
                MonthSelection::all()
            } else {
                months
                    .iter()
                    .map(|m| parse_month(m))
                    .collect::<Result<MonthSelection, _>>()?
            };
            let summary = open_ledger(&data_dir, &config)?.summary(year, selection.iter())?;
            table::print_summary(year, &summary, &config.currency_symbol);
        }
        Commands::Calc { visits } => {
            let config = config_store.load()?;
            let symbol = &config.currency_symbol;
            let contribution = compute_contribution(visits, &config.rate)?;
            println!("Employer: {}", format_money(contribution.employer, symbol));
            println!("Employee: {}", format_money(contribution.employee, symbol));
            println!("Total:    {}", format_money(contribution.total(), symbol));
        }
        Commands::Tui { year, ephemeral } => {
            let config = config_store.load()?;
            let year = year.unwrap_or_else(current_year);
            if ephemeral {
                let repo = InMemoryVisitRecordRepository::new();
                let service = LedgerService::new(repo, config.rate)?;
                tui::run(Session::open(service, year)?, config.currency_symbol)?;
            } else {
                let service = open_ledger(&data_dir, &config)?;
                tui::run(Session::open(service, year)?, config.currency_symbol)?;
            }
        }
    }
    Ok(())
}
