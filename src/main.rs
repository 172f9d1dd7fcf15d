//! Transaction History CLI
//!
//! Loads a transaction CSV, applies filter and sort options, and exports the
//! matching transactions as quoted CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv --type debit --min 100 > debits.csv
//! cargo run -- transactions.csv --search grocery --out-dir exports/
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use csv::Terminator;
use std::io;
use std::path::PathBuf;
use std::process;
use transaction_history::{
    CsvExporter, CsvSource, Direction, ExportConfig, FilterCriteria, Money, QueryEngine, Result,
    SortOrder, Status,
};

#[derive(Parser, Debug)]
#[command(name = "transaction-history")]
#[command(version)]
#[command(about = "Filter, sort and export a transaction history", long_about = None)]
struct Args {
    /// Transaction CSV (id,date,description,amount,type,category,balance,status)
    input: PathBuf,

    /// Case-insensitive text matched against description, category and id
    #[arg(short, long)]
    search: Option<String>,

    /// Only credit or debit transactions
    #[arg(long = "type")]
    direction: Option<Direction>,

    /// Exact category label
    #[arg(short, long)]
    category: Option<String>,

    /// Only completed, pending or failed transactions
    #[arg(long)]
    status: Option<Status>,

    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Smallest amount, inclusive
    #[arg(long)]
    min: Option<Money>,

    /// Largest amount, inclusive
    #[arg(long)]
    max: Option<Money>,

    /// Date order
    #[arg(long, value_enum, default_value_t = SortArg::Desc)]
    sort: SortArg,

    /// Field delimiter (single ASCII character)
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Terminate rows with CRLF instead of LF
    #[arg(long)]
    crlf: bool,

    /// Write a dated export file into this directory instead of stdout
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Print the distinct categories and exit
    #[arg(long)]
    list_categories: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortOrder::Ascending,
            SortArg::Desc => SortOrder::Descending,
        }
    }
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s.as_bytes() {
        [byte] => ExportConfig::check_delimiter(*byte).map_err(|e| e.to_string()),
        _ => Err(format!("delimiter must be one ASCII character, got '{}'", s)),
    }
}

impl Args {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            query: self.search.clone().unwrap_or_default(),
            direction: self.direction,
            category: self.category.clone(),
            status: self.status,
            date_from: self.from,
            date_to: self.to,
            min_amount: self.min,
            max_amount: self.max,
            sort: self.sort.into(),
        }
    }

    fn export_config(&self) -> ExportConfig {
        ExportConfig {
            delimiter: self.delimiter,
            terminator: if self.crlf {
                Terminator::CRLF
            } else {
                Terminator::Any(b'\n')
            },
            ..ExportConfig::default()
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let source = CsvSource::open(&args.input)?;
    let engine = QueryEngine::with_criteria(source, args.criteria());

    if args.list_categories {
        for category in engine.categories() {
            println!("{}", category);
        }
        return Ok(());
    }

    let view = engine.view();
    eprintln!("Showing {} transactions", view);

    if view.is_empty() {
        eprintln!("No transactions found");
        return Ok(());
    }

    let exporter = CsvExporter::new(args.export_config());
    match &args.out_dir {
        Some(dir) => {
            let today = Local::now().date_naive();
            if let Some(path) = exporter.export_to_dir(&view, dir, today)? {
                eprintln!("Exported to {}", path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            exporter.write_to(&view, stdout.lock())?;
        }
    }

    Ok(())
}
