use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use crpostal::WebScraper;
use crpostal::types::Province;
use crpostal::utils::{self, DatasetStats};
use crpostal::writer;

#[derive(Parser)]
#[command(name = "crpostal")]
#[command(about = "A Costa Rica postal code scraper and dataset generator", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the source page and regenerate the postal code dataset
    Scrape {
        #[arg(
            long,
            value_name = "DIR",
            default_value = ".",
            help = "Directory the src/data and public output paths resolve against"
        )]
        base_dir: PathBuf,
    },
    /// List the provinces present in the dataset
    Provinces {
        #[arg(long, value_name = "PATH", help = "Dataset file to read")]
        data_file: Option<PathBuf>,
    },
    /// List the cantons of one province
    Cantons {
        #[arg(value_parser = parse_province, help = "Province name, e.g. \"San José\"")]
        province: Province,

        #[arg(long, value_name = "PATH", help = "Dataset file to read")]
        data_file: Option<PathBuf>,
    },
    /// List the district records of one province
    Districts {
        #[arg(value_parser = parse_province, help = "Province name, e.g. \"San José\"")]
        province: Province,

        #[arg(long, value_name = "CANTON", help = "Narrow the listing to one canton")]
        canton: Option<String>,

        #[arg(long, value_name = "PATH", help = "Dataset file to read")]
        data_file: Option<PathBuf>,
    },
    /// Search records by province, canton, district or postal code
    Search {
        #[arg(help = "Case-insensitive substring to search for")]
        query: String,

        #[arg(long, value_name = "PATH", help = "Dataset file to read")]
        data_file: Option<PathBuf>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
}

fn parse_province(s: &str) -> Result<Province, String> {
    Province::from_str(s)
}

fn load_dataset(data_file: Option<PathBuf>) -> Vec<crpostal::types::PostalRecord> {
    let path = data_file.unwrap_or_else(writer::default_data_file);
    utils::load_dataset(&path).unwrap_or_else(|e| {
        log::error!("Error loading dataset {}: {}", path.display(), e);
        log::error!("Run `crpostal scrape` first to generate it.");
        process::exit(1);
    })
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    match cli.command {
        Commands::Scrape { base_dir } => {
            let scraper = WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });

            let mut records = scraper.fetch_postal_records().await.unwrap_or_else(|e| {
                log::error!("Error fetching the webpage: {}", e);
                process::exit(1);
            });

            if records.is_empty() {
                log::warn!("No postal code data was extracted.");
                log::warn!("This might indicate that the website structure has changed.");
                log::warn!("Consider inspecting the page manually to update the scraping logic.");
                return;
            }

            let path = writer::write_dataset(&mut records, &base_dir).unwrap_or_else(|e| {
                log::error!("Error writing dataset: {}", e);
                process::exit(1);
            });

            println!("Saved {} postal codes to {}", records.len(), path.display());
            println!("Sample entries:");
            for (i, record) in records.iter().take(3).enumerate() {
                println!("  {}. {}", i + 1, record);
            }
            print!("{}", DatasetStats::from_records(&records));
        }

        Commands::Provinces { data_file } => {
            let records = load_dataset(data_file);
            for name in utils::provinces(&records) {
                println!("{}", name);
            }
        }

        Commands::Cantons {
            province,
            data_file,
        } => {
            let records = load_dataset(data_file);
            let cantons = utils::cantons(&records, province);
            if cantons.is_empty() {
                println!("No cantons found for {}.", province);
            } else {
                for canton in cantons {
                    println!("{}", canton);
                }
            }
        }

        Commands::Districts {
            province,
            canton,
            data_file,
        } => {
            let records = load_dataset(data_file);
            let districts = utils::districts(&records, province, canton.as_deref());
            if districts.is_empty() {
                println!("No districts found.");
            } else {
                for record in districts {
                    println!("{} ({}) = {}", record.district, record.canton, record.postal_code);
                }
            }
        }

        Commands::Search {
            query,
            data_file,
            format,
        } => {
            let records = load_dataset(data_file);
            let matches = utils::search(&records, &query);

            match format {
                OutputFormat::Json => serialize_json(&matches),
                OutputFormat::Text => {
                    if matches.is_empty() {
                        println!("No entries to display.");
                    } else {
                        for (i, record) in matches.iter().enumerate() {
                            println!("{:>3}. {}", i + 1, record);
                        }
                        println!("\n{} match(es).", matches.len());
                    }
                }
            }
        }
    }
}
