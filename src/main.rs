use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

mod config;
mod db;
mod error;
mod export;
mod form;
mod logging;
mod models;
mod remote;
mod report;
mod summary;
mod taxonomy;

use config::StoreConfig;
use models::EvaluationRecord;
use remote::RemoteStore;
use taxonomy::{AgeGroup, Gender};

#[derive(Parser)]
#[command(name = "bootcamp-scorecard")]
#[command(about = "Taekwondo boot camp evaluation scorecard", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the remote store schema
    InitDb,
    /// List weight classes for an age group and gender
    WeightClasses {
        #[arg(long)]
        age_group: Option<AgeGroup>,
        #[arg(long)]
        gender: Option<Gender>,
    },
    /// Print the scoring guide for each dimension
    Rubric,
    /// Validate a form and print its summary
    Summarize {
        #[arg(long)]
        form: PathBuf,
    },
    /// Print radar chart data as JSON
    Chart {
        #[arg(long)]
        form: PathBuf,
    },
    /// Write a markdown summary card
    Report {
        #[arg(long)]
        form: PathBuf,
        #[arg(long, default_value = "summary.md")]
        out: PathBuf,
    },
    /// Export the evaluation as a CSV file
    Export {
        #[arg(long)]
        form: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Append the evaluation to the shared remote store
    Save {
        #[arg(long)]
        form: PathBuf,
    },
}

fn load_record(path: &Path) -> anyhow::Result<EvaluationRecord> {
    let input = form::load_form(path)?;
    match input.into_record() {
        Ok(record) => Ok(record),
        Err(errors) => {
            eprintln!("Form has {} problem(s):", errors.len());
            for error in &errors {
                eprintln!("- {}", error);
            }
            anyhow::bail!("evaluation in {} is not valid", path.display())
        }
    }
}

fn require_store_config() -> anyhow::Result<StoreConfig> {
    StoreConfig::from_env()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set to use the remote store"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::InitDb => {
            let config = require_store_config()?;
            let pool = db::connect(&config).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::WeightClasses { age_group, gender } => {
            let age_groups = age_group.map_or(AgeGroup::ALL.to_vec(), |value| vec![value]);
            let genders = gender.map_or(Gender::ALL.to_vec(), |value| vec![value]);
            for age_group in &age_groups {
                for gender in &genders {
                    let range = age_group
                        .age_range()
                        .map(|range| format!(" ({range})"))
                        .unwrap_or_default();
                    println!(
                        "{}{} {}: {}",
                        age_group,
                        range,
                        gender,
                        taxonomy::weight_classes_for(*age_group, *gender).join(", ")
                    );
                }
            }
        }
        Commands::Rubric => {
            print!("{}", report::build_rubric_guide());
        }
        Commands::Summarize { form } => {
            let record = load_record(&form)?;
            let summary = summary::summarize(&record);
            println!("Average score: {:.1} / 5.0", summary.average);
            println!("Strongest area: {}", summary.strongest);
            println!("Needs improvement: {}", summary.weakest);
            println!("Status: {}", summary.status);
            println!("Risk count: {}", summary.risk_count);
            for risk in record.risks() {
                println!("- {}", risk);
            }
        }
        Commands::Chart { form } => {
            let record = load_record(&form)?;
            let points = summary::summarize(&record).chart_points();
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        Commands::Report { form, out } => {
            let record = load_record(&form)?;
            let card = report::build_summary_card(&record, &summary::summarize(&record));
            std::fs::write(&out, card)?;
            println!("Summary card written to {}.", out.display());
        }
        Commands::Export { form, out_dir } => {
            let record = load_record(&form)?;
            let path = export::write_csv(&record, &out_dir)?;
            println!("Evaluation exported to {}.", path.display());
        }
        Commands::Save { form } => {
            let record = load_record(&form)?;
            let Some(config) = StoreConfig::from_env() else {
                println!("Remote store not configured; use `export` to keep a local CSV.");
                return Ok(());
            };

            let pool = db::connect(&config).await?;
            let store = RemoteStore::new(db::PgSheet::new(pool, config.sheet));
            if let Err(err) = store.append_record(&record).await {
                eprintln!("Save failed. The evaluation was not changed; retry or export locally.");
                return Err(err.into());
            }
            println!("Saved {} to the remote store.", export::export_filename(&record));
        }
    }

    Ok(())
}
