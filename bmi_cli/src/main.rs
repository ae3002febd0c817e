use bmi_core::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body Mass Index calculator and history tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI and append it to the history
    Calc {
        /// Weight in kilograms
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        /// Height in feet
        #[arg(long, allow_hyphen_values = true)]
        height: String,

        /// Age in whole years
        #[arg(long, allow_hyphen_values = true)]
        age: String,

        /// Dry run - show the result without saving it
        #[arg(long)]
        dry_run: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recorded measurements (default)
    History {
        /// Print the BMI trend values as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    bmi_core::logging::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Validation(e)) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Determine history location; a broken config file only costs the custom file name
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config: {}", e);
        Config::default()
    });
    let history_path = match &cli.data_dir {
        Some(dir) => config.history_path_in(dir),
        None => config.history_path(),
    };
    let store = HistoryStore::new(history_path);

    match cli.command {
        Some(Commands::Calc {
            weight,
            height,
            age,
            dry_run,
            json,
        }) => cmd_calc(&store, &weight, &height, &age, dry_run, json),
        Some(Commands::History { json }) => cmd_history(&store, json),
        None => cmd_history(&store, false),
    }
}

fn cmd_calc(
    store: &HistoryStore,
    weight: &str,
    height: &str,
    age: &str,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let assessment = if dry_run {
        bmi_core::tracker::preview(weight, height, age)?
    } else {
        let now = chrono::Local::now().naive_local();
        record_measurement(store, weight, height, age, now)?.assessment
    };

    if json {
        let out = serde_json::json!({
            "bmi": assessment.bmi,
            "category": assessment.category,
            "saved": !dry_run,
        });
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    println!("{}", assessment.summary());
    println!("  Gauge: {}", render_gauge(assessment.bmi));

    if dry_run {
        println!("\n[Dry run - not saving measurement]");
    } else {
        println!("\n✓ Measurement saved");
        println!("  History: {}", store.path().display());
    }

    Ok(())
}

fn cmd_history(store: &HistoryStore, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&store.load_all())?);
        return Ok(());
    }

    let records = store.load_records();
    if records.is_empty() {
        println!("No measurements recorded yet.");
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        println!(
            "#{:<3} {}  BMI {:>5.1}  {}",
            i + 1,
            record.recorded_at.format("%Y-%m-%d %H:%M"),
            record.bmi,
            record.category
        );
    }

    if let [.., previous, latest] = records.as_slice() {
        println!();
        println!("  Change since previous entry: {:+.1}", latest.bmi - previous.bmi);
    }

    Ok(())
}

/// Text rendition of the 0-50 gauge
fn render_gauge(bmi: f64) -> String {
    const WIDTH: usize = 25;
    let filled = ((gauge_value(bmi) / GAUGE_MAX) * WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.1}/{}",
        "█".repeat(filled),
        "░".repeat(WIDTH - filled),
        gauge_value(bmi),
        GAUGE_MAX
    )
}
