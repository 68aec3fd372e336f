//! Run the full Titanic experiment: load the training manifest,
//! engineer features and rank the default classifier battery.
//!
//! Usage: `titanic <train.csv> [--seed N] [--json results.json]`

use std::process;

use titanic_ml::compare::ComparisonHarness;
use titanic_ml::frame::csv::read_frame_from_path;
use titanic_ml::model::registry::default_registry;
use titanic_ml::titanic;
use tracing_subscriber::EnvFilter;

struct Args {
    csv_path: String,
    seed: u64,
    json_path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let csv_path = args.next().ok_or("missing path to the training CSV")?;
    let mut seed = 0;
    let mut json_path = None;
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed {:?}", value))?;
            }
            "--json" => {
                json_path = Some(args.next().ok_or("--json needs a path")?);
            }
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }
    Ok(Args {
        csv_path,
        seed,
        json_path,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: titanic <train.csv> [--seed N] [--json results.json]");
            process::exit(2);
        }
    };

    let raw = read_frame_from_path(&args.csv_path)?;
    tracing::info!(rows = raw.n_rows(), "loaded training manifest");

    let features = titanic::pipeline(args.seed).transform(raw)?;
    let (x, y) = titanic::feature_matrix(&features, "Survived")?;

    let harness = ComparisonHarness::new(default_registry());
    let rows = harness.compare(&x, &y)?;

    println!(
        "{:<32} {:>12} {:>12} {:>12} {:>10}",
        "Name", "Train Acc", "Dev Acc", "Dev 3*STD", "Fit (s)"
    );
    for row in &rows {
        println!(
            "{:<32} {:>12.4} {:>12.4} {:>12.4} {:>10.4}",
            row.name,
            row.train_accuracy_mean,
            row.dev_accuracy_mean,
            row.dev_accuracy_3std,
            row.fit_time_mean
        );
    }

    if let Some(path) = args.json_path {
        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, &rows)?;
        tracing::info!(path = path.as_str(), "wrote comparison results");
    }
    Ok(())
}
