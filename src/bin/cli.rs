//! photospots CLI - Debug tool for cluster curation
//!
//! Usage:
//!   photospots-cli curate <points.json> --labels <labels.json> [--output <file>]
//!   photospots-cli params <points.json> [--config <config.json>]
//!
//! Points are a JSON array of `{id, longitude, latitude, weight}` records.
//! Labels are a JSON array of integers (one per point, -1 = noise) produced
//! by an external clustering run, replayed through the curation stages.

use clap::{Parser, Subcommand};
use photospots::{
    BackendKind, CurationConfig, CurationResult, PhotoPoint, PrecomputedLabels, ReferenceLocation,
    curate_and_rank, project, select,
};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "photospots-cli")]
#[command(about = "Debug tool for photo cluster curation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reference latitude for the longitude correction
    #[arg(long, global = true, default_value_t = ReferenceLocation::TORONTO.latitude)]
    reference_lat: f64,

    /// Reference longitude
    #[arg(long, global = true, default_value_t = ReferenceLocation::TORONTO.longitude)]
    reference_lon: f64,

    /// JSON config file (camelCase keys; missing keys take defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a labeling through trimming, admission and ranking
    Curate {
        /// JSON file with the photo points
        points: PathBuf,

        /// JSON file with one label per point
        #[arg(short, long)]
        labels: PathBuf,

        /// Backend family the labeling came from
        #[arg(short, long, default_value = "reachability")]
        backend: String,

        /// Write the curation result as JSON here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the parameters each backend family would be given
    Params {
        /// JSON file with the photo points
        points: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();
    let reference = ReferenceLocation::new(cli.reference_lon, cli.reference_lat);

    let config = match &cli.config {
        Some(path) => match read_json::<CurationConfig>(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => CurationConfig::default(),
    };

    let outcome = match cli.command {
        Commands::Curate {
            points,
            labels,
            backend,
            output,
        } => run_curate(
            &points,
            &labels,
            &backend,
            output.as_deref(),
            reference,
            &config,
            cli.verbose,
        ),
        Commands::Params { points } => run_params(&points, reference, &config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| format!("{}: {}", path.display(), e))
}

fn parse_backend(name: &str) -> Result<BackendKind, String> {
    match name.to_lowercase().as_str() {
        "radius" | "dbscan" => Ok(BackendKind::Radius),
        "reachability" | "optics" => Ok(BackendKind::Reachability),
        "hierarchical" | "hdbscan" => Ok(BackendKind::Hierarchical),
        other => Err(format!("unknown backend '{}'", other)),
    }
}

fn load_points(path: &Path) -> Result<Vec<PhotoPoint>, String> {
    println!("\n{}", "=".repeat(60));
    println!("Loading points from: {}", path.display());
    println!("{}", "=".repeat(60));

    let points: Vec<PhotoPoint> = read_json(path)?;
    if let Some(bad) = points.iter().find(|p| !p.is_valid()) {
        return Err(format!(
            "{}: point '{}' is off the globe or has a negative weight",
            path.display(),
            bad.id
        ));
    }
    let max_weight = points.iter().map(|p| p.weight).fold(0.0, f64::max);
    println!("  Loaded {} points (max weight {:.0})", points.len(), max_weight);
    Ok(points)
}

/// Run curation over a stored labeling
fn run_curate(
    points_path: &Path,
    labels_path: &Path,
    backend: &str,
    output: Option<&Path>,
    reference: ReferenceLocation,
    config: &CurationConfig,
    verbose: bool,
) -> Result<(), String> {
    let points = load_points(points_path)?;
    let labels: Vec<i32> = read_json(labels_path)?;
    let kind = parse_backend(backend)?;

    println!("\n{}", "=".repeat(60));
    println!("CLUSTER CURATION");
    println!("{}", "=".repeat(60));
    println!(
        "  Reference: ({:.6}, {:.6})",
        reference.latitude, reference.longitude
    );

    if verbose {
        println!("\n[Config]");
        println!("  global_min_samples: {}", config.global_min_samples);
        println!("  sigma: {}", config.sigma);
        println!("  critical_char_dist: {:?}", config.critical_char_dist);
        println!("  critical_views: {:?}", config.critical_views);
        println!("  weight_summary: {:?}", config.weight_summary);
    }

    let replay = PrecomputedLabels::new(kind, labels);
    let result = curate_and_rank(&points, reference, &replay, config).map_err(|e| e.to_string())?;

    print_result(&result, &points, verbose);

    if let Some(path) = output {
        let file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &result).map_err(|e| e.to_string())?;
        println!("\nWrote result to {}", path.display());
    }
    Ok(())
}

fn print_result(result: &CurationResult, points: &[PhotoPoint], verbose: bool) {
    println!("\n{}", "-".repeat(60));
    println!(
        "RESULTS: {} curated clusters, {} background points",
        result.curated_clusters.len(),
        result.noise_indices().len()
    );
    println!("{}", "-".repeat(60));

    for cluster in &result.curated_clusters {
        println!(
            "\n  Rank {} (label {}, {} photos):",
            cluster.rank, cluster.label, cluster.member_count
        );
        println!(
            "    Centroid: ({:.6}, {:.6})",
            cluster.centroid.latitude, cluster.centroid.longitude
        );
        println!("    Avg. weight per photo: {:.0}", cluster.avg_weight);
        println!("    Score: {:.3}", cluster.score);
        if verbose {
            println!("    Best examples:");
            for &idx in &cluster.best_example_indices {
                let p = &points[idx];
                println!("      - {} ({:.0})", p.id, p.weight);
            }
        }
    }
}

/// Print parameters for every backend family
fn run_params(
    points_path: &Path,
    reference: ReferenceLocation,
    config: &CurationConfig,
) -> Result<(), String> {
    let points = load_points(points_path)?;
    let projected = project(&points, reference.latitude);

    println!("\n{}", "=".repeat(60));
    println!("BACKEND PARAMETERS");
    println!("{}", "=".repeat(60));
    println!(
        "  Reference: ({:.6}, {:.6})",
        reference.latitude, reference.longitude
    );

    for kind in [BackendKind::Radius, BackendKind::Reachability, BackendKind::Hierarchical] {
        let params = select(&projected, kind, config).map_err(|e| e.to_string())?;
        println!("  {:<13} {:?}", kind.to_string(), params);
    }
    Ok(())
}
