use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gnss_war_room::config::Config;
use gnss_war_room::constellation::ConstellationRegistry;
use gnss_war_room::projection::{self, Observer, TrackProjector};
use gnss_war_room::time_expr::parse_time;
use gnss_war_room::track::{SatelliteSample, SharedSky};

#[derive(Parser)]
#[command(name = "gnss-war-room")]
#[command(about = "Project GNSS satellite readings onto a ground-track map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and its palette
    Validate { config: PathBuf },
    /// Ingest JSON-lines samples and print rendered tracks as JSON
    Render {
        config: PathBuf,
        samples: PathBuf,
        /// Reference time: RFC 3339 or T+<duration> from the newest sample
        #[arg(long, default_value = "T")]
        at: String,
    },
    /// Project a single azimuth/elevation reading
    Project {
        #[arg(long)]
        azimuth: f64,
        #[arg(long)]
        elevation: f64,
        #[arg(long, default_value = "GP")]
        network: String,
        /// Observer as "lat, lon"
        #[arg(long, allow_hyphen_values = true)]
        coordinates: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => validate(&config),
        Commands::Render {
            config,
            samples,
            at,
        } => render(&config, &samples, &at),
        Commands::Project {
            azimuth,
            elevation,
            network,
            coordinates,
        } => project_one(azimuth, elevation, &network, &coordinates),
    }
}

fn config_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn validate(path: &Path) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let palette = match config.load_palette(config_dir(path)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let observer = match config.observer() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Station {} at ({}, {})",
        config.station.name.as_deref().unwrap_or("<unnamed>"),
        observer.latitude_deg,
        observer.longitude_deg
    );

    let mut networks: Vec<_> = palette.network_names().collect();
    networks.sort_unstable();
    println!("Palette colours for: {}", networks.join(", "));
    ExitCode::SUCCESS
}

fn render(config_path: &Path, samples_path: &Path, at: &str) -> ExitCode {
    let config = match Config::from_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let (palette, observer) = match (
        config.load_palette(config_dir(config_path)),
        config.observer(),
    ) {
        (Ok(p), Ok(o)) => (p, o),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let reference = match parse_time(at) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Invalid reference time {:?}: {}", at, e);
            return ExitCode::FAILURE;
        }
    };
    let content = match fs::read_to_string(samples_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading samples: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sky = SharedSky::new(config.retention());
    let mut accepted = 0usize;
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let sample: SatelliteSample = match serde_json::from_str(line) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Skipping line {}: {}", line_no + 1, e);
                continue;
            }
        };
        match sky.ingest(sample) {
            Ok(()) => accepted += 1,
            Err(e) => log::warn!("Rejected sample on line {}: {}", line_no + 1, e),
        }
    }

    let Some(newest) = sky.newest_sample() else {
        eprintln!("No usable samples in {}", samples_path.display());
        return ExitCode::FAILURE;
    };
    let reference_at = reference.resolve(newest);
    if reference_at < newest {
        log::warn!(
            "Reference time {} is before the newest sample {}",
            reference_at,
            newest
        );
    }
    sky.prune(reference_at);
    log::info!("Ingested {} samples, rendering at {}", accepted, reference_at);

    let registry = ConstellationRegistry::default();
    let projector = TrackProjector::new(&registry, &palette);
    let rendered = match projector.project_all(&sky.snapshot(), &observer, reference_at) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Projection error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&rendered) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn project_one(azimuth: f64, elevation: f64, network: &str, coordinates: &str) -> ExitCode {
    let Some(observer) = Observer::from_coordinates(coordinates) else {
        eprintln!("Invalid coordinates: {:?}", coordinates);
        return ExitCode::FAILURE;
    };

    let registry = ConstellationRegistry::default();
    let altitude = registry.altitude_for_code(network);
    match projection::project(azimuth, elevation, altitude, &observer) {
        Ok(position) => {
            println!(
                "{} ({}) at altitude {}: lat {:.4}, lon {:.4}",
                network,
                registry.name_for_code(network),
                altitude,
                position.latitude,
                position.wrapped().longitude
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Projection error: {}", e);
            ExitCode::FAILURE
        }
    }
}
