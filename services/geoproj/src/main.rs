//! geoproj command-line tool.
//!
//! Projects points and GeoJSON through a configurable projection and prints
//! the result as JSON on stdout. Logs go to stderr.
//!
//! Configuration is layered: an optional YAML/JSON file, then `GEOPROJ_*`
//! environment variables (a `.env` file is honoured), then command-line
//! flags.

mod commands;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use geo_common::Extent;
use geo_projection::{ProjectionConfig, ProjectorKind};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "geoproj")]
#[command(about = "Project coordinates and GeoJSON onto the plane")]
struct Args {
    /// Configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long, env = "GEOPROJ_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

/// Flags that override the file and environment configuration.
#[derive(ClapArgs, Debug, Default)]
struct Overrides {
    /// Base projector: equirectangular, mercator or transverse_mercator
    #[arg(long, global = true)]
    projector: Option<ProjectorKind>,

    /// Scale factor
    #[arg(long, global = true)]
    scale: Option<f64>,

    /// Translate point as "x,y"
    #[arg(long, global = true, value_parser = parse_floats::<2>, allow_hyphen_values = true)]
    translate: Option<[f64; 2]>,

    /// Center as "lon,lat" in degrees
    #[arg(long, global = true, value_parser = parse_floats::<2>, allow_hyphen_values = true)]
    center: Option<[f64; 2]>,

    /// Rotation as "lambda,phi[,gamma]" in degrees
    #[arg(long, global = true, value_parser = parse_rotation, allow_hyphen_values = true)]
    rotate: Option<[f64; 3]>,

    /// Resampling precision in pixels (0 disables resampling)
    #[arg(long, global = true)]
    precision: Option<f64>,

    /// Clip extent as "x0,y0,x1,y1"
    #[arg(long, global = true, allow_hyphen_values = true)]
    clip_extent: Option<Extent>,

    /// Disable the antimeridian cut
    #[arg(long, global = true)]
    no_antimeridian_clip: bool,
}

impl Overrides {
    fn apply(&self, mut config: ProjectionConfig) -> ProjectionConfig {
        if let Some(projector) = self.projector {
            config.projector = projector;
        }
        if let Some(scale) = self.scale {
            config.scale = Some(scale);
        }
        if let Some(translate) = self.translate {
            config.translate = translate;
        }
        if let Some(center) = self.center {
            config.center = center;
        }
        if let Some(rotate) = self.rotate {
            config.rotate = Some(rotate);
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(extent) = self.clip_extent {
            config.clip_extent = Some(extent);
        }
        if self.no_antimeridian_clip {
            config.antimeridian_clip = false;
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a single point
    #[command(allow_negative_numbers = true)]
    Project {
        /// Longitude in degrees
        lon: f64,
        /// Latitude in degrees
        lat: f64,
    },

    /// Invert a single device point
    #[command(allow_negative_numbers = true)]
    Invert {
        x: f64,
        y: f64,
    },

    /// Project GeoJSON and print the resulting stream events
    Stream {
        /// GeoJSON file, or "-" for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Spherical centroid of GeoJSON
    Centroid {
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Projected bounds of GeoJSON
    Bounds {
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Fit the projection to GeoJSON and print the fitted scale and translate
    Fit {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Target extent as "x0,y0,x1,y1"
        #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["width", "height"])]
        extent: Option<Extent>,

        /// Target width
        #[arg(long)]
        width: Option<f64>,

        /// Target height
        #[arg(long)]
        height: Option<f64>,
    },
}

fn parse_floats<const N: usize>(value: &str) -> std::result::Result<[f64; N], String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|e| format!("'{}': {}", part.trim(), e)))
        .collect::<std::result::Result<Vec<f64>, String>>()?;
    parts
        .try_into()
        .map_err(|parts: Vec<f64>| format!("expected {} comma-separated numbers, got {}", N, parts.len()))
}

fn parse_rotation(value: &str) -> std::result::Result<[f64; 3], String> {
    match parse_floats::<2>(value) {
        Ok([lambda, phi]) => Ok([lambda, phi, 0.0]),
        Err(_) => parse_floats::<3>(value),
    }
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr).with_target(true);
    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &Args) -> Result<ProjectionConfig> {
    let config = match &args.config {
        Some(path) => ProjectionConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ProjectionConfig::default(),
    };
    let config = args.overrides.apply(config.with_env_overrides());
    config.validate().context("Invalid projection configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    let config = load_config(&args)?;
    info!(projector = %config.projector, "Loaded configuration");
    debug!(?config, "Effective configuration");

    let mut projection = config.build()?;
    let output = commands::run(&args.command, &mut projection)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
