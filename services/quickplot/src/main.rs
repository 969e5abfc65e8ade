//! Radar quickplot: batch-render radar reflectivity mosaics to map
//! overlays and keograms.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use quickplot::batch::{self, BatchArgs, Mode, Renderer};
use quickplot::config::load_plot_config;
use radar_grid::{CutAxis, KeogramCut};
use radar_io::{RasterFrameLoader, SliceKeogramExtractor};
use radar_render::ReflectivityStyle;

#[derive(Parser, Debug)]
#[command(name = "quickplot")]
#[command(about = "Render radar reflectivity mosaics to map overlays and keograms")]
struct Args {
    /// Radar data file, or a directory scanned with --pat
    datadir: PathBuf,

    /// File name pattern used when DATADIR is a directory
    #[arg(short, long, default_value = "*.png")]
    pat: String,

    /// Output directory; frames display interactively when unset
    #[arg(short, long)]
    odir: Option<PathBuf>,

    /// World file georeferencing the source rasters
    #[arg(short, long)]
    wld: Option<PathBuf>,

    /// Keogram mode: cut axis and value, e.g. --keo lat 40.0
    #[arg(long, num_args = 2, value_names = ["AXIS", "VALUE"])]
    keo: Option<Vec<String>>,

    /// Extra latitude gridline on map figures
    #[arg(long)]
    lattick: Option<f64>,

    /// Color-scale legend bitmap overlaid on map figures
    #[arg(long)]
    scale: Option<PathBuf>,

    /// Style JSON with reflectivity color stops
    #[arg(long, env = "QUICKPLOT_STYLE")]
    style: Option<PathBuf>,

    /// YAML plot-configuration override
    #[arg(long, env = "QUICKPLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Resolve inputs and build data but skip all rendering
    #[arg(short, long)]
    quiet: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cfg = load_plot_config(args.config.as_deref())?;

    let mode = match &args.keo {
        Some(keo) => {
            let axis: CutAxis = keo[0].parse()?;
            let value: f64 = keo[1]
                .parse()
                .with_context(|| format!("invalid keogram cut value '{}'", keo[1]))?;
            Mode::Keogram {
                cut: KeogramCut::new(axis, value),
                value_label: keo[1].clone(),
            }
        }
        None => Mode::Map,
    };

    let style = match &args.style {
        Some(path) => ReflectivityStyle::from_file(path)?,
        None => ReflectivityStyle::reflectivity(),
    };

    let batch_args = BatchArgs {
        data_path: args.datadir,
        pattern: args.pat,
        output_dir: args.odir,
        world_file: args.wld,
        mode,
        lat_tick: args.lattick,
        scale_legend: args.scale,
        quiet: args.quiet,
    };

    let loader = RasterFrameLoader::new(cfg.view());
    let extractor = SliceKeogramExtractor::new(loader.clone());
    let backend = Renderer::new(style);

    if let Some(path) = batch::run(&batch_args, &cfg, &loader, &extractor, &backend)? {
        info!(path = %path.display(), "keogram output");
    }

    Ok(())
}
