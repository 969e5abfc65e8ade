//! The batch driver: resolves an input file or directory into an ordered
//! frame list, then renders a map per frame or a single keogram.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;
use walkdir::WalkDir;

use radar_grid::{naming, Frame, Keogram, KeogramCut, QuickplotError, QuickplotResult};
use radar_io::{FrameSource, KeogramSource};
use radar_render::{PlotConfig, ReflectivityStyle, RenderOutcome};

/// Spatial decimation factor applied to every frame before map rendering.
const FRAME_DOWNSAMPLE: usize = 8;

/// Rendering mode, decided once at the CLI boundary.
#[derive(Debug, Clone)]
pub enum Mode {
    Map,
    Keogram {
        cut: KeogramCut,
        /// The cut value exactly as typed, embedded in the output name.
        value_label: String,
    },
}

/// Everything one batch invocation needs.
#[derive(Debug, Clone)]
pub struct BatchArgs {
    /// A single source file, or a directory scanned with `pattern`.
    pub data_path: PathBuf,
    pub pattern: String,
    /// Files are written here; unset means interactive display.
    pub output_dir: Option<PathBuf>,
    pub world_file: Option<PathBuf>,
    pub mode: Mode,
    /// Extra latitude gridline on map figures.
    pub lat_tick: Option<f64>,
    pub scale_legend: Option<PathBuf>,
    /// Skip every render call; nothing is written or displayed.
    pub quiet: bool,
}

/// Rendering seam between the driver and the figure code. Tests observe
/// invocations through it.
pub trait PlotBackend {
    fn map_frame(
        &self,
        frame: &Frame,
        output: Option<&Path>,
        cfg: &PlotConfig,
        lat_tick: Option<f64>,
        legend: Option<&RgbaImage>,
    ) -> QuickplotResult<RenderOutcome>;

    fn keogram(
        &self,
        keo: &Keogram,
        output: Option<&Path>,
        cfg: &PlotConfig,
    ) -> QuickplotResult<RenderOutcome>;
}

/// Production backend over radar-render.
pub struct Renderer {
    style: ReflectivityStyle,
}

impl Renderer {
    pub fn new(style: ReflectivityStyle) -> Self {
        Self { style }
    }
}

impl PlotBackend for Renderer {
    fn map_frame(
        &self,
        frame: &Frame,
        output: Option<&Path>,
        cfg: &PlotConfig,
        lat_tick: Option<f64>,
        legend: Option<&RgbaImage>,
    ) -> QuickplotResult<RenderOutcome> {
        radar_render::render_map(frame, output, cfg, lat_tick, legend, &self.style)
    }

    fn keogram(
        &self,
        keo: &Keogram,
        output: Option<&Path>,
        cfg: &PlotConfig,
    ) -> QuickplotResult<RenderOutcome> {
        radar_render::render_keogram(keo, output, cfg, &self.style)
    }
}

/// Resolve the data path to an ordered list of source files.
///
/// A file is its own one-element list; a directory is scanned one level
/// deep for names matching `pattern`, sorted by file name. An empty
/// result is fatal.
pub fn resolve_inputs(data_path: &Path, pattern: &str) -> QuickplotResult<Vec<PathBuf>> {
    if data_path.is_file() {
        return Ok(vec![data_path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(data_path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| naming::matches_pattern(&entry.file_name().to_string_lossy(), pattern))
        .map(|entry| entry.into_path())
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        return Err(QuickplotError::NoInput {
            dir: data_path.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    Ok(files)
}

/// Run one batch. Returns the derived keogram output path, if any.
pub fn run(
    args: &BatchArgs,
    cfg: &PlotConfig,
    frames: &dyn FrameSource,
    keograms: &dyn KeogramSource,
    backend: &dyn PlotBackend,
) -> anyhow::Result<Option<PathBuf>> {
    let files = resolve_inputs(&args.data_path, &args.pattern)?;
    tracing::info!(count = files.len(), "resolved input files");

    match &args.mode {
        Mode::Keogram { cut, value_label } => {
            run_keogram(args, cfg, &files, cut, value_label, keograms, backend)
        }
        Mode::Map => {
            run_map_loop(args, cfg, &files, frames, backend)?;
            Ok(None)
        }
    }
}

fn stem_of(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
}

fn run_keogram(
    args: &BatchArgs,
    cfg: &PlotConfig,
    files: &[PathBuf],
    cut: &KeogramCut,
    value_label: &str,
    keograms: &dyn KeogramSource,
    backend: &dyn PlotBackend,
) -> anyhow::Result<Option<PathBuf>> {
    // files is non-empty after input resolution
    let first = stem_of(files.first().expect("non-empty file list"));
    let last = stem_of(files.last().expect("non-empty file list"));

    let output = args.output_dir.as_ref().map(|dir| {
        dir.join(naming::keogram_output_name(
            cut.axis.as_str(),
            value_label,
            first,
            last,
        ))
    });

    let keo = keograms
        .extract(files, cut, args.world_file.as_deref())
        .context("keogram extraction failed")?;

    if !args.quiet {
        backend.keogram(&keo, output.as_deref(), cfg)?;
    }

    if let Some(path) = &output {
        tracing::info!(path = %path.display(), "keogram created");
    }

    Ok(output)
}

fn run_map_loop(
    args: &BatchArgs,
    cfg: &PlotConfig,
    files: &[PathBuf],
    frames: &dyn FrameSource,
    backend: &dyn PlotBackend,
) -> anyhow::Result<()> {
    let legend = if args.quiet {
        None
    } else {
        radar_render::load_scale_legend(args.scale_legend.as_deref())?
    };

    for path in files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let output = args
            .output_dir
            .as_ref()
            .map(|dir| dir.join(naming::map_output_name(&cfg.projection, name)));

        let frame = frames
            .load(path, args.world_file.as_deref(), FRAME_DOWNSAMPLE)
            .with_context(|| format!("failed to load {}", path.display()))?;

        if args.quiet {
            continue;
        }

        if backend.map_frame(&frame, output.as_deref(), cfg, args.lat_tick, legend.as_ref())?
            == RenderOutcome::Skipped
        {
            tracing::warn!(path = %path.display(), "frame skipped");
        }
    }

    if args.output_dir.is_some() && !args.quiet {
        // advisory hint for stitching the written frames into an animation
        println!("\nImageMagick can assemble the rendered frames into an animated GIF:");
        println!("\n  convert {}*.png out.gif", cfg.projection);
    }

    Ok(())
}
