//! Binary entry point for the hexdag CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hexdag::aggregate::Aggregator;
use hexdag::ingest::{self, InputFormat};
use hexdag::layout::{self, LayoutConfig};
use hexdag::render;
use hexdag::store::RecordStore;
use hexdag::view::Viewport;
use hexdag::{logging, Result};

#[derive(Parser, Debug)]
#[command(
    name = "hexdag",
    version,
    about = "Aggregate fixed-width byte tuples and lay them out as a frequency DAG",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        value_enum,
        default_value_t = FormatArg::HexLines,
        help = "How input lines on stdin are interpreted"
    )]
    format: FormatArg,

    #[arg(default_value_t = 8, help = "Record width in bytes (1..=1999)")]
    size: usize,

    #[arg(long, value_name = "FILE", help = "Persist records to this SQLite file")]
    db: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Write the export here instead of stdout")]
    out: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Svg,
        help = "Export format for the laid-out graph"
    )]
    output: OutputFormat,

    #[arg(long, help = "Viewport height override for the layout")]
    viewport_height: Option<f64>,

    #[arg(long, help = "Node box width override")]
    node_width: Option<f64>,

    #[arg(long, help = "Zoom factor applied to the export view")]
    zoom: Option<f64>,

    #[arg(long, default_value_t = 0.0, help = "Horizontal pan applied to the export view")]
    pan_x: f64,

    #[arg(long, default_value_t = 0.0, help = "Vertical pan applied to the export view")]
    pan_y: f64,

    #[arg(
        long,
        default_value = "info",
        env = "HEXDAG_LOG",
        help = "Tracing filter for stderr diagnostics"
    )]
    log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    /// One hex string per line.
    HexLines,
    /// One file path per line; the record is the file's first bytes.
    FileList,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::HexLines => InputFormat::HexLines,
            FormatArg::FileList => InputFormat::FileList,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Svg,
    Json,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    // Size validation happens here, before any input is read.
    let store = match &cli.db {
        Some(path) => RecordStore::open(path, cli.size)?,
        None => RecordStore::open_in_memory(cli.size)?,
    };

    let stdin = io::stdin();
    let report = ingest::ingest(&store, cli.format.into(), stdin.lock())?;
    eprintln!(
        "{} records stored, {} inputs skipped",
        report.stored, report.skipped
    );

    let mut config = LayoutConfig::default();
    if let Some(height) = cli.viewport_height {
        config.viewport_height = height;
    }
    if let Some(width) = cli.node_width {
        config.node_width = width;
    }

    let agg = Aggregator::new(&store);
    let graph = layout::build(&agg, &config)?;

    let mut view = Viewport::default();
    view.pan(cli.pan_x, cli.pan_y);
    if let Some(factor) = cli.zoom {
        view.zoom(hexdag::layout::Point { x: 0.0, y: 0.0 }, factor);
    }

    let mut sink: BufWriter<Box<dyn Write>> = BufWriter::new(match &cli.out {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    });
    match cli.output {
        OutputFormat::Svg => render::write_svg(&mut sink, &graph, &view)?,
        OutputFormat::Json => render::write_json(&mut sink, &graph)?,
    }
    sink.flush()?;
    Ok(())
}
