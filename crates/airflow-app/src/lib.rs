//! Airflow panel host
//!
//! Loads a telemetry row (or runs the demo source), renders the panel and
//! prints every draw command as one JSON line on stdout. Logs go to stderr.

use airflow_core::prelude::*;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("AIRFLOW_BUILD_ID"),
    ")"
);

/// Build id stamped by build.rs
pub fn build_id() -> &'static str {
    option_env!("AIRFLOW_BUILD_ID").unwrap_or("unknown")
}

/// Render the airflow panel as JSON draw commands.
#[derive(Parser, Debug)]
#[command(name = "airflow-panel", version, long_version = LONG_VERSION)]
pub struct Cli {
    /// JSON object of readings to render
    #[arg(long, conflicts_with = "demo")]
    pub telemetry: Option<PathBuf>,

    /// Panel layout JSON (defaults to the stock panel)
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Click an element by id after the first render (repeatable)
    #[arg(long = "click", value_name = "ID", conflicts_with = "demo")]
    pub clicks: Vec<ClickTarget>,

    /// Print the final element state instead of the command stream
    #[arg(long, conflicts_with = "demo")]
    pub scene: bool,

    /// Stream readings from the demo source
    #[arg(long)]
    pub demo: bool,

    /// Demo refresh interval
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Stop the demo after this many refreshes
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Seed the demo source
    #[arg(long)]
    pub seed: Option<u64>,
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Render(Options),
    Demo(DemoOptions),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub telemetry: Option<PathBuf>,
    pub layout: Option<PathBuf>,
    pub clicks: Vec<ClickTarget>,
    pub scene: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoOptions {
    pub layout: Option<PathBuf>,
    pub interval_ms: u64,
    pub ticks: Option<u64>,
    pub seed: Option<u64>,
}

impl From<Cli> for Command {
    fn from(cli: Cli) -> Self {
        if cli.demo {
            Command::Demo(DemoOptions {
                layout: cli.layout,
                interval_ms: cli.interval_ms,
                ticks: cli.ticks,
                seed: cli.seed,
            })
        } else {
            Command::Render(Options {
                telemetry: cli.telemetry,
                layout: cli.layout,
                clicks: cli.clicks,
                scene: cli.scene,
            })
        }
    }
}

fn load_layout(path: Option<&PathBuf>) -> Result<PanelLayout> {
    match path {
        Some(path) => PanelLayout::from_file(path)
            .with_context(|| format!("Failed to load layout {}", path.display())),
        None => Ok(PanelLayout::default()),
    }
}

fn load_snapshot(path: Option<&PathBuf>) -> Result<TelemetrySnapshot> {
    let Some(path) = path else {
        warn!("no telemetry given, rendering the initial panel state");
        return Ok(TelemetrySnapshot::new());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read telemetry {}", path.display()))?;
    TelemetrySnapshot::from_json_str(&json)
        .with_context(|| format!("Invalid telemetry in {}", path.display()))
}

fn write_json_lines<W, T>(out: &mut W, items: &[T]) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    for item in items {
        serde_json::to_writer(&mut *out, item)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Render one snapshot and apply the requested clicks.
///
/// Returns the number of lines written.
pub fn render_once<W: Write>(options: &Options, out: &mut W) -> Result<usize> {
    let renderer = PanelRenderer::new(load_layout(options.layout.as_ref())?);
    let mut snapshot = load_snapshot(options.telemetry.as_ref())?;

    if options.scene {
        let mut scene = SceneSurface::new();
        renderer.render(&snapshot, &mut scene);
        for target in &options.clicks {
            renderer.handle_click(*target, &mut snapshot, &mut scene);
        }
        serde_json::to_writer_pretty(&mut *out, &scene)?;
        writeln!(out)?;
        return Ok(1);
    }

    let mut surface = RecordingSurface::new();
    renderer.render(&snapshot, &mut surface);
    for target in &options.clicks {
        let redraw = renderer.handle_click(*target, &mut snapshot, &mut surface);
        debug!(%target, ?redraw, "click applied");
    }

    let commands = surface.take();
    write_json_lines(out, &commands)?;
    Ok(commands.len())
}

/// Stream demo readings through the renderer on a fixed interval.
///
/// Returns the number of refreshes performed.
pub async fn run_demo<W: Write>(options: &DemoOptions, out: &mut W) -> Result<u64> {
    let renderer = PanelRenderer::new(load_layout(options.layout.as_ref())?);
    let mut source = match options.seed {
        Some(seed) => DemoTelemetry::with_seed(seed),
        None => DemoTelemetry::new(),
    };
    let mut surface = RecordingSurface::new();
    let mut ticker =
        tokio::time::interval(tokio::time::Duration::from_millis(options.interval_ms));
    let start_time = Instant::now();
    let mut refreshes = 0;

    info!(interval_ms = options.interval_ms, "demo started");
    loop {
        if options.ticks.is_some_and(|ticks| refreshes >= ticks) {
            break;
        }
        ticker.tick().await;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        let snapshot = source.update(elapsed_ms);
        renderer.render(&snapshot, &mut surface);
        write_json_lines(out, &surface.take())?;
        out.flush()?;
        refreshes += 1;
    }
    info!(refreshes, "demo finished");
    Ok(refreshes)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point for the `airflow-panel` binary
pub fn run() -> Result<()> {
    init_tracing();

    let command = Command::from(Cli::parse());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Render(options) => {
            let lines = render_once(&options, &mut out)?;
            debug!(lines, "render finished");
        }
        Command::Demo(options) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("Failed to start runtime")?;
            runtime.block_on(run_demo(&options, &mut out))?;
        }
    }
    Ok(())
}
