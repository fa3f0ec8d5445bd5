use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use svgmorph::{MorphConfig, Primitive, SvgGraphic, Vec2};

#[derive(Parser, Debug)]
#[command(name = "svgmorph", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an SVG file and print its primitives as JSON.
    Inspect(InspectArgs),
    /// Print the correspondence plan between two SVG files as JSON.
    Diff(DiffArgs),
    /// Run a morph between two SVG files and print every frame as JSON.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input SVG file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct DiffArgs {
    /// SVG file to morph from.
    #[arg(long)]
    from: PathBuf,

    /// SVG file to morph to.
    #[arg(long)]
    to: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// SVG file to morph from.
    #[arg(long)]
    from: PathBuf,

    /// SVG file to morph to.
    #[arg(long)]
    to: PathBuf,

    /// Transition duration in seconds.
    #[arg(long, default_value_t = 1.0)]
    duration: f64,

    /// Sampling rate in frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Optional morph config JSON (windows and easing).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Frame<'a> {
    index: u64,
    progress: f64,
    size: Vec2,
    nodes: &'a [Primitive],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Diff(args) => cmd_diff(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_svg(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read svg '{}'", path.display()))
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    println!("{out}");
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let markup = read_svg(&args.in_path)?;
    let parsed = svgmorph::parse_svg(&markup)
        .with_context(|| format!("parse svg '{}'", args.in_path.display()))?;
    for w in &parsed.warnings {
        eprintln!("warning: {w}");
    }
    print_json(&parsed)
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let from = svgmorph::parse_svg(&read_svg(&args.from)?)
        .with_context(|| format!("parse svg '{}'", args.from.display()))?;
    let to = svgmorph::parse_svg(&read_svg(&args.to)?)
        .with_context(|| format!("parse svg '{}'", args.to.display()))?;
    print_json(&svgmorph::diff(&from, &to))
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => MorphConfig::from_path(path)?,
        None => MorphConfig::default(),
    };
    let mut graphic = SvgGraphic::new(read_svg(&args.from)?)?.with_config(config)?;
    let target = read_svg(&args.to)?;

    let mut frames = Vec::new();
    let mut failure = None;
    let count = graphic.run_transition(&target, args.duration, args.fps, |g, progress| {
        if failure.is_some() {
            return;
        }
        let frame = Frame {
            index: frames.len() as u64,
            progress,
            size: g.size(),
            nodes: g.nodes(),
        };
        match serde_json::to_value(&frame) {
            Ok(v) => frames.push(v),
            Err(e) => failure = Some(e),
        }
    })?;
    if let Some(e) = failure {
        return Err(e).context("serialize frame");
    }

    tracing::debug!(frames = count, "sampled transition");
    print_json(&frames)
}
