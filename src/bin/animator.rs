use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "animator", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a scene document and print the bound property values per tick.
    Sample(SampleArgs),
    /// Print the signal of one animator with interpolation flags.
    Preview(PreviewArgs),
    /// Validate a scene document.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Seconds of playback to sample.
    #[arg(long, default_value_t = 1.0)]
    duration: f64,

    /// Ticks per second.
    #[arg(long, default_value_t = animator::EvaluationContext::DEFAULT_SAMPLING_RATE)]
    rate: u32,

    /// Normalized pan location `x,y` held for the whole run.
    #[arg(long, value_parser = parse_point)]
    pan: Option<animator::Point>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Animator name.
    #[arg(long)]
    animator: String,

    /// Seconds to preview.
    #[arg(long, default_value_t = 1.0)]
    duration: f64,

    /// Samples per second.
    #[arg(long, default_value_t = 30)]
    rate: u32,

    /// Normalized pan location `x,y` for pan animators.
    #[arg(long, value_parser = parse_point)]
    pan: Option<animator::Point>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn parse_point(s: &str) -> Result<animator::Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(animator::Point::new(x, y))
}

fn read_doc_json(path: &Path) -> anyhow::Result<animator::SceneDocument> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: animator::SceneDocument =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(doc)
}

fn base_context(
    rate: u32,
    duration: f64,
    pan: Option<animator::Point>,
) -> anyhow::Result<animator::EvaluationContext> {
    if rate == 0 {
        anyhow::bail!("--rate must be > 0");
    }
    if !duration.is_finite() || duration < 0.0 {
        anyhow::bail!("--duration must be finite and >= 0, got {duration}");
    }
    let ctx = animator::EvaluationContext::new(rate, 0.0);
    Ok(match pan {
        Some(p) => ctx.with_pan(p),
        None => ctx,
    })
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let base = base_context(args.rate, args.duration, args.pan)?;
    let doc = read_doc_json(&args.in_path)?;
    let session = doc.load()?.into_session();
    session.start()?;

    let ticks = (args.duration * f64::from(args.rate)).round() as u64;
    let mut out = BufWriter::new(std::io::stdout().lock());
    for i in 0..=ticks {
        let ctx = base.with_elapsed(i as f64 / f64::from(args.rate));
        let report = session.tick(&ctx)?;
        let values: serde_json::Map<String, serde_json::Value> = report
            .applied
            .iter()
            .map(|c| (c.key.to_string(), serde_json::Value::from(c.value)))
            .collect();
        let line = serde_json::json!({
            "t": report.elapsed,
            "values": values,
            "held": report.held.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        writeln!(out, "{line}").context("write sample line")?;
    }
    out.flush().context("flush output")?;

    session.stop()?;
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let base = base_context(args.rate, args.duration, args.pan)?;
    let scene = read_doc_json(&args.in_path)?.load()?;
    let target = scene
        .registry
        .find_by_name(&args.animator)
        .with_context(|| format!("no animator named '{}'", args.animator))?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    for sample in animator::preview(&target.source, &base, args.duration) {
        writeln!(out, "{}", serde_json::to_string(&sample)?).context("write preview line")?;
    }
    out.flush().context("flush output")?;
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let doc = read_doc_json(&args.in_path)?;
    doc.validate()?;
    let bindings: usize = doc.objects.iter().map(|o| o.bindings.len()).sum();
    println!(
        "ok: {} animators, {} objects, {} bindings",
        doc.animators.len(),
        doc.objects.len(),
        bindings
    );
    Ok(())
}
