use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "beatslide", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a stage config (and optionally a timing track).
    Check(CheckArgs),
    /// Run the stage headlessly and write one JSON line per scene per frame.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Stage config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Timing track JSON (beats, chords, phrases).
    #[arg(long)]
    timing: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Stage config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Timing track JSON (beats, chords, phrases).
    #[arg(long)]
    timing: PathBuf,

    /// Frames per second of the simulated clock.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seconds to simulate. Defaults to the end of the track plus one second.
    #[arg(long)]
    seconds: Option<f64>,

    /// Output JSON-lines path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<beatslide::StageConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let config = beatslide::StageConfig::from_reader(BufReader::new(f))
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(config)
}

fn read_timing(path: &Path) -> anyhow::Result<beatslide::TimingTrack> {
    let f = File::open(path).with_context(|| format!("open timing '{}'", path.display()))?;
    let track = beatslide::TimingTrack::from_reader(BufReader::new(f))
        .with_context(|| format!("parse timing '{}'", path.display()))?;
    Ok(track)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    eprintln!(
        "config ok: {} scene(s) on a {}x{} grid",
        config.scenes.len(),
        config.viewports.cols,
        config.viewports.rows
    );

    if let Some(path) = &args.timing {
        let track = read_timing(path)?;
        eprintln!(
            "timing ok: {} beats, {} chords, {} phrases, {:.0} ms",
            track.beats.len(),
            track.chords.len(),
            track.phrases.len(),
            track.end_ms()
        );
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    let config = read_config(&args.config)?;
    let track = read_timing(&args.timing)?;
    let seconds = args.seconds.unwrap_or(track.end_ms() / 1000.0 + 1.0);
    if !seconds.is_finite() || seconds < 0.0 {
        anyhow::bail!("--seconds must be finite and >= 0, got {seconds}");
    }
    let offset = config.playback_offset_ms;

    let mut stage = beatslide::Stage::new(&config, track)?;

    let out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    let mut target = beatslide::JsonLinesTarget::new(out);

    let frame_ms = 1000.0 / f64::from(args.fps);
    let frames = (seconds * f64::from(args.fps)).ceil() as u64;
    for i in 0..frames {
        let now = beatslide::ClockMs(offset + i as f64 * frame_ms);
        let frame = stage.tick(now);
        stage
            .render(&frame, &mut target)
            .with_context(|| format!("render frame {i}"))?;
    }
    target.into_inner().flush().context("flush output")?;

    let stats = stage.stats();
    eprintln!(
        "simulated {} frames: {} transitions, {} busy, {} skipped",
        stats.frames, stats.transitions, stats.busy, stats.skipped
    );
    if let Some(path) = &args.out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
