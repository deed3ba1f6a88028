use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cuecast", version)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frame schedule as JSON.
    Schedule(CompArgs),
    /// Print one evaluated frame as JSON.
    Frame(FrameArgs),
    /// Report cue ordering problems; exits non-zero if any.
    Validate(CompArgs),
    /// Print `frame,opacity` CSV for one cue.
    Curve(CurveArgs),
}

#[derive(Args, Debug)]
struct CompArgs {
    /// Input cue JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output preset.
    #[arg(long, value_enum, default_value_t = PresetChoice::Wide)]
    preset: PresetChoice,

    /// Override the preset frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Timing JSON; absent fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail if cues are unsorted, overlapping or malformed.
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Soundtrack path, played from frame 0.
    #[arg(long)]
    audio: Option<String>,

    /// Logo image; its intrinsic size is probed.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Font used to measure primary text. Without it, layout uses the fallback width.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CurveArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// Cue index (0-based).
    #[arg(long)]
    index: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    /// 1920x1080.
    Wide,
    /// 1080x1920.
    Tall,
}

#[derive(serde::Serialize)]
struct ScheduleReport<'a> {
    composition: &'a str,
    fps: cuecast::Fps,
    total_frames: u64,
    intervals: &'a [cuecast::ScheduledInterval],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Curve(args) => cmd_curve(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_cues(path: &Path) -> anyhow::Result<Vec<cuecast::Cue>> {
    let f = File::open(path).with_context(|| format!("open cues '{}'", path.display()))?;
    let cues = cuecast::read_cues_json(BufReader::new(f))
        .with_context(|| format!("parse cues '{}'", path.display()))?;
    Ok(cues)
}

fn read_timing(path: &Path) -> anyhow::Result<cuecast::TimingConfig> {
    let f = File::open(path).with_context(|| format!("open timing '{}'", path.display()))?;
    let timing: cuecast::TimingConfig = serde_json::from_reader(BufReader::new(f))
        .with_context(|| "parse timing JSON")?;
    Ok(timing)
}

fn map_preset(choice: PresetChoice) -> cuecast::OutputPreset {
    match choice {
        PresetChoice::Wide => cuecast::OutputPreset::Landscape1920x1080,
        PresetChoice::Tall => cuecast::OutputPreset::Portrait1080x1920,
    }
}

fn load_comp(args: &CompArgs) -> anyhow::Result<cuecast::CaptionComposition> {
    let cues = read_cues(&args.in_path)?;
    if args.strict {
        cuecast::ensure_valid_cues(&cues)?;
    }

    let mut comp = cuecast::CaptionComposition::new(map_preset(args.preset), cues);
    if let Some(n) = args.fps {
        comp = comp.with_fps(cuecast::Fps::integer(n)?);
    }
    if let Some(path) = &args.config {
        comp = comp.with_timing(read_timing(path)?);
    }
    comp.validate()?;
    Ok(comp)
}

fn write_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).with_context(|| "write JSON")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_schedule(args: CompArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args)?;
    let intervals = comp.schedule();
    write_json(&ScheduleReport {
        composition: &comp.id,
        fps: comp.fps,
        total_frames: comp.duration().0,
        intervals: &intervals,
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut comp = load_comp(&args.comp)?;
    if let Some(source) = args.audio {
        comp = comp.with_audio(source);
    }
    if let Some(path) = &args.logo {
        let size = cuecast::probe_image_file(path)?;
        comp = comp.with_logo(path.display().to_string());
        if let Some(logo) = comp.logo.as_mut() {
            logo.intrinsic_size = Some(size);
        }
    }

    let session = cuecast::CaptionSession::new(comp, cuecast::SessionOpts::default())?;
    if let Some(path) = &args.font {
        let bytes = cuecast::read_font_file(path)?;
        let mut measurer = cuecast::ParleyMeasurer::new(&bytes)?;
        let measured = session.measure_pending(&mut measurer)?;
        tracing::debug!(family = measurer.family_name(), measured, "measured primary text");
    }

    let frame = session.eval_frame(cuecast::FrameIndex(args.frame))?;
    write_json(&frame)
}

fn cmd_validate(args: CompArgs) -> anyhow::Result<()> {
    let cues = read_cues(&args.in_path)?;
    let violations = cuecast::validate_cues(&cues);
    if violations.is_empty() {
        eprintln!("{}: {} cues ok", args.in_path.display(), cues.len());
        return Ok(());
    }

    for v in &violations {
        tracing::warn!(cue = v.index(), "{v}");
        println!("{v}");
    }
    anyhow::bail!(
        "{}: {} violation(s) in {} cues",
        args.in_path.display(),
        violations.len(),
        cues.len()
    )
}

fn cmd_curve(args: CurveArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args.comp)?;
    let intervals = comp.schedule();
    let iv = intervals
        .get(args.index)
        .with_context(|| format!("cue index {} out of range ({} cues)", args.index, intervals.len()))?;
    let params = comp.timing.fade_params(comp.fps);

    let mut out = std::io::stdout().lock();
    writeln!(out, "frame,opacity")?;
    for frame in iv.range().frames() {
        let opacity = cuecast::interval_opacity(iv, frame, &params);
        writeln!(out, "{},{opacity:.6}", frame.0)?;
    }
    Ok(())
}
