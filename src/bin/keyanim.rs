use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keyanim", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a document at one clock reading and print the value as JSON.
    Sample(SampleArgs),
    /// Print `progress<TAB>value` lines across one iteration.
    Curve(CurveArgs),
    /// Map elapsed seconds through the document's timeline and print the value.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input animation document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Clock progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// 1-based iteration, used by cumulative animations.
    #[arg(long, default_value_t = 1)]
    iteration: u32,

    /// Clock state.
    #[arg(long, value_enum, default_value_t = StateArg::Active)]
    state: StateArg,
}

#[derive(Parser, Debug)]
struct CurveArgs {
    /// Input animation document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of intervals; `steps + 1` samples are printed.
    #[arg(long, default_value_t = 10)]
    steps: u32,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input animation document JSON (must carry a `timeline`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Seconds since the timeline started.
    #[arg(long)]
    elapsed: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StateArg {
    Active,
    Filling,
    Stopped,
}

impl From<StateArg> for keyanim::ClockState {
    fn from(s: StateArg) -> Self {
        match s {
            StateArg::Active => Self::Active,
            StateArg::Filling => Self::Filling,
            StateArg::Stopped => Self::Stopped,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Curve(args) => cmd_curve(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn load(path: &Path) -> anyhow::Result<keyanim::AnimationDocument> {
    let mut doc = keyanim::AnimationDocument::from_path(path)
        .with_context(|| format!("load document '{}'", path.display()))?;
    doc.freeze().context("freeze document")?;
    Ok(doc)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let doc = load(&args.in_path)?;
    let clock = keyanim::Clock::new(args.progress, args.iteration, args.state.into())?;
    let value = doc.sample(&clock)?;
    println!("{value}");
    Ok(())
}

fn cmd_curve(args: CurveArgs) -> anyhow::Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be > 0");
    }
    let doc = load(&args.in_path)?;
    for i in 0..=args.steps {
        let progress = f64::from(i) / f64::from(args.steps);
        let clock = keyanim::Clock::active(progress)?;
        let value = doc
            .sample(&clock)
            .with_context(|| format!("sample at progress {progress}"))?;
        println!("{progress:.4}\t{value}");
    }
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let doc = load(&args.in_path)?;
    let clock = doc.clock_at(args.elapsed)?;
    tracing::debug!(
        progress = clock.progress(),
        iteration = clock.iteration(),
        state = ?clock.state(),
        "timeline clock"
    );
    let value = doc.sample(&clock)?;
    println!("{value}");
    Ok(())
}
