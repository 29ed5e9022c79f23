//! Rep Form Tracker - timed exercise sessions scored from pose landmarks
//!
//! Single-session CLI application. Each `track` run counts repetitions of one
//! exercise for a fixed time, scores form from a joint angle and appends the
//! workout to a JSON history file.

mod cli;
mod config;
mod error;
mod exercise;
mod pose;
mod record;
mod render;
mod session;
mod tracker;

use clap::{Parser, Subcommand, ValueEnum};
use cli::{Display, InputHandler, InterruptFlag};
use config::{
    parse_fps, parse_tolerance, RepThresholds, TrackerConfig, DEFAULT_HISTORY_PATH,
    MAX_SECONDS_PER_REP, SECONDS_PER_REP,
};
use exercise::ExerciseProfile;
use pose::{PoseSource, ReplaySource, SyntheticConfig, SyntheticSource};
use record::{JsonFileStore, WorkoutStore};
use render::{FanOut, OverlayRecorder, RenderSink};
use session::SystemClock;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracker::{AbortSignal, SessionResult, Tracker};

#[derive(Parser, Debug)]
#[command(name = "Rep Form Tracker")]
#[command(about = "Count reps and score form from pose landmarks")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one timed tracking session
    Track(TrackArgs),
    /// List stored workouts
    History {
        /// Path to the workout history file
        #[arg(long, default_value = DEFAULT_HISTORY_PATH)]
        history: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Generated motion for the exercise's joints
    Synthetic,
    /// Recorded frames from a JSON file
    Replay,
}

#[derive(clap::Args, Debug)]
struct TrackArgs {
    /// Exercise name, e.g. "Bicep Curls"
    exercise: String,

    /// Requested repetitions (sets the session length)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    reps: u32,

    /// Path to the workout history file
    #[arg(long, default_value = DEFAULT_HISTORY_PATH)]
    history: PathBuf,

    /// Where pose frames come from
    #[arg(long, value_enum, default_value_t = SourceKind::Synthetic)]
    source: SourceKind,

    /// Frame file for `--source replay`
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Seed for the synthetic source
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Frame rate of the synthetic source
    #[arg(long, default_value_t = 30.0, value_parser = parse_fps)]
    fps: f64,

    /// Seconds allowed per requested rep
    #[arg(
        long,
        default_value_t = SECONDS_PER_REP,
        value_parser = clap::value_parser!(u64).range(1..=MAX_SECONDS_PER_REP)
    )]
    seconds_per_rep: u64,

    /// Count a half rep within this many percent of either extreme (0-49)
    #[arg(long, value_parser = parse_tolerance)]
    tolerance: Option<f64>,

    /// Write every frame's overlay to this file as JSON lines
    #[arg(long)]
    overlay_log: Option<PathBuf>,

    /// No terminal HUD; print the result as JSON
    #[arg(long)]
    headless: bool,
}

impl TrackArgs {
    fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            seconds_per_rep: self.seconds_per_rep,
            thresholds: self
                .tolerance
                .map(RepThresholds::with_tolerance)
                .unwrap_or_default(),
            ..TrackerConfig::default()
        }
    }
}

/// Open the pose source for a resolved exercise
fn open_source(
    args: &TrackArgs,
    profile: &ExerciseProfile,
) -> Result<Box<dyn PoseSource>, Box<dyn Error>> {
    match args.source {
        SourceKind::Synthetic => {
            let config = SyntheticConfig {
                fps: args.fps,
                seed: args.seed,
                ..SyntheticConfig::default()
            };
            let range = (profile.calibration.low, profile.calibration.high);
            Ok(Box::new(SyntheticSource::new(profile.joints.ids(), range, config)))
        }
        SourceKind::Replay => {
            let path = args
                .replay
                .as_deref()
                .ok_or("--replay <FILE> is required with --source replay")?;
            let source = ReplaySource::load(path)?;
            info!("Replaying {} frames from {}", source.remaining(), path.display());
            Ok(Box::new(source))
        }
    }
}

fn report(result: &SessionResult, display: Option<&Display>) -> Result<(), Box<dyn Error>> {
    match display {
        Some(display) => display.show_result(result)?,
        None => println!("{}", serde_json::to_string_pretty(result)?),
    }

    if result.success {
        Ok(())
    } else {
        Err(result.message.clone().into())
    }
}

fn track(args: TrackArgs) -> Result<(), Box<dyn Error>> {
    let profile = match ExerciseProfile::lookup(&args.exercise) {
        Ok(profile) => profile,
        Err(e) => {
            let names: Vec<_> = ExerciseProfile::names().collect();
            info!("Supported exercises: {}", names.join(", "));
            return report(&SessionResult::from_outcome(&Err(e), None), None);
        }
    };

    let config = args.tracker_config();
    let session_secs = match config.session_duration(args.reps) {
        Ok(duration) => duration.as_secs(),
        Err(e) => return report(&SessionResult::from_outcome(&Err(e), None), None),
    };
    let tracker = Tracker::new(config, SystemClock);
    let mut store = JsonFileStore::new(&args.history);
    info!("Workout history: {}", store.path().display());
    let mut source = open_source(&args, profile)?;

    let mut recorder = args
        .overlay_log
        .as_deref()
        .map(OverlayRecorder::create)
        .transpose()?;

    let mut display = if args.headless {
        None
    } else {
        Some(Display::new(profile.name, args.reps))
    };
    let mut input = InputHandler::new();
    let mut interrupt = InterruptFlag::new();

    match &display {
        Some(display) => {
            InputHandler::enable_raw_mode()?;
            display.clear()?;
            display.show_header(session_secs)?;
        }
        // Raw mode is off, so Ctrl+C arrives as SIGINT
        None => interrupt.install()?,
    }

    let (outcome, render_reference) = {
        let mut sinks = FanOut::new();
        if let Some(display) = display.as_mut() {
            sinks.push(display);
        }
        if let Some(recorder) = recorder.as_mut() {
            sinks.push(recorder);
        }
        let render_reference = sinks.reference();

        let sink: Option<&mut dyn RenderSink> = if sinks.is_empty() {
            None
        } else {
            Some(&mut sinks)
        };
        let abort: &mut dyn AbortSignal = if args.headless {
            &mut interrupt
        } else {
            &mut input
        };

        let outcome = tracker.track(
            &args.exercise,
            args.reps,
            source.as_mut(),
            sink,
            abort,
            &mut store,
        );
        (outcome, render_reference)
    };

    if let Some(display) = &display {
        display.shutdown()?;
    }
    if let Some(recorder) = &recorder {
        info!("Wrote {} overlays", recorder.written());
    }
    if let Ok(done) = &outcome {
        info!(
            "{} session lasted {:.1}s",
            done.summary.exercise,
            done.summary.elapsed.as_secs_f64()
        );
    }

    let result = SessionResult::from_outcome(&outcome, render_reference);
    report(&result, display.as_ref())
}

fn history(path: &Path) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::new(path);
    let records = store.load()?;
    Display::show_history(&records)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // The HUD owns stdout; logs go to stderr
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Track(args) => track(args),
        Command::History { history: path } => history(&path),
    }
}
