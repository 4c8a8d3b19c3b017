mod console_renderer;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use pose_coach_core::config::routine_config::RoutineConfig;
use pose_coach_core::recording::infrastructure::keypoint_recording_reader::KeypointRecordingReader;
use pose_coach_core::recording::infrastructure::recorded_pose_estimator::RecordedPoseEstimator;
use pose_coach_core::session::session_logger::LogSessionLogger;

use crate::console_renderer::ConsoleStatusRenderer;

/// Replays recorded body keypoints through a pose-hold coaching routine.
#[derive(Parser)]
#[command(name = "pose-coach")]
struct Cli {
    /// Keypoint recording (JSON lines, one frame per line).
    recording: PathBuf,

    /// Routine file (defaults to the one in the user config directory, if any).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds a pose may drop out before its countdown resets.
    #[arg(long)]
    grace_period: Option<f64>,

    /// Ignore joints whose confidence is below this (0.0-1.0).
    #[arg(long, default_value = "0.0")]
    min_confidence: f64,

    /// End the replay as soon as every pose in the routine is done.
    #[arg(long)]
    stop_when_complete: bool,

    /// Also print idle poses.
    #[arg(long)]
    show_all: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let routine = load_routine(&cli)?;
    let mut session = routine
        .build_session()?
        .with_logger(Box::new(LogSessionLogger::default()));

    let mut source = KeypointRecordingReader::open(&cli.recording)?;
    let mut estimator = RecordedPoseEstimator::new(cli.min_confidence);
    let mut renderer = ConsoleStatusRenderer::new(io::stdout(), cli.show_all);

    let summary = session.run(&mut source, &mut estimator, &mut renderer)?;
    if !session.is_complete() {
        log::info!(
            "{} of {} poses completed",
            summary.completed.len(),
            session.trackers().count()
        );
    }
    Ok(())
}

fn load_routine(cli: &Cli) -> Result<RoutineConfig, Box<dyn std::error::Error>> {
    let mut routine = match &cli.config {
        Some(path) => RoutineConfig::load(path)?,
        None => match RoutineConfig::default_path().filter(|p| p.exists()) {
            Some(path) => {
                log::info!("Using routine from {}", path.display());
                RoutineConfig::load(&path)?
            }
            None => RoutineConfig::default(),
        },
    };

    if let Some(grace) = cli.grace_period {
        routine.grace_period_secs = grace;
    }
    if cli.stop_when_complete {
        routine.stop_when_complete = true;
    }
    routine.validate()?;
    Ok(routine)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    check_exists(&cli.recording, "Recording")?;
    if let Some(config) = &cli.config {
        check_exists(config, "Routine file")?;
    }
    if !(0.0..=1.0).contains(&cli.min_confidence) {
        return Err(format!(
            "Min confidence must be between 0.0 and 1.0, got {}",
            cli.min_confidence
        )
        .into());
    }
    if let Some(grace) = cli.grace_period {
        if !(grace.is_finite() && grace > 0.0) {
            return Err(format!("Grace period must be positive, got {grace}").into());
        }
    }
    Ok(())
}

fn check_exists(path: &Path, what: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("{what} not found: {}", path.display()).into());
    }
    Ok(())
}
