use std::path::PathBuf;
use std::process;

use clap::Parser;

use facetrack_core::capture::domain::frame_source::FrameSource;
use facetrack_core::capture::infrastructure::image_sequence_source::ImageSequenceSource;
use facetrack_core::pipeline::session_logger::StdoutSessionLogger;
use facetrack_core::pipeline::track_target_use_case::{
    FrameCallback, FrameOutcome, TrackTargetUseCase,
};
use facetrack_core::shared::constants::{
    DEFAULT_CENTER_THRESHOLD, DEFAULT_LEFT_THRESHOLD, DEFAULT_RIGHT_THRESHOLD,
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TARGET_FACE_FILE,
};
use facetrack_core::steering::domain::controller::{SteerController, SteerThresholds};
use facetrack_core::steering::domain::motor_link::{MotorLink, NullMotorLink};
use facetrack_core::steering::infrastructure::process_motor_link::ProcessMotorLink;
use facetrack_core::tracking::domain::face_detector::FaceDetector;
use facetrack_core::tracking::domain::face_matcher::FaceMatcher;
use facetrack_core::tracking::domain::position_smoother::{PositionSmoother, DEFAULT_WINDOW};
use facetrack_core::tracking::infrastructure::image_target_store::ImageTargetStore;
use facetrack_core::tracking::infrastructure::l2_metric::L2DescriptorMetric;
use facetrack_core::tracking::infrastructure::scripted_detector::ScriptedDetector;

/// Keeps a previously identified face centered by steering a single-axis
/// motor platform.
#[derive(Parser)]
#[command(name = "facetrack")]
struct Cli {
    /// Directory of frame images, processed in name order.
    frames: PathBuf,

    /// Per-frame detections file: one JSON array of boxes per line,
    /// e.g. [{"x":120,"y":40,"w":64,"h":64}].
    #[arg(long)]
    detections: PathBuf,

    /// External motor-control program; commands go to its stdin.
    /// Without it, commands are decided but discarded (dry run).
    #[arg(long)]
    motor: Option<PathBuf>,

    /// Where the reference face crop is persisted.
    #[arg(long, default_value = DEFAULT_TARGET_FACE_FILE)]
    target_face: PathBuf,

    /// Pixel offset from frame center that triggers steering left.
    #[arg(long, default_value_t = DEFAULT_LEFT_THRESHOLD)]
    left_threshold: i32,

    /// Pixel offset from frame center that triggers steering right.
    #[arg(long, default_value_t = DEFAULT_RIGHT_THRESHOLD)]
    right_threshold: i32,

    /// Half-width of the centered dead zone, in pixels.
    #[arg(long, default_value_t = DEFAULT_CENTER_THRESHOLD)]
    center_threshold: i32,

    /// Maximum match distance for re-identifying the target.
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    similarity_threshold: f64,

    /// Number of recent positions averaged for smoothing.
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    smoothing_window: usize,

    /// Stop after this many frames (default: run the whole sequence).
    #[arg(long)]
    max_frames: Option<usize>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let source: Box<dyn FrameSource> = Box::new(ImageSequenceSource::open(&cli.frames)?);
    let detector: Box<dyn FaceDetector> = Box::new(ScriptedDetector::from_path(&cli.detections)?);

    let matcher = FaceMatcher::new(
        Box::new(ImageTargetStore::new(&cli.target_face)),
        Box::new(L2DescriptorMetric),
        cli.similarity_threshold,
    );

    let motor: Box<dyn MotorLink> = match &cli.motor {
        Some(program) => Box::new(ProcessMotorLink::spawn(program)?),
        None => {
            log::info!("no motor program given, running dry");
            Box::new(NullMotorLink)
        }
    };

    let on_frame: Option<FrameCallback> = cli.max_frames.map(|max| {
        let mut seen = 0usize;
        Box::new(move |_: &FrameOutcome| {
            seen += 1;
            seen < max
        }) as FrameCallback
    });

    let mut use_case = TrackTargetUseCase::new(
        source,
        detector,
        matcher,
        PositionSmoother::new(cli.smoothing_window),
        SteerController::new(SteerThresholds {
            left: cli.left_threshold,
            right: cli.right_threshold,
            center: cli.center_threshold,
        }),
        motor,
        Box::new(StdoutSessionLogger::default()),
        on_frame,
        None,
    );

    let summary = use_case.run()?;
    log::info!(
        "session ended ({:?}): {} frames, {} commands sent",
        summary.ended,
        summary.frames,
        summary.commands_sent
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.frames.exists() {
        return Err(format!("Frames directory not found: {}", cli.frames.display()).into());
    }
    if !cli.detections.exists() {
        return Err(format!("Detections file not found: {}", cli.detections.display()).into());
    }
    if cli.left_threshold < 0 || cli.right_threshold < 0 || cli.center_threshold < 0 {
        return Err("Thresholds must be non-negative".into());
    }
    if cli.similarity_threshold <= 0.0 {
        return Err(format!(
            "Similarity threshold must be positive, got {}",
            cli.similarity_threshold
        )
        .into());
    }
    if cli.smoothing_window == 0 {
        return Err("Smoothing window must be at least 1".into());
    }
    if cli.max_frames == Some(0) {
        return Err("Max frames must be at least 1".into());
    }
    Ok(())
}
