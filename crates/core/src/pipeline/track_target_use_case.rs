use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::region::Region;
use crate::steering::domain::command::SteerCommand;
use crate::steering::domain::controller::SteerController;
use crate::steering::domain::motor_link::{MotorLink, MotorLinkError};
use crate::tracking::domain::descriptor::FaceDescriptor;
use crate::tracking::domain::face_detector::FaceDetector;
use crate::tracking::domain::face_matcher::{FaceCandidate, FaceMatcher};
use crate::tracking::domain::position_smoother::PositionSmoother;

use super::session_logger::SessionLogger;

/// What one frame produced, for observers and overlay renderers.
///
/// `target` indexes into `candidates`; every other entry is a non-target
/// face this frame. `command` is set only when a token was actually
/// written to the motor channel.
#[derive(Clone, Debug)]
pub struct FrameOutcome {
    pub frame_index: usize,
    pub candidates: Vec<Region>,
    pub target: Option<usize>,
    pub smoothed_x: Option<i32>,
    pub command: Option<SteerCommand>,
}

/// Why the session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The frame source ran out of frames.
    SourceExhausted,
    /// The quit signal fired (cancel flag or callback).
    QuitRequested,
    /// The motor channel rejected a write; expected end-of-session
    /// condition, reported here instead of raised as an error.
    ChannelBroken,
}

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub frames: usize,
    pub commands_sent: usize,
    pub ended: EndReason,
}

/// Per-frame callback; returning `false` requests a clean quit.
pub type FrameCallback = Box<dyn FnMut(&FrameOutcome) -> bool + Send>;

/// Orchestrates one tracking session.
///
/// Gathers all mutable session state — the matcher's reference, the
/// position history, the motor channel — into one value and runs the
/// frame-driven loop: detect, match, smooth, decide, send. Single
/// threaded; one frame is fully processed before the next is acquired.
///
/// Teardown is unconditional and idempotent: whichever way the loop ends
/// (exhaustion, quit, broken channel, capture failure), the source is
/// closed and the motor process is asked to terminate.
pub struct TrackTargetUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    matcher: FaceMatcher,
    smoother: PositionSmoother,
    controller: SteerController,
    motor: Box<dyn MotorLink>,
    logger: Box<dyn SessionLogger>,
    on_frame: Option<FrameCallback>,
    cancelled: Arc<AtomicBool>,
}

impl TrackTargetUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        matcher: FaceMatcher,
        smoother: PositionSmoother,
        controller: SteerController,
        motor: Box<dyn MotorLink>,
        logger: Box<dyn SessionLogger>,
        on_frame: Option<FrameCallback>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source,
            detector,
            matcher,
            smoother,
            controller,
            motor,
            logger,
            on_frame,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    /// Runs the session to completion.
    ///
    /// Only a capture failure or a detector failure surfaces as `Err`; a
    /// broken motor channel ends the session normally with
    /// [`EndReason::ChannelBroken`]. Teardown runs on every exit path.
    pub fn run(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let result = self.run_loop();
        self.teardown();
        result
    }

    fn run_loop(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let mut frames = 0;
        let mut commands_sent = 0;

        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                return Ok(self.summary(frames, commands_sent, EndReason::QuitRequested));
            }

            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    return Ok(self.summary(frames, commands_sent, EndReason::SourceExhausted))
                }
                Err(e) => return Err(format!("frame capture failed: {e}").into()),
            };
            frames += 1;

            let regions = self.detector.detect(&frame)?;
            let candidates: Vec<FaceCandidate> = regions
                .iter()
                .filter_map(|&region| {
                    FaceDescriptor::crop(&frame, &region)
                        .map(|descriptor| FaceCandidate { region, descriptor })
                })
                .collect();

            let target = self.matcher.select_target(&candidates);

            let mut smoothed_x = None;
            let mut command = None;
            if let Some(idx) = target {
                self.smoother.push(candidates[idx].region.center_x());
                if let Some(estimate) = self.smoother.estimate() {
                    smoothed_x = Some(estimate);
                    if let Some(decided) = self.controller.decide(estimate, frame.center_x()) {
                        match self.motor.send(decided) {
                            Ok(()) => {
                                commands_sent += 1;
                                command = Some(decided);
                            }
                            Err(e @ MotorLinkError::ChannelBroken(_)) => {
                                log::warn!("ending session: {e}");
                                return Ok(self.summary(
                                    frames,
                                    commands_sent,
                                    EndReason::ChannelBroken,
                                ));
                            }
                        }
                    }
                }
            }

            let outcome = FrameOutcome {
                frame_index: frame.index(),
                candidates: candidates.iter().map(|c| c.region).collect(),
                target,
                smoothed_x,
                command,
            };
            self.logger.frame(&outcome);

            if let Some(on_frame) = &mut self.on_frame {
                if !on_frame(&outcome) {
                    return Ok(self.summary(frames, commands_sent, EndReason::QuitRequested));
                }
            }
        }
    }

    fn summary(&self, frames: usize, commands_sent: usize, ended: EndReason) -> SessionSummary {
        SessionSummary {
            frames,
            commands_sent,
            ended,
        }
    }

    fn teardown(&mut self) {
        self.source.close();
        self.motor.shutdown();
        self.logger.summary();
    }
}
