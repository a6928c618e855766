use super::command::SteerCommand;
use crate::shared::constants::{
    DEFAULT_CENTER_THRESHOLD, DEFAULT_LEFT_THRESHOLD, DEFAULT_RIGHT_THRESHOLD,
};

/// Pixel offsets from frame center defining the steering zones.
///
/// `left`/`right` mark the dead-to-active boundaries; `center` is the
/// half-width of the centered band. Fixed at startup.
#[derive(Clone, Copy, Debug)]
pub struct SteerThresholds {
    pub left: i32,
    pub right: i32,
    pub center: i32,
}

impl Default for SteerThresholds {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT_THRESHOLD,
            right: DEFAULT_RIGHT_THRESHOLD,
            center: DEFAULT_CENTER_THRESHOLD,
        }
    }
}

/// Maps a smoothed target position to a steering command.
///
/// Stateless and deterministic: the decision depends only on the inputs
/// and the fixed thresholds. Zones are evaluated in a fixed priority:
/// left, then right, then the centered band.
pub struct SteerController {
    thresholds: SteerThresholds,
}

impl SteerController {
    pub fn new(thresholds: SteerThresholds) -> Self {
        Self { thresholds }
    }

    /// Decides the command for one frame, or `None` in the dead band.
    ///
    /// When `center < left/right` there is a gap between the centered band
    /// and the steer thresholds where no command is emitted and the motor
    /// keeps whatever it was last told. That gap is intentional observed
    /// behavior, not a fallthrough bug.
    pub fn decide(&self, smoothed_x: i32, frame_center_x: i32) -> Option<SteerCommand> {
        let t = self.thresholds;
        if smoothed_x < frame_center_x - t.left {
            Some(SteerCommand::SteerLeft)
        } else if smoothed_x > frame_center_x + t.right {
            Some(SteerCommand::SteerRight)
        } else if frame_center_x - t.center < smoothed_x && smoothed_x < frame_center_x + t.center
        {
            Some(SteerCommand::Stop)
        } else {
            None
        }
    }
}

impl Default for SteerController {
    fn default() -> Self {
        Self::new(SteerThresholds::default())
    }
}
