/// A discrete actuation command for the single-axis motor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SteerCommand {
    /// Rotate counterclockwise, toward a target left of center.
    SteerLeft,
    /// Rotate clockwise, toward a target right of center.
    SteerRight,
    /// Hold position; the target is centered.
    Stop,
}

impl SteerCommand {
    /// Canonical ASCII token understood by the motor-control process.
    pub fn token(&self) -> &'static str {
        match self {
            SteerCommand::SteerLeft => "ccw",
            SteerCommand::SteerRight => "cw",
            SteerCommand::Stop => "stop",
        }
    }
}
