use thiserror::Error;

use super::command::SteerCommand;

#[derive(Error, Debug)]
pub enum MotorLinkError {
    /// The command channel rejected a write: the receiving process exited
    /// or closed its end. Expected at end of session, never a panic.
    #[error("motor command channel is broken: {0}")]
    ChannelBroken(#[source] std::io::Error),
}

/// Owns the one-directional command channel to the motor-control process.
///
/// `send` writes the command's canonical token plus a newline and flushes
/// immediately, so the receiver observes it without buffering delay. A
/// failed write is classified as [`MotorLinkError::ChannelBroken`] and left
/// to the caller to recover from; `send` never panics on a dead channel.
pub trait MotorLink: Send {
    fn send(&mut self, command: SteerCommand) -> Result<(), MotorLinkError>;

    /// Whether the receiving process is still running.
    fn is_alive(&mut self) -> bool;

    /// Requests termination of the receiving process if still alive, then
    /// releases the channel. Idempotent.
    fn shutdown(&mut self);
}

/// Discards every command.
///
/// Used for dry runs without motor hardware and by tests where actuation
/// is irrelevant.
pub struct NullMotorLink;

impl MotorLink for NullMotorLink {
    fn send(&mut self, command: SteerCommand) -> Result<(), MotorLinkError> {
        log::debug!("motor (dry run): {}", command.token());
        Ok(())
    }

    fn is_alive(&mut self) -> bool {
        false
    }

    fn shutdown(&mut self) {}
}
