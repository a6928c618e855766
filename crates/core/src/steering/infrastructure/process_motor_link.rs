use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::steering::domain::command::SteerCommand;
use crate::steering::domain::motor_link::{MotorLink, MotorLinkError};

/// Drives an external motor-control program over its stdin.
///
/// The program is spawned once at startup and fed newline-terminated
/// tokens; its stdout/stderr are discarded so a chatty receiver cannot
/// block the pipeline. The child is torn down with the session.
pub struct ProcessMotorLink {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl ProcessMotorLink {
    pub fn spawn(program: &Path) -> io::Result<Self> {
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let stdin = child.stdin.take();
        log::info!("motor process started: {}", program.display());
        Ok(Self { child, stdin })
    }
}

/// Writes one newline-terminated command token and flushes, so the
/// receiver observes it without buffering delay.
fn write_command(writer: &mut impl Write, command: SteerCommand) -> io::Result<()> {
    writer.write_all(command.token().as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

impl MotorLink for ProcessMotorLink {
    fn send(&mut self, command: SteerCommand) -> Result<(), MotorLinkError> {
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            MotorLinkError::ChannelBroken(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "channel released",
            ))
        })?;
        write_command(stdin, command).map_err(MotorLinkError::ChannelBroken)
    }

    fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    fn shutdown(&mut self) {
        // Closing stdin first lets a well-behaved receiver exit on EOF.
        self.stdin = None;
        if self.is_alive() {
            if let Err(e) = self.child.kill() {
                log::warn!("failed to terminate motor process: {e}");
            }
        }
        let _ = self.child.wait();
    }
}

impl Drop for ProcessMotorLink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // `cat` consumes stdin until EOF, which is all the receiver side of
    // the protocol needs for these tests.
    fn spawn_cat() -> ProcessMotorLink {
        ProcessMotorLink::spawn(Path::new("cat")).unwrap()
    }

    #[rstest]
    #[case(SteerCommand::SteerLeft, b"ccw\n")]
    #[case(SteerCommand::SteerRight, b"cw\n")]
    #[case(SteerCommand::Stop, b"stop\n")]
    fn test_wire_format_is_one_token_line(#[case] command: SteerCommand, #[case] expected: &[u8]) {
        let mut buffer = Vec::new();
        write_command(&mut buffer, command).unwrap();
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_consecutive_commands_are_separate_lines() {
        let mut buffer = Vec::new();
        write_command(&mut buffer, SteerCommand::SteerLeft).unwrap();
        write_command(&mut buffer, SteerCommand::Stop).unwrap();
        assert_eq!(buffer, b"ccw\nstop\n");
    }

    #[test]
    fn test_spawned_process_is_alive() {
        let mut link = spawn_cat();
        assert!(link.is_alive());
        link.shutdown();
    }

    #[test]
    fn test_send_succeeds_while_alive() {
        let mut link = spawn_cat();
        assert!(link.send(SteerCommand::SteerLeft).is_ok());
        assert!(link.send(SteerCommand::Stop).is_ok());
        link.shutdown();
    }

    #[test]
    fn test_send_after_shutdown_reports_channel_broken() {
        let mut link = spawn_cat();
        link.shutdown();
        let err = link.send(SteerCommand::SteerRight).unwrap_err();
        assert!(matches!(err, MotorLinkError::ChannelBroken(_)));
    }

    #[test]
    fn test_shutdown_terminates_process() {
        let mut link = spawn_cat();
        link.shutdown();
        assert!(!link.is_alive());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut link = spawn_cat();
        link.shutdown();
        link.shutdown();
        assert!(!link.is_alive());
    }

    #[test]
    fn test_send_to_exited_process_reports_channel_broken() {
        // `true` exits immediately without reading stdin.
        let mut link = ProcessMotorLink::spawn(Path::new("true")).unwrap();
        let _ = link.child.wait();
        // The pipe buffer may absorb a first write; keep writing until the
        // broken pipe surfaces.
        let mut saw_broken = false;
        for _ in 0..4096 {
            if link.send(SteerCommand::Stop).is_err() {
                saw_broken = true;
                break;
            }
        }
        assert!(saw_broken);
    }

    #[test]
    fn test_spawn_missing_program_errors() {
        assert!(ProcessMotorLink::spawn(Path::new("/nonexistent/motor")).is_err());
    }
}
