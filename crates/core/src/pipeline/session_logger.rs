use std::collections::HashMap;
use std::time::Instant;

use super::track_target_use_case::FrameOutcome;

/// Cross-cutting observer for session events.
///
/// Decouples the tracking loop from specific output mechanisms so
/// embedders can observe a session without changing the orchestration
/// code.
pub trait SessionLogger: Send {
    /// Report the outcome of one processed frame.
    fn frame(&mut self, outcome: &FrameOutcome);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used by tests and by embedders
/// with their own reporting.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn frame(&mut self, _outcome: &FrameOutcome) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger: throttled per-frame progress, per-command counts,
/// and a summary block at session end.
pub struct StdoutSessionLogger {
    throttle_frames: usize,
    frames: usize,
    frames_with_target: usize,
    command_counts: HashMap<&'static str, usize>,
    start_time: Instant,
}

impl StdoutSessionLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            frames: 0,
            frames_with_target: 0,
            command_counts: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary string, or `None` if no frames were
    /// processed.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = Vec::new();
        lines.push(format!(
            "Session summary ({} frames, {:.1}s total):",
            self.frames, elapsed
        ));
        lines.push(format!(
            "  target visible: {}/{} frames",
            self.frames_with_target, self.frames
        ));

        let mut tokens: Vec<_> = self.command_counts.keys().collect();
        tokens.sort();
        for token in tokens {
            lines.push(format!("  {token:5}: {} commands", self.command_counts[token]));
        }

        if elapsed > 0.0 {
            let fps = self.frames as f64 / elapsed;
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn frames_seen(&self) -> usize {
        self.frames
    }

    pub fn count_for(&self, token: &str) -> usize {
        self.command_counts.get(token).copied().unwrap_or(0)
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn frame(&mut self, outcome: &FrameOutcome) {
        self.frames += 1;
        if outcome.target.is_some() {
            self.frames_with_target += 1;
        }
        if let Some(command) = outcome.command {
            *self.command_counts.entry(command.token()).or_default() += 1;
        }

        if self.frames % self.throttle_frames == 0 {
            match (outcome.target, outcome.smoothed_x) {
                (Some(_), Some(x)) => {
                    log::info!("frame {}: target at x={x}", outcome.frame_index)
                }
                _ => log::info!("frame {}: no target", outcome.frame_index),
            }
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
