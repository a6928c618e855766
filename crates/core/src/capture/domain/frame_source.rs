use crate::shared::frame::Frame;

/// Pull-based frame acquisition seam.
///
/// The pipeline fully processes one frame before asking for the next.
/// `Ok(None)` means the source is cleanly exhausted; `Err` means the
/// source failed to yield a frame, which is fatal to the session.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the capture resource. Idempotent.
    fn close(&mut self);
}
