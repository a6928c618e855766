use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for face detection.
///
/// Zero or many boxes per frame are both valid results; the returned order
/// is the canonical scan order for downstream tie-breaking. Implementations
/// may be stateful (e.g. replaying a script), hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
