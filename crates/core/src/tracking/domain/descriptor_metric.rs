use super::descriptor::FaceDescriptor;

/// Domain interface for descriptor similarity.
///
/// `distance` compares a candidate against the session reference; lower is
/// more similar, and an identical same-size copy must score exactly 0.
/// Implementations normalize the candidate to the reference's dimensions
/// before comparing.
pub trait DescriptorMetric: Send {
    fn distance(&self, reference: &FaceDescriptor, candidate: &FaceDescriptor) -> f64;
}
