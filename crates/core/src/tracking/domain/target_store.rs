use super::descriptor::FaceDescriptor;

/// Persistence seam for the single reference descriptor.
///
/// `save` is called at most once per session, at the moment of bootstrap,
/// and overwrites any prior state. There is no update or delete operation:
/// the reference is immutable once adopted.
pub trait TargetStore: Send {
    /// Reads the persisted reference if present; `Ok(None)` when no prior
    /// state exists.
    fn load(&self) -> Result<Option<FaceDescriptor>, Box<dyn std::error::Error>>;

    /// Persists the descriptor, replacing any previously stored one.
    fn save(&self, descriptor: &FaceDescriptor) -> Result<(), Box<dyn std::error::Error>>;
}
