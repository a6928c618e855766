use super::descriptor::FaceDescriptor;
use super::descriptor_metric::DescriptorMetric;
use super::target_store::TargetStore;
use crate::shared::region::Region;

/// A face region plus its cropped descriptor, built fresh each frame.
#[derive(Clone, Debug)]
pub struct FaceCandidate {
    pub region: Region,
    pub descriptor: FaceDescriptor,
}

/// Re-identifies the session target among per-frame candidates.
///
/// Owns the single reference descriptor for the session. The first face
/// ever seen becomes the permanent reference (bootstrap); afterwards the
/// reference never changes, and each frame at most one candidate is
/// selected as the target by minimum distance under the similarity
/// threshold.
pub struct FaceMatcher {
    reference: Option<FaceDescriptor>,
    store: Box<dyn TargetStore>,
    metric: Box<dyn DescriptorMetric>,
    similarity_threshold: f64,
}

impl FaceMatcher {
    /// Creates a matcher, loading any persisted reference from the store.
    ///
    /// A load failure is not fatal: the session simply starts
    /// un-bootstrapped, as if no prior state existed.
    pub fn new(
        store: Box<dyn TargetStore>,
        metric: Box<dyn DescriptorMetric>,
        similarity_threshold: f64,
    ) -> Self {
        let reference = match store.load() {
            Ok(reference) => reference,
            Err(e) => {
                log::warn!("failed to load reference descriptor: {e}");
                None
            }
        };
        if reference.is_some() {
            log::info!("loaded persisted reference descriptor");
        }
        Self {
            reference,
            store,
            metric,
            similarity_threshold,
        }
    }

    /// Whether a reference descriptor is currently held.
    pub fn is_bootstrapped(&self) -> bool {
        self.reference.is_some()
    }

    pub fn reference(&self) -> Option<&FaceDescriptor> {
        self.reference.as_ref()
    }

    /// Selects at most one target among `candidates`.
    ///
    /// Without a reference, the first candidate is adopted as the permanent
    /// reference and selected, regardless of the others. With a reference,
    /// returns the index of the candidate with the smallest distance that is
    /// strictly below the similarity threshold; ties go to the earliest
    /// candidate in scan order. `None` when no candidate qualifies.
    pub fn select_target(&mut self, candidates: &[FaceCandidate]) -> Option<usize> {
        let Some(reference) = &self.reference else {
            let first = candidates.first()?;
            if let Err(e) = self.store.save(&first.descriptor) {
                // Non-fatal: keep the in-memory reference for this session.
                log::warn!("failed to persist reference descriptor: {e}");
            } else {
                log::info!("reference descriptor saved");
            }
            self.reference = Some(first.descriptor.clone());
            return Some(0);
        };

        let mut best_distance = f64::INFINITY;
        let mut best_index = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let distance = self.metric.distance(reference, &candidate.descriptor);
            if distance < best_distance && distance < self.similarity_threshold {
                best_distance = distance;
                best_index = Some(i);
            }
        }
        best_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct StubStore {
        loaded: Result<Option<FaceDescriptor>, String>,
        saved: Arc<Mutex<Vec<FaceDescriptor>>>,
        fail_save: bool,
    }

    impl StubStore {
        fn empty() -> Self {
            Self {
                loaded: Ok(None),
                saved: Arc::new(Mutex::new(Vec::new())),
                fail_save: false,
            }
        }

        fn with_reference(descriptor: FaceDescriptor) -> Self {
            Self {
                loaded: Ok(Some(descriptor)),
                ..Self::empty()
            }
        }

        fn failing_load() -> Self {
            Self {
                loaded: Err("disk error".into()),
                ..Self::empty()
            }
        }
    }

    impl TargetStore for StubStore {
        fn load(&self) -> Result<Option<FaceDescriptor>, Box<dyn std::error::Error>> {
            match &self.loaded {
                Ok(r) => Ok(r.clone()),
                Err(e) => Err(e.clone().into()),
            }
        }

        fn save(&self, descriptor: &FaceDescriptor) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_save {
                return Err("disk full".into());
            }
            self.saved.lock().unwrap().push(descriptor.clone());
            Ok(())
        }
    }

    /// Distance = absolute difference of the first pixel values.
    struct FirstPixelMetric;

    impl DescriptorMetric for FirstPixelMetric {
        fn distance(&self, reference: &FaceDescriptor, candidate: &FaceDescriptor) -> f64 {
            (reference.pixels()[0] as f64 - candidate.pixels()[0] as f64).abs()
        }
    }

    fn descriptor(value: u8) -> FaceDescriptor {
        FaceDescriptor::new(vec![value; 4], 2, 2)
    }

    fn candidate(value: u8) -> FaceCandidate {
        FaceCandidate {
            region: Region::new(0, 0, 2, 2),
            descriptor: descriptor(value),
        }
    }

    fn matcher(store: StubStore, threshold: f64) -> FaceMatcher {
        FaceMatcher::new(Box::new(store), Box::new(FirstPixelMetric), threshold)
    }

    #[test]
    fn test_starts_unbootstrapped_without_persisted_state() {
        let m = matcher(StubStore::empty(), 100.0);
        assert!(!m.is_bootstrapped());
    }

    #[test]
    fn test_loads_persisted_reference() {
        let m = matcher(StubStore::with_reference(descriptor(42)), 100.0);
        assert!(m.is_bootstrapped());
        assert_eq!(m.reference().unwrap().pixels()[0], 42);
    }

    #[test]
    fn test_load_failure_treated_as_unbootstrapped() {
        let m = matcher(StubStore::failing_load(), 100.0);
        assert!(!m.is_bootstrapped());
    }

    #[test]
    fn test_bootstrap_adopts_first_candidate() {
        let store = StubStore::empty();
        let saved = store.saved.clone();
        let mut m = matcher(store, 100.0);

        // First candidate wins regardless of what else is in the frame
        let selected = m.select_target(&[candidate(200), candidate(10)]);
        assert_eq!(selected, Some(0));
        assert!(m.is_bootstrapped());
        assert_eq!(m.reference().unwrap().pixels()[0], 200);
        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].pixels()[0], 200);
    }

    #[test]
    fn test_bootstrap_with_no_candidates_stays_unbootstrapped() {
        let mut m = matcher(StubStore::empty(), 100.0);
        assert_eq!(m.select_target(&[]), None);
        assert!(!m.is_bootstrapped());
    }

    #[test]
    fn test_save_failure_keeps_in_memory_reference() {
        let store = StubStore {
            fail_save: true,
            ..StubStore::empty()
        };
        let mut m = matcher(store, 100.0);
        assert_eq!(m.select_target(&[candidate(50)]), Some(0));
        assert!(m.is_bootstrapped());
        // The adopted reference keeps working on later frames
        assert_eq!(m.select_target(&[candidate(50)]), Some(0));
    }

    #[test]
    fn test_selects_minimum_distance_candidate() {
        let mut m = matcher(StubStore::with_reference(descriptor(100)), 100.0);
        // Distances to the reference: 90, 10, 40
        let selected = m.select_target(&[candidate(10), candidate(90), candidate(140)]);
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn test_no_candidate_below_threshold_selects_none() {
        let mut m = matcher(StubStore::with_reference(descriptor(100)), 5.0);
        assert_eq!(m.select_target(&[candidate(10), candidate(200)]), None);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Distance exactly equal to the threshold does not qualify
        let mut m = matcher(StubStore::with_reference(descriptor(100)), 10.0);
        assert_eq!(m.select_target(&[candidate(90)]), None);
        assert_eq!(m.select_target(&[candidate(91)]), Some(0));
    }

    #[test]
    fn test_tie_goes_to_first_in_scan_order() {
        let mut m = matcher(StubStore::with_reference(descriptor(100)), 50.0);
        // Both candidates at distance 20; the earlier one wins
        assert_eq!(m.select_target(&[candidate(80), candidate(120)]), Some(0));
    }

    #[test]
    fn test_identical_candidate_always_selected_with_positive_threshold() {
        let mut m = matcher(StubStore::with_reference(descriptor(100)), 0.1);
        assert_eq!(m.select_target(&[candidate(37), candidate(100)]), Some(1));
    }

    #[test]
    fn test_reference_never_mutates_after_bootstrap() {
        let mut m = matcher(StubStore::empty(), 100.0);
        m.select_target(&[candidate(60)]);
        m.select_target(&[candidate(70)]);
        m.select_target(&[candidate(80)]);
        assert_eq!(m.reference().unwrap().pixels()[0], 60);
    }

    #[test]
    fn test_empty_candidates_after_bootstrap() {
        let mut m = matcher(StubStore::with_reference(descriptor(100)), 50.0);
        assert_eq!(m.select_target(&[]), None);
        assert!(m.is_bootstrapped());
    }
}
