pub mod descriptor;
pub mod descriptor_metric;
pub mod face_detector;
pub mod face_matcher;
pub mod position_smoother;
pub mod target_store;
