pub mod image_target_store;
pub mod l2_metric;
pub mod scripted_detector;
