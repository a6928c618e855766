pub mod session_logger;
pub mod track_target_use_case;
