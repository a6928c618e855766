/// Pixel offset from frame center past which the target counts as left.
pub const DEFAULT_LEFT_THRESHOLD: i32 = 100;

/// Pixel offset from frame center past which the target counts as right.
pub const DEFAULT_RIGHT_THRESHOLD: i32 = 100;

/// Half-width of the centered dead zone, in pixels.
pub const DEFAULT_CENTER_THRESHOLD: i32 = 50;

/// Maximum acceptable match distance between the reference descriptor and a
/// candidate; larger distances mean the candidate is not the target.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 5000.0;

/// Default file name for the persisted reference face crop.
pub const DEFAULT_TARGET_FACE_FILE: &str = "target_face.png";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
