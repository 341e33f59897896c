use crate::schema::ShimConfig;

use super::helpers::validate_range;

pub(crate) const MIN_DIMENSION: u32 = 100;
pub(crate) const MAX_DIMENSION: u32 = 16384;

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &ShimConfig) {
    let window = &config.window;
    validate_range(errors, "window.width", window.width, MIN_DIMENSION, MAX_DIMENSION);
    validate_range(errors, "window.height", window.height, MIN_DIMENSION, MAX_DIMENSION);
    validate_range(errors, "window.min_width", window.min_width, 0, MAX_DIMENSION);
    validate_range(errors, "window.min_height", window.min_height, 0, MAX_DIMENSION);

    if window.title.contains('\0') {
        errors.push("window.title must not contain NUL".into());
    }
}
