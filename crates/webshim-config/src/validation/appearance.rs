use webshim_common::Color;

use crate::schema::ShimConfig;

use super::helpers::validate_range_f64;

pub(crate) fn validate_appearance(errors: &mut Vec<String>, config: &ShimConfig) {
    let appearance = &config.appearance;
    validate_range_f64(errors, "appearance.zoom", appearance.zoom, 0.25, 5.0);

    if let Some(background) = &appearance.background {
        if Color::from_hex(background).is_none() {
            errors.push(format!(
                "appearance.background = {background:?} is not a #rrggbb or #rrggbbaa color"
            ));
        }
    }
}
