mod color;
mod core;

pub use self::core::*;
pub use color::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_display() {
        assert_eq!(Size::new(800, 600).to_string(), "800x600");
    }

    #[test]
    fn size_at_least_clamps_each_axis() {
        let size = Size::new(200, 900).at_least(Size::new(300, 300));
        assert_eq!(size, Size::new(300, 900));
    }

    #[test]
    fn position_serialization() {
        let pos = Position::new(-10, 42);
        let json = serde_json::to_string(&pos).unwrap();
        let deserialized: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, deserialized);
    }

    #[test]
    fn color_from_hex_6() {
        let c = Color::from_hex("#ff8800").unwrap();
        assert_eq!(c, Color::from_rgba(255, 136, 0, 255));
    }

    #[test]
    fn color_from_hex_8() {
        let c = Color::from_hex("#ff880080").unwrap();
        assert_eq!(c, Color::from_rgba(255, 136, 0, 128));
    }

    #[test]
    fn color_from_hex_invalid() {
        assert!(Color::from_hex("zzzzzz").is_none());
        assert!(Color::from_hex("#abc").is_none());
        assert!(Color::from_hex("").is_none());
        assert!(Color::from_hex("#ffé000").is_none());
    }

    #[test]
    fn color_to_hex() {
        assert_eq!(Color::from_rgb(255, 0, 128).to_hex(), "#ff0080");
        assert_eq!(Color::from_rgba(255, 0, 128, 128).to_hex(), "#ff008080");
    }

    #[test]
    fn color_from_tuples() {
        assert_eq!(Color::from((1, 2, 3)), Color::from_rgba(1, 2, 3, 255));
        assert_eq!(Color::from((1, 2, 3, 4)), Color::from_rgba(1, 2, 3, 4));
    }

    #[test]
    fn luminance_extremes() {
        assert!(Color::from_rgb(0, 0, 0).luminance().abs() < f64::EPSILON);
        assert!((Color::from_rgb(255, 255, 255).luminance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dark_and_light_hints() {
        assert!(Color::from_rgb(0, 0, 0).is_dark());
        assert!(!Color::from_rgb(255, 255, 255).is_dark());
        // Pure blue is perceptually dark, pure green is light.
        assert!(Color::from_rgb(0, 0, 255).is_dark());
        assert!(!Color::from_rgb(0, 255, 0).is_dark());
        // 0.299 * 255 = 76.2, well below half.
        assert!(Color::from_rgb(255, 0, 0).is_dark());
    }
}
