/// Flat shading: view angle to face color
use std::f64::consts::{FRAC_PI_2, PI};

use palette::Srgb;

/// Intensity of a face seen head-on.
pub const MAX_INTENSITY: u8 = 255;

/// Intensity of a face seen edge-on.
pub const MIN_INTENSITY: u8 = 95;

/// Fold angles past a right angle back into `[0, pi/2]`. Winding order is not
/// guaranteed, so a face and its back side shade the same.
pub fn fold_view_angle(angle: f64) -> f64 {
    if angle > FRAC_PI_2 {
        PI - angle
    } else {
        angle
    }
}

/// Linear falloff from [`MAX_INTENSITY`] at 0 to [`MIN_INTENSITY`] at `pi/2`.
pub fn angle_to_intensity(angle: f64) -> u8 {
    let angle = fold_view_angle(angle);
    // 160 levels over pi/2, so a right angle lands exactly on 95
    let span = f64::from(MAX_INTENSITY - MIN_INTENSITY);
    let value = (f64::from(MAX_INTENSITY) - angle * span / FRAC_PI_2).round();
    value.clamp(0.0, f64::from(MAX_INTENSITY)) as u8
}

/// Blue-monochrome fill color for a face at the given view angle.
pub fn face_color(angle: f64) -> Srgb<u8> {
    Srgb::new(0, 0, angle_to_intensity(angle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_endpoints() {
        assert_eq!(angle_to_intensity(0.0), 255);
        assert_eq!(angle_to_intensity(FRAC_PI_2), 95);
        assert_eq!(angle_to_intensity(PI), 255);
    }

    #[test]
    fn test_intensity_is_linear() {
        assert_eq!(angle_to_intensity(FRAC_PI_2 / 2.0), 175);
    }

    #[test]
    fn test_folding_law() {
        for step in 1..50 {
            let angle = FRAC_PI_2 + step as f64 * (FRAC_PI_2 / 50.0);
            assert_eq!(angle_to_intensity(angle), angle_to_intensity(PI - angle));
        }
    }

    #[test]
    fn test_intensity_bounds() {
        for step in 0..=100 {
            let angle = step as f64 * PI / 100.0;
            let value = angle_to_intensity(angle);
            assert!((MIN_INTENSITY..=MAX_INTENSITY).contains(&value));
        }
    }

    #[test]
    fn test_face_color_is_blue() {
        let color = face_color(0.0);
        assert_eq!((color.red, color.green, color.blue), (0, 0, 255));
    }
}
