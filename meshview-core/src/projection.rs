/// Finite-distance camera projection
///
/// The render pipeline draws orthographically (`x' = x`, `y' = y`); this
/// projection is available to callers that want foreshortening.
use nalgebra::Point3;

use crate::error::GeometryError;

/// Projection mode for turning scene positions into drawing coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProjectionMode {
    #[default]
    Orthographic,
    Perspective { focal_length: f64, z_offset: f64 },
}

impl ProjectionMode {
    pub fn project(&self, point: &Point3<f64>) -> Result<Point3<f64>, GeometryError> {
        match *self {
            Self::Orthographic => Ok(*point),
            Self::Perspective {
                focal_length,
                z_offset,
            } => perspective_project(point, focal_length, z_offset),
        }
    }
}

/// Shift `z` by `z_offset` and divide `x` and `y` by the shifted depth.
///
/// Returns `(f * x / z', f * y / z', z')`.
pub fn perspective_project(
    point: &Point3<f64>,
    focal_length: f64,
    z_offset: f64,
) -> Result<Point3<f64>, GeometryError> {
    let z = point.z + z_offset;
    if z == 0.0 {
        return Err(GeometryError::ZeroDepth);
    }

    Ok(Point3::new(
        focal_length * (point.x / z),
        focal_length * (point.y / z),
        z,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_divides_by_shifted_depth() {
        let p = perspective_project(&Point3::new(2.0, -4.0, 1.0), 10.0, 1.0).unwrap();
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!((p.y + 20.0).abs() < 1e-12);
        assert!((p.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_perspective_zero_depth_is_an_error() {
        assert_eq!(
            perspective_project(&Point3::new(1.0, 1.0, -3.0), 5.0, 3.0),
            Err(GeometryError::ZeroDepth)
        );
    }

    #[test]
    fn test_orthographic_is_identity() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(ProjectionMode::default().project(&p), Ok(p));
    }
}
