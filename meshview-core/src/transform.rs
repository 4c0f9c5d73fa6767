/// Incremental rotations applied directly to vertex positions
use nalgebra::Point3;

/// One incremental rotation step, in radians.
///
/// `theta` turns about the x-axis, then `phi` turns about the y-axis using
/// the already-updated z. The two steps do not commute, so the order is part
/// of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub phi: f64,
    pub theta: f64,
}

impl Rotation {
    pub fn new(phi: f64, theta: f64) -> Self {
        Self { phi, theta }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.phi == 0.0 && self.theta == 0.0
    }

    /// Same angles with opposite sign. Applying a rotation and then its
    /// inverse only returns to the start when one of the angles is zero.
    pub fn inverse(&self) -> Self {
        Self::new(-self.phi, -self.theta)
    }

    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        rotate(point, self.phi, self.theta)
    }
}

/// Rotate about the x-axis by `theta`, then about the y-axis by `phi`.
pub fn rotate(point: &Point3<f64>, phi: f64, theta: f64) -> Point3<f64> {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();

    let (x, y, z) = (point.x, point.y, point.z);

    // about x
    let (y, z) = (y * cos_t + z * sin_t, -y * sin_t + z * cos_t);
    // about y
    let (x, z) = (x * cos_p + z * sin_p, -x * sin_p + z * cos_p);

    Point3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Point3<f64>, b: &Point3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_identity_rotation() {
        let p = Point3::new(1.5, -2.0, 3.25);
        let once = rotate(&p, 0.0, 0.0);
        assert_eq!(once, p);
        assert_eq!(rotate(&once, 0.0, 0.0), p);
        assert!(Rotation::identity().is_identity());
    }

    #[test]
    fn test_rotate_about_x() {
        let p = Point3::new(0.0, 1.0, 0.0);
        let r = rotate(&p, 0.0, std::f64::consts::FRAC_PI_2);
        assert!(close(&r, &Point3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_rotate_about_y() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let r = rotate(&p, std::f64::consts::FRAC_PI_2, 0.0);
        assert!(close(&r, &Point3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_x_rotation_applied_before_y() {
        let p = Point3::new(0.0, 1.0, 0.0);
        let half_pi = std::f64::consts::FRAC_PI_2;
        // x-axis first: (0,1,0) -> (0,0,-1), then y-axis: (0,0,-1) -> (-1,0,0)
        let r = rotate(&p, half_pi, half_pi);
        assert!(close(&r, &Point3::new(-1.0, 0.0, 0.0)));

        // The reverse order would leave the point at (0,0,-1)
        let y_first = rotate(&rotate(&p, half_pi, 0.0), 0.0, half_pi);
        assert!(close(&y_first, &Point3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_inverse_single_axis_round_trip() {
        let p = Point3::new(3.0, -1.0, 2.0);
        for rotation in [Rotation::new(0.3, 0.0), Rotation::new(0.0, -0.7)] {
            let back = rotation.inverse().apply(&rotation.apply(&p));
            assert!(close(&back, &p));
        }
    }

    #[test]
    fn test_inverse_both_axes_does_not_commute() {
        let p = Point3::new(3.0, -1.0, 2.0);
        let rotation = Rotation::new(0.4, 0.6);
        let back = rotation.inverse().apply(&rotation.apply(&p));
        assert!(!close(&back, &p));
        assert!((back.coords.norm() - p.coords.norm()).abs() < 1e-9);
    }
}
