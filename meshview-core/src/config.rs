/// Viewport and presentation settings shared by the scene and the controller
use palette::Srgb;

/// Square viewport of side `size` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    size: f64,
    half: f64,
    point_radius: f64,
}

impl ViewportConfig {
    pub const DEFAULT_SIZE: f64 = 800.0;

    pub fn new(size: f64) -> Self {
        Self {
            size,
            half: size / 2.0,
            point_radius: size / 200.0,
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Centering offset for drawing, and pixel-to-radian divisor for drags.
    pub fn half(&self) -> f64 {
        self.half
    }

    pub fn point_radius(&self) -> f64 {
        self.point_radius
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

/// Colors and stroke used when emitting draw calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub line_color: Srgb<u8>,
    pub outline_color: Srgb<u8>,
    pub marker_color: Srgb<u8>,
    pub stroke_width: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        let blue = Srgb::new(0, 0, 255);
        Self {
            line_color: blue,
            outline_color: blue,
            marker_color: blue,
            stroke_width: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_sizes() {
        let viewport = ViewportConfig::default();
        assert_eq!(viewport.size(), 800.0);
        assert_eq!(viewport.half(), 400.0);
        assert_eq!(viewport.point_radius(), 4.0);
    }
}
