/// Drawing surface abstraction consumed by the render pipeline
use nalgebra::Point2;
use palette::Srgb;

/// Anything that can take 2D draw calls in viewport pixel coordinates
/// (origin top-left).
pub trait DrawSurface {
    fn clear(&mut self);

    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Srgb<u8>);

    fn draw_filled_polygon(
        &mut self,
        points: &[Point2<f64>],
        outline: Srgb<u8>,
        fill: Srgb<u8>,
        stroke_width: f64,
    );

    fn draw_point_marker(&mut self, center: Point2<f64>, radius: f64, color: Srgb<u8>);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line {
        from: Point2<f64>,
        to: Point2<f64>,
        color: Srgb<u8>,
    },
    Polygon {
        points: Vec<Point2<f64>>,
        outline: Srgb<u8>,
        fill: Srgb<u8>,
        stroke_width: f64,
    },
    Marker {
        center: Point2<f64>,
        radius: f64,
        color: Srgb<u8>,
    },
}

/// Surface that keeps every draw call in order, for headless inspection.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn polygons(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
    }

    pub fn markers(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Marker { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Srgb<u8>) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_filled_polygon(
        &mut self,
        points: &[Point2<f64>],
        outline: Srgb<u8>,
        fill: Srgb<u8>,
        stroke_width: f64,
    ) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            outline,
            fill,
            stroke_width,
        });
    }

    fn draw_point_marker(&mut self, center: Point2<f64>, radius: f64, color: Srgb<u8>) {
        self.commands.push(DrawCommand::Marker {
            center,
            radius,
            color,
        });
    }
}
