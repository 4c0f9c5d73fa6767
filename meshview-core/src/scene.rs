/// Scene state and the render pipeline shared by wireframe and shaded modes
use nalgebra::{Point2, Point3};

use crate::config::{RenderStyle, ViewportConfig};
use crate::depth;
use crate::error::GeometryError;
use crate::geometry::{self, Mesh};
use crate::shading;
use crate::surface::DrawSurface;
use crate::transform::Rotation;

/// How faces are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Unique edges as lines.
    Wireframe,
    /// Depth-sorted, flat-shaded filled polygons.
    #[default]
    Shaded,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Wireframe => Self::Shaded,
            Self::Shaded => Self::Wireframe,
        }
    }
}

/// The loaded mesh together with everything needed to draw it.
///
/// Rotations are baked into the vertex positions: there is no stored model
/// matrix and no way back to the loaded pose. Floating-point error from many
/// small rotations accumulates and is never renormalized.
#[derive(Debug, Clone)]
pub struct Scene {
    mesh: Mesh,
    viewport: ViewportConfig,
    style: RenderStyle,
    mode: RenderMode,
}

impl Scene {
    /// Centre and scale `mesh` into the viewport and take ownership of it.
    pub fn new(
        mut mesh: Mesh,
        viewport: ViewportConfig,
        mode: RenderMode,
    ) -> Result<Self, GeometryError> {
        geometry::center_and_scale(&mut mesh, viewport.size())?;
        Ok(Self {
            mesh,
            viewport,
            style: RenderStyle::default(),
            mode,
        })
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        if mode != self.mode {
            tracing::debug!(?mode, "render mode changed");
        }
        self.mode = mode;
    }

    /// Rotate every vertex in place on top of its current position.
    pub fn apply_incremental_rotation(&mut self, rotation: Rotation) {
        for point in self.mesh.vertices_mut() {
            *point = rotation.apply(point);
        }
    }

    /// Rotate, clear the surface and draw the scene from the new positions.
    pub fn redraw<S: DrawSurface + ?Sized>(&mut self, rotation: Rotation, surface: &mut S) {
        self.apply_incremental_rotation(rotation);
        surface.clear();
        self.render(surface);
    }

    /// Draw the current pose without clearing the surface first.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        match self.mode {
            RenderMode::Wireframe => self.render_wireframe(surface),
            RenderMode::Shaded => self.render_shaded(surface),
        }
        self.render_markers(surface);
    }

    fn render_wireframe<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for (a, b) in self.mesh.unique_edges() {
            surface.draw_line(
                self.to_screen(&self.mesh.position(a)),
                self.to_screen(&self.mesh.position(b)),
                self.style.line_color,
            );
        }
    }

    fn render_shaded<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for face in depth::sort_back_to_front(&self.mesh) {
            let normal = self.mesh.face_normal(face);
            let fill = shading::face_color(geometry::view_angle(&normal));
            let points: Vec<Point2<f64>> = face
                .vertices()
                .iter()
                .map(|&id| self.to_screen(&self.mesh.position(id)))
                .collect();
            surface.draw_filled_polygon(
                &points,
                self.style.outline_color,
                fill,
                self.style.stroke_width,
            );
        }
    }

    fn render_markers<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let radius = self.viewport.point_radius();
        for point in self.mesh.vertices().values() {
            surface.draw_point_marker(self.to_screen(point), radius, self.style.marker_color);
        }
    }

    fn to_screen(&self, point: &Point3<f64>) -> Point2<f64> {
        let half = self.viewport.half();
        Point2::new(point.x + half, point.y + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;
    use crate::surface::{DrawCommand, RecordingSurface};
    use std::collections::BTreeMap;

    fn two_triangles() -> Mesh {
        let vertices: BTreeMap<_, _> = [
            (1, Point3::new(0.0, 0.0, 0.0)),
            (2, Point3::new(1.0, 0.0, 0.0)),
            (3, Point3::new(0.0, 1.0, 0.0)),
            (4, Point3::new(1.0, 1.0, 1.0)),
        ]
        .into_iter()
        .collect();
        let faces = vec![
            Face::new(vec![1, 2, 3]).unwrap(),
            Face::new(vec![2, 3, 4]).unwrap(),
        ];
        Mesh::new(vertices, faces).unwrap()
    }

    fn scene(mode: RenderMode) -> Scene {
        Scene::new(two_triangles(), ViewportConfig::default(), mode).unwrap()
    }

    #[test]
    fn test_wireframe_draws_each_edge_once() {
        let mut surface = RecordingSurface::new();
        scene(RenderMode::Wireframe).render(&mut surface);

        assert_eq!(surface.lines().count(), 5);
        assert_eq!(surface.markers().count(), 4);
        assert_eq!(surface.polygons().count(), 0);
    }

    #[test]
    fn test_shaded_draws_polygons_then_markers() {
        let mut surface = RecordingSurface::new();
        scene(RenderMode::Shaded).render(&mut surface);

        assert_eq!(surface.polygons().count(), 2);
        assert_eq!(surface.lines().count(), 0);
        assert!(matches!(surface.commands[0], DrawCommand::Polygon { .. }));
        assert!(matches!(surface.commands[1], DrawCommand::Polygon { .. }));
        assert!(surface.commands[2..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Marker { .. })));
    }

    #[test]
    fn test_shaded_faces_drawn_back_to_front() {
        let mut surface = RecordingSurface::new();
        let scene = scene(RenderMode::Shaded);
        scene.render(&mut surface);

        // Face [1,2,3] lies at the far side of the z range.
        let DrawCommand::Polygon { points, .. } = &surface.commands[0] else {
            panic!("expected a polygon first");
        };
        let expected = scene.to_screen(&scene.mesh().position(1));
        assert_eq!(points[0], expected);
    }

    #[test]
    fn test_shaded_fill_uses_view_angle() {
        let mut surface = RecordingSurface::new();
        scene(RenderMode::Shaded).render(&mut surface);

        // Face [1,2,3] is parallel to the screen, so it shades at full intensity.
        let DrawCommand::Polygon {
            fill,
            outline,
            stroke_width,
            ..
        } = &surface.commands[0]
        else {
            panic!("expected a polygon first");
        };
        assert_eq!(fill.blue, 255);
        assert_eq!(outline.blue, 255);
        assert_eq!(*stroke_width, 2.0);
    }

    #[test]
    fn test_draw_coordinates_offset_by_half_viewport() {
        let mut surface = RecordingSurface::new();
        let scene = scene(RenderMode::Wireframe);
        scene.render(&mut surface);

        for command in surface.markers() {
            let DrawCommand::Marker { center, radius, .. } = command else {
                unreachable!()
            };
            assert!((0.0..=800.0).contains(&center.x));
            assert!((0.0..=800.0).contains(&center.y));
            assert_eq!(*radius, 4.0);
        }
    }

    #[test]
    fn test_redraw_clears_first() {
        let mut surface = RecordingSurface::new();
        let mut scene = scene(RenderMode::Wireframe);
        scene.redraw(Rotation::new(0.01, 0.02), &mut surface);
        assert_eq!(surface.commands[0], DrawCommand::Clear);
        assert_eq!(
            surface
                .commands
                .iter()
                .filter(|c| **c == DrawCommand::Clear)
                .count(),
            1
        );
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut scene = scene(RenderMode::Shaded);
        let start = scene.mesh().position(4);
        let step = Rotation::new(0.05, 0.0);

        for _ in 0..4 {
            scene.apply_incremental_rotation(step);
        }
        let expected = Rotation::new(0.2, 0.0).apply(&start);
        assert!((scene.mesh().position(4) - expected).norm() < 1e-9);
    }

    #[test]
    fn test_rotation_preserves_distance_from_origin() {
        let mut scene = scene(RenderMode::Shaded);
        let before: Vec<f64> = scene.mesh().vertices().values().map(|p| p.coords.norm()).collect();
        for _ in 0..100 {
            scene.apply_incremental_rotation(Rotation::new(0.02, -0.015));
        }
        let after: Vec<f64> = scene.mesh().vertices().values().map(|p| p.coords.norm()).collect();
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mode_switch_keeps_vertices() {
        let mut scene = scene(RenderMode::Shaded);
        scene.apply_incremental_rotation(Rotation::new(0.3, 0.1));
        let before = scene.mesh().vertices().clone();

        scene.set_mode(scene.mode().toggled());
        assert_eq!(scene.mode(), RenderMode::Wireframe);
        assert_eq!(scene.mesh().vertices(), &before);
    }

    #[test]
    fn test_degenerate_mesh_rejected() {
        let vertices = (1..=3).map(|id| (id, Point3::new(1.0, 1.0, 1.0))).collect();
        let faces = vec![Face::new(vec![1, 2, 3]).unwrap()];
        let mesh = Mesh::new(vertices, faces).unwrap();
        assert_eq!(
            Scene::new(mesh, ViewportConfig::default(), RenderMode::Wireframe).unwrap_err(),
            GeometryError::DegenerateMesh
        );
    }
}
