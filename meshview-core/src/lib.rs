/// Meshview Core Library - Geometry pipeline for an interactive mesh viewer
///
/// Loads an indexed mesh, centres it in a square viewport, accumulates
/// pointer-driven rotations into the vertex positions and emits draw calls
/// for wireframe or flat-shaded rendering onto any [`DrawSurface`].

pub mod config;
pub mod depth;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod loader;
pub mod projection;
pub mod scene;
pub mod shading;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use config::{RenderStyle, ViewportConfig};
pub use error::{GeometryError, LoadError};
pub use geometry::{Face, Mesh, VertexId};
pub use interaction::{DragController, DragState};
pub use loader::parse_mesh;
pub use projection::ProjectionMode;
pub use scene::{RenderMode, Scene};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
pub use transform::Rotation;

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_drag_to_render_round() {
        let mesh = parse_mesh("4,2\n1,0,0,0\n2,1,0,0\n3,0,1,0\n4,0,0,1\n1,2,3\n2,3,4\n").unwrap();
        let viewport = ViewportConfig::default();
        let mut scene = Scene::new(mesh, viewport, RenderMode::Shaded).unwrap();
        let mut controller = DragController::new(&viewport);
        let mut surface = RecordingSurface::new();

        controller.on_press(Point2::new(400.0, 400.0));
        if let Some(rotation) = controller.on_drag(Point2::new(415.0, 400.0)) {
            scene.redraw(rotation, &mut surface);
        }
        assert!(surface.commands.is_empty());

        let rotation = controller.on_drag(Point2::new(424.0, 400.0)).unwrap();
        scene.redraw(rotation, &mut surface);
        assert_eq!(surface.commands[0], DrawCommand::Clear);
        assert_eq!(surface.polygons().count(), 2);
        assert_eq!(surface.markers().count(), 4);
    }
}
