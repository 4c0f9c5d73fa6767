/// Meshview Web - canvas-based mesh viewer for browsers
///
/// The host page owns the `<canvas>` and forwards pointer events to a
/// [`WebViewer`]; drawing goes through the 2D canvas context.
use meshview_core::{DragController, DrawSurface, RenderMode, Scene, ViewportConfig};
use nalgebra::Point2;
use palette::Srgb;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// CSS hex notation for a color
fn css_color(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    fn trace_path(&self, points: &[Point2<f64>]) {
        self.context.begin_path();
        if let Some((first, rest)) = points.split_first() {
            self.context.move_to(first.x, first.y);
            for point in rest {
                self.context.line_to(point.x, point.y);
            }
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Srgb<u8>) {
        self.trace_path(&[from, to]);
        self.context.set_line_width(1.0);
        self.context.set_stroke_style_str(&css_color(color));
        self.context.stroke();
    }

    fn draw_filled_polygon(
        &mut self,
        points: &[Point2<f64>],
        outline: Srgb<u8>,
        fill: Srgb<u8>,
        stroke_width: f64,
    ) {
        self.trace_path(points);
        self.context.close_path();
        self.context.set_fill_style_str(&css_color(fill));
        self.context.fill();
        self.context.set_line_width(stroke_width);
        self.context.set_stroke_style_str(&css_color(outline));
        self.context.stroke();
    }

    fn draw_point_marker(&mut self, center: Point2<f64>, radius: f64, color: Srgb<u8>) {
        self.context.begin_path();
        if let Err(error) = self
            .context
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
        {
            tracing::warn!(?error, "failed to trace point marker");
            return;
        }
        self.context.set_fill_style_str(&css_color(color));
        self.context.fill();
    }
}

/// Mesh viewer bound to a canvas element
#[wasm_bindgen]
pub struct WebViewer {
    scene: Scene,
    controller: DragController,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl WebViewer {
    /// Parse `mesh` and draw it on the canvas with id `canvas_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, mesh: &str, shaded: bool) -> Result<WebViewer, JsValue> {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element {canvas_id:?} is not a canvas")))?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let (width, height) = (f64::from(canvas.width()), f64::from(canvas.height()));
        let viewport = ViewportConfig::new(width.min(height));
        let mode = if shaded {
            RenderMode::Shaded
        } else {
            RenderMode::Wireframe
        };

        let mesh = meshview_core::parse_mesh(mesh).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let scene =
            Scene::new(mesh, viewport, mode).map_err(|e| JsValue::from_str(&e.to_string()))?;
        tracing::debug!(width, height, ?mode, "web viewer created");

        let mut viewer = WebViewer {
            scene,
            controller: DragController::new(&viewport),
            surface: CanvasSurface {
                context,
                width,
                height,
            },
        };
        viewer.scene.render(&mut viewer.surface);
        Ok(viewer)
    }

    /// Pointer button pressed at canvas coordinates `(x, y)`.
    pub fn on_press(&mut self, x: f64, y: f64) {
        self.controller.on_press(Point2::new(x, y));
    }

    /// Pointer moved while pressed.
    pub fn on_drag(&mut self, x: f64, y: f64) {
        if let Some(rotation) = self.controller.on_drag(Point2::new(x, y)) {
            self.scene.redraw(rotation, &mut self.surface);
        }
    }

    pub fn on_release(&mut self) {
        self.controller.on_release();
    }

    /// Switch between wireframe and shaded and redraw.
    pub fn toggle_mode(&mut self) {
        self.scene.set_mode(self.scene.mode().toggled());
        self.surface.clear();
        self.scene.render(&mut self.surface);
    }

    pub fn is_shaded(&self) -> bool {
        self.scene.mode() == RenderMode::Shaded
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(Srgb::new(0, 0, 255)), "#0000ff");
        assert_eq!(css_color(Srgb::new(18, 171, 5)), "#12ab05");
    }
}
