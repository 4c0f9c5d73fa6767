/// Terminal front end: mouse-driven mesh viewer drawn with half-block cells
use color_eyre::eyre::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use meshview_core::{
    DragController, DrawSurface, Mesh, RenderMode, RenderStyle, Scene, ViewportConfig,
};
use std::io::{self, stdout, Write};

pub mod canvas;

pub use canvas::PixelCanvas;

/// Main application struct for terminal mesh viewing
pub struct TerminalApp {
    scene: Scene,
    controller: DragController,
    canvas: PixelCanvas,
    running: bool,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, mode: RenderMode, drag_threshold: f64) -> Result<Self> {
        let (columns, rows) = terminal::size()?;
        let viewport = ViewportConfig::new(PixelCanvas::viewport_size(columns, rows));

        // One-pixel outlines; the default stroke is sized for large canvases
        let style = RenderStyle {
            stroke_width: 1.0,
            ..RenderStyle::default()
        };
        let scene = Scene::new(mesh, viewport, mode)?.with_style(style);
        tracing::info!(columns, rows, size = viewport.size(), ?mode, "terminal viewport");

        Ok(Self {
            scene,
            controller: DragController::with_threshold(&viewport, drag_threshold),
            canvas: PixelCanvas::for_terminal(columns, rows, viewport.size()),
            running: true,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        self.scene.render(&mut self.canvas);
        self.present()?;

        while self.running {
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Mouse(mouse) => self.handle_mouse(mouse)?,
                Event::Resize(columns, rows) => {
                    self.canvas =
                        PixelCanvas::for_terminal(columns, rows, self.scene.viewport().size());
                    self.scene.render(&mut self.canvas);
                    self.present()?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) -> io::Result<()> {
        if kind == KeyEventKind::Release {
            return Ok(());
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('m') => {
                self.scene.set_mode(self.scene.mode().toggled());
                self.canvas.clear();
                self.scene.render(&mut self.canvas);
                self.present()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> io::Result<()> {
        let position = self.canvas.cell_to_viewport(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.controller.on_press(position),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(rotation) = self.controller.on_drag(position) {
                    self.scene.redraw(rotation, &mut self.canvas);
                    self.present()?;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.controller.on_release(),
            _ => {}
        }
        Ok(())
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let mode = match self.scene.mode() {
            RenderMode::Wireframe => "wireframe",
            RenderMode::Shaded => "shaded",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Meshview | {mode} | Drag=Rotate M=Toggle mode Q=Quit"
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshview_core::parse_mesh;
    use nalgebra::Point2;

    const PYRAMID: &str = include_str!("../assets/pyramid.txt");

    fn lit_pixels(canvas: &PixelCanvas, size: usize) -> usize {
        (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y).is_some())
            .count()
    }

    #[test]
    fn test_pyramid_renders_onto_canvas() {
        let mesh = parse_mesh(PYRAMID).unwrap();
        let viewport = ViewportConfig::new(40.0);
        let scene = Scene::new(mesh, viewport, RenderMode::Shaded).unwrap();
        let mut canvas = PixelCanvas::new(40, 40, 40.0);
        scene.render(&mut canvas);

        // Centre of the viewport is covered by the pyramid
        assert!(canvas.pixel(20, 20).is_some());
        assert!(lit_pixels(&canvas, 40) > 100);
    }

    #[test]
    fn test_drag_redraws_canvas() {
        let mesh = parse_mesh(PYRAMID).unwrap();
        let viewport = ViewportConfig::new(40.0);
        let mut scene = Scene::new(mesh, viewport, RenderMode::Wireframe).unwrap();
        let mut canvas = PixelCanvas::for_terminal(40, 20, viewport.size());
        let mut controller = DragController::new(&viewport);

        controller.on_press(canvas.cell_to_viewport(20, 10));
        let rotation = controller
            .on_drag(canvas.cell_to_viewport(22, 10))
            .unwrap();
        scene.redraw(rotation, &mut canvas);
        assert!(lit_pixels(&canvas, 40) > 0);
        assert_eq!(controller.on_drag(Point2::new(100.0, 0.0)), None);
    }
}
