/// Terminal host for the orbit camera control
use crossterm::{
    cursor,
    event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use glkit_core::{to_radians, CameraControl, ControlSpeeds, Geometry, OrbitCamera, Rect};
use nalgebra::Matrix4;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;
pub mod surface;

pub use renderer::AsciiRenderer;
pub use surface::{translate, TerminalSurface};

/// Rows taken by the status line above the viewport
const HEADER_ROWS: u16 = 1;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;

/// One cell of drag is a much larger motion than one pixel
fn terminal_speeds() -> ControlSpeeds {
    ControlSpeeds::default()
        .with_rotate_speed(to_radians(4.0))
        .with_pan_speed(0.05)
}

fn viewport_rect(width: u16, height: u16) -> Rect {
    Rect::new(
        0.0,
        HEADER_ROWS as f64,
        width as f64,
        height.saturating_sub(HEADER_ROWS) as f64,
    )
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    geometry: Geometry,
    control: CameraControl<OrbitCamera, TerminalSurface>,
    surface: TerminalSurface,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(geometry: Geometry) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(geometry, width, height))
    }

    pub fn with_size(geometry: Geometry, width: u16, height: u16) -> Self {
        let rows = height.saturating_sub(HEADER_ROWS);
        let surface = TerminalSurface::new(viewport_rect(width, height));
        let camera = OrbitCamera::new(width as u32, rows as u32 * CELL_ASPECT);

        let mut control = CameraControl::with_speeds(camera, terminal_speeds());
        control.attach(surface.clone());

        Self {
            geometry,
            control,
            surface,
            renderer: AsciiRenderer::new(width as usize, rows as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        self.control.hooks()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            EnableFocusChange
        )?;

        let result = self.main_loop();

        // Cleanup
        self.control.detach();
        execute!(
            stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(&event);
            }

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply one terminal event: keys drive the app, pointer input goes to
    /// the camera control
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('r') => {
                    let camera = self.control.hooks_mut();
                    let mode = camera.mode;
                    let aspect = camera.aspect;
                    *camera = OrbitCamera::default();
                    camera.mode = mode;
                    camera.aspect = aspect;
                }
                _ => {}
            },
            Event::Resize(width, height) => self.resize(*width, *height),
            _ => {
                if let Some(input) = self.surface.route(event) {
                    // There is no default action to suppress in a terminal
                    let _ = self.control.handle(&input);
                }
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        let rows = height.saturating_sub(HEADER_ROWS);
        log::debug!("viewport resized to {}x{}", width, rows);
        self.surface.set_viewport(viewport_rect(width, height));
        self.renderer.resize(width as usize, rows as usize);
        self.control
            .hooks_mut()
            .set_viewport(width as u32, rows as u32 * CELL_ASPECT);
    }

    fn render(&mut self) -> io::Result<()> {
        let model = Matrix4::identity();

        self.renderer.clear();
        self.renderer
            .render_geometry(&self.geometry, &model, self.control.hooks());

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, HEADER_ROWS))?;
        self.renderer.draw(&mut stdout)?;

        let mode = if self.control.is_dragging() { "dragging" } else { "idle" };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "glkit terminal | FPS: {:.1} | {} | Left drag=Orbit Right drag=Pan Wheel=Zoom R=Reset Q=Quit",
                self.fps, mode
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_left_drag_orbits_camera() {
        let mut app = TerminalApp::with_size(Geometry::cube(), 80, 24);
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 45, 12));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 45, 12));

        let expected = -(5.0 * to_radians(4.0)) as f32;
        assert!((app.camera().yaw - expected).abs() < 1e-6);
        assert!(!app.control.is_dragging());
    }

    #[test]
    fn test_scroll_zooms_and_reset_restores() {
        let mut app = TerminalApp::with_size(Geometry::sphere(), 80, 24);
        app.handle_event(&mouse(MouseEventKind::ScrollDown, 10, 10));
        assert!((app.camera().distance - 5.5).abs() < 1e-5);

        app.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)));
        assert_eq!(app.camera().distance, 5.0);
        assert!((app.camera().aspect - 80.0 / 46.0).abs() < 1e-6);
    }

    #[test]
    fn test_quit_key_stops_app() {
        let mut app = TerminalApp::with_size(Geometry::cube(), 80, 24);
        app.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!app.is_running());
    }

    #[test]
    fn test_resize_moves_viewport() {
        let mut app = TerminalApp::with_size(Geometry::cube(), 80, 24);
        app.handle_event(&Event::Resize(20, 10));
        assert_eq!(app.renderer.width(), 20);
        assert_eq!(app.renderer.height(), 9);
        // Below the new viewport, so the press is not delivered
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 15));
        assert!(!app.control.is_dragging());
    }
}
