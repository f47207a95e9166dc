/// glkit terminal demo: orbit a cube or sphere with the mouse
///
/// Usage: `glkit-terminal [cube|sphere]`
/// Controls:
///   - Left drag: orbit
///   - Right drag: pan
///   - Wheel: zoom
///   - R: reset camera
///   - Q/ESC: quit
use glkit_core::Geometry;
use glkit_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    let shape = std::env::args().nth(1).unwrap_or_else(|| "cube".to_string());
    let geometry = match shape.as_str() {
        "cube" => Geometry::cube(),
        "sphere" => Geometry::sphere(),
        other => {
            eprintln!("unknown shape '{}', expected cube or sphere", other);
            std::process::exit(2);
        }
    };

    let mut app = TerminalApp::new(geometry)?;
    app.run()
}
