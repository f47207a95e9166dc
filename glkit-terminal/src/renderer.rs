/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use glkit_core::{Geometry, OrbitCamera};
use nalgebra::{Matrix4, Point3};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lit surfaces never drop below the first visible ramp step
const AMBIENT: f32 = 0.15;

/// ASCII renderer that converts indexed geometry to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Character at a cell, for inspection
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn render_geometry(
        &mut self,
        geometry: &Geometry,
        model_matrix: &Matrix4<f32>,
        camera: &OrbitCamera,
    ) {
        let Some(positions) = geometry.positions() else {
            log::warn!("geometry has no position attribute");
            return;
        };
        let vertex = |index: u16| {
            let base = index as usize * 3;
            positions
                .get(base..base + 3)
                .map(|p| Point3::new(p[0], p[1], p[2]))
        };

        let eye = camera.position();
        for face in geometry.indices.chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) = (vertex(face[0]), vertex(face[1]), vertex(face[2]))
            else {
                continue;
            };
            let world = [
                model_matrix.transform_point(&a),
                model_matrix.transform_point(&b),
                model_matrix.transform_point(&c),
            ];
            let character = shade(&world, &eye);
            self.render_triangle(&world, camera, character);
        }
    }

    fn render_triangle(&mut self, world: &[Point3<f32>; 3], camera: &OrbitCamera, character: char) {
        let identity = Matrix4::identity();
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, point) in screen_coords.iter_mut().zip(world) {
            match camera.project_to_screen(point, &identity, self.width as u32, self.height as u32) {
                Some(coords) => *slot = coords,
                None => return,
            }
        }
        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let [v0, v1, v2] = *coords;

        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p)
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.width.max(1)) {
            for &c in row {
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Headlight shading: faces turned toward the eye are brightest. Winding is
/// ignored so inward-wound faces still shade.
fn shade(world: &[Point3<f32>; 3], eye: &Point3<f32>) -> char {
    let normal = (world[1] - world[0]).cross(&(world[2] - world[0]));
    let centroid = Point3::from((world[0].coords + world[1].coords + world[2].coords) / 3.0);
    let to_eye = eye - centroid;
    let (Some(normal), Some(to_eye)) = (normal.try_normalize(1e-9), to_eye.try_normalize(1e-9))
    else {
        return LUMINOSITY_RAMP[1];
    };

    let brightness = AMBIENT + (1.0 - AMBIENT) * normal.dot(&to_eye).abs();
    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.clamp(1, LUMINOSITY_RAMP.len() - 1)]
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
