/// DOM helpers shared by the other modules
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use crate::error::{GlError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(GlError::NoWindow)
}

/// Scale the canvas backing store by `devicePixelRatio` while keeping its CSS
/// size at the original pixel dimensions
#[wasm_bindgen(js_name = toHighDPI)]
pub fn to_high_dpi(canvas: &HtmlCanvasElement) -> Result<()> {
    let (width, height) = (canvas.width(), canvas.height());
    let ratio = match window()?.device_pixel_ratio() {
        ratio if ratio > 0.0 => ratio,
        _ => 1.0,
    };

    // Fractional sizes truncate, as a DOM assignment would
    canvas.set_width((width as f64 * ratio) as u32);
    canvas.set_height((height as f64 * ratio) as u32);

    let style = canvas.style();
    style.set_property("width", &format!("{}px", width))?;
    style.set_property("height", &format!("{}px", height))?;
    Ok(())
}

#[wasm_bindgen(js_name = toRadians)]
pub fn to_radians(angle: f64) -> f64 {
    glkit_core::to_radians(angle)
}
