//! glkit web - WebGL2 and DOM bindings for the browser
//!
//! Provides the canvas-backed camera control, shader/program compilation,
//! vertex buffer and VAO setup, texture loading and high-DPI canvas sizing.

use wasm_bindgen::prelude::*;

pub mod buffer;
pub mod control;
pub mod error;
pub mod program;
pub mod surface;
pub mod texture;
pub mod util;

pub use buffer::{bind_data_buffer, create_buffer, create_vertex_array, AttributeLayout, VertexArray};
pub use control::{CanvasCameraControl, JsHooks, WebCameraControl};
pub use error::GlError;
pub use program::{create_program, load_shader};
pub use surface::CanvasSurface;
pub use texture::{create_texture, load_image, load_image_bitmap};
pub use util::{to_high_dpi, window};

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Better panic messages in the browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A logger may already be installed by the embedding application
    console_log::init_with_level(log::Level::Info).ok();

    Ok(())
}
