/// Image loading and texture creation
use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, HtmlImageElement, ImageBitmap, Request, RequestInit, RequestMode, Response,
    WebGl2RenderingContext as Gl, WebGlTexture,
};

use crate::error::{GlError, Result};
use crate::util::window;

/// Load an image with anonymous CORS so it can be used as a texture source.
///
/// Resolves once on `load` or fails once on `error`.
pub async fn load_image(src: &str) -> Result<HtmlImageElement> {
    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));

    let loaded = Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);

    let result = JsFuture::from(loaded).await;
    image.set_onload(None);
    image.set_onerror(None);
    result.map_err(|_| GlError::ImageLoad {
        src: src.to_string(),
    })?;

    Ok(image)
}

/// Fetch `src` with CORS and decode it off the main thread into an
/// `ImageBitmap`
pub async fn load_image_bitmap(src: &str) -> Result<ImageBitmap> {
    let window = window()?;

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(src, &init)?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(GlError::Fetch {
            src: src.to_string(),
            status: response.status_text(),
        });
    }

    let blob: Blob = JsFuture::from(response.blob()?).await?.dyn_into()?;
    let bitmap = JsFuture::from(window.create_image_bitmap_with_blob(&blob)?)
        .await?
        .dyn_into()?;
    Ok(bitmap)
}

/// Load the image at `url` into a new RGBA8 texture with linear filtering.
///
/// Uses texture unit 0 and leaves `TEXTURE_2D` unbound.
pub async fn create_texture(gl: &Gl, url: &str) -> Result<WebGlTexture> {
    let image = load_image(url).await?;
    let texture = gl.create_texture().ok_or(GlError::Create("texture"))?;

    gl.active_texture(Gl::TEXTURE0);
    gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));
    gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MIN_FILTER, Gl::LINEAR as i32);
    gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MAG_FILTER, Gl::LINEAR as i32);
    let uploaded = gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_html_image_element(
        Gl::TEXTURE_2D,
        0,
        Gl::RGBA8 as i32,
        image.natural_width() as i32,
        image.natural_height() as i32,
        0,
        Gl::RGBA,
        Gl::UNSIGNED_BYTE,
        &image,
    );
    gl.bind_texture(Gl::TEXTURE_2D, None);

    if let Err(err) = uploaded {
        gl.delete_texture(Some(&texture));
        return Err(err.into());
    }
    Ok(texture)
}
