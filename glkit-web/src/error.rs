/// Error type for the WebGL and DOM helpers
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GlError {
    #[error("failed to create {0}")]
    Create(&'static str),

    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    #[error("program linking failed: {0}")]
    ProgramLink(String),

    #[error("failed to load image {src}")]
    ImageLoad { src: String },

    #[error("request for {src} failed: {status}")]
    Fetch { src: String, status: String },

    #[error("no global window available")]
    NoWindow,

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for GlError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        GlError::Js(message)
    }
}

impl From<GlError> for JsValue {
    fn from(error: GlError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

pub type Result<T, E = GlError> = std::result::Result<T, E>;
