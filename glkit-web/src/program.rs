/// Shader compilation and program linking
use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext as Gl, WebGlProgram, WebGlShader};

use crate::error::{GlError, Result};

/// Compile a shader of `kind` (`VERTEX_SHADER` or `FRAGMENT_SHADER`).
///
/// On failure the info log is logged, the shader deleted and the log returned
/// as the error. A failure while the context is lost is not reported; the
/// shader is recreated once the context is restored.
#[wasm_bindgen(js_name = loadShader)]
pub fn load_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(GlError::Create("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !compiled && !gl.is_context_lost() {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        log::error!("{}", info);
        gl.delete_shader(Some(&shader));
        return Err(GlError::ShaderCompile(info));
    }

    Ok(shader)
}

/// Compile both stages and link them into a program.
///
/// The intermediate shaders are deleted once the program is linked.
#[wasm_bindgen(js_name = createProgram)]
pub fn create_program(gl: &Gl, vertex_source: &str, fragment_source: &str) -> Result<WebGlProgram> {
    let vertex_shader = load_shader(gl, Gl::VERTEX_SHADER, vertex_source)?;
    let fragment_shader = match load_shader(gl, Gl::FRAGMENT_SHADER, fragment_source) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(Some(&vertex_shader));
            return Err(err);
        }
    };

    let delete_shaders = || {
        gl.delete_shader(Some(&vertex_shader));
        gl.delete_shader(Some(&fragment_shader));
    };

    let Some(program) = gl.create_program() else {
        delete_shaders();
        return Err(GlError::Create("program"));
    };
    gl.attach_shader(&program, &vertex_shader);
    gl.attach_shader(&program, &fragment_shader);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !linked && !gl.is_context_lost() {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        log::error!("{}", info);
        gl.delete_program(Some(&program));
        delete_shaders();
        return Err(GlError::ProgramLink(info));
    }

    delete_shaders();
    Ok(program)
}
