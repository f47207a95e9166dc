/// Vertex buffers and vertex array objects
use glkit_core::Geometry;
use js_sys::{Float32Array, Object, Uint16Array, Uint8Array};
use web_sys::{WebGl2RenderingContext as Gl, WebGlBuffer, WebGlVertexArrayObject};

use crate::error::{GlError, Result};

/// Typed data that can be uploaded to a GPU buffer
pub trait BufferSource {
    /// GL component type of one element
    const GL_TYPE: u32;

    fn to_array_view(&self) -> Object;
}

impl BufferSource for [f32] {
    const GL_TYPE: u32 = Gl::FLOAT;

    fn to_array_view(&self) -> Object {
        Float32Array::from(self).into()
    }
}

impl BufferSource for [u16] {
    const GL_TYPE: u32 = Gl::UNSIGNED_SHORT;

    fn to_array_view(&self) -> Object {
        Uint16Array::from(self).into()
    }
}

impl BufferSource for [u8] {
    const GL_TYPE: u32 = Gl::UNSIGNED_BYTE;

    fn to_array_view(&self) -> Object {
        Uint8Array::from(self).into()
    }
}

/// Create a buffer bound to `target`, fill it with `data` (STATIC_DRAW) and
/// leave `target` unbound
pub fn create_buffer<T: BufferSource + ?Sized>(gl: &Gl, target: u32, data: &T) -> Result<WebGlBuffer> {
    let buffer = gl.create_buffer().ok_or(GlError::Create("buffer"))?;
    gl.bind_buffer(target, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(target, &data.to_array_view(), Gl::STATIC_DRAW);
    gl.bind_buffer(target, None);
    Ok(buffer)
}

/// How one vertex attribute reads from its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    pub index: u32,
    pub size: i32,
    pub data_type: u32,
    pub stride: i32,
    pub offset: i32,
}

impl AttributeLayout {
    /// Three tightly packed floats at `index`
    pub fn new(index: u32) -> Self {
        Self {
            index,
            size: 3,
            data_type: Gl::FLOAT,
            stride: 0,
            offset: 0,
        }
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn with_type(mut self, data_type: u32) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_stride(mut self, stride: i32, offset: i32) -> Self {
        self.stride = stride;
        self.offset = offset;
        self
    }
}

/// Enable the attribute described by `layout` and point it at `buffer`
pub fn bind_data_buffer(gl: &Gl, buffer: &WebGlBuffer, layout: &AttributeLayout) {
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
    gl.enable_vertex_attrib_array(layout.index);
    gl.vertex_attrib_pointer_with_i32(
        layout.index,
        layout.size,
        layout.data_type,
        false,
        layout.stride,
        layout.offset,
    );
    gl.bind_buffer(Gl::ARRAY_BUFFER, None);
}

/// A vertex array object together with the buffers it references
pub struct VertexArray {
    pub vao: WebGlVertexArrayObject,
    buffers: Vec<WebGlBuffer>,
    index_buffer: Option<WebGlBuffer>,
    /// Number of `u16` indices to pass to `drawElements`
    pub index_count: i32,
}

impl VertexArray {
    pub fn bind(&self, gl: &Gl) {
        gl.bind_vertex_array(Some(&self.vao));
    }

    pub fn delete(self, gl: &Gl) {
        for buffer in self.buffers.iter().chain(self.index_buffer.iter()) {
            gl.delete_buffer(Some(buffer));
        }
        gl.delete_vertex_array(Some(&self.vao));
    }
}

/// Upload every attribute of `geometry` and its index list into a new VAO
pub fn create_vertex_array(gl: &Gl, geometry: &Geometry) -> Result<VertexArray> {
    // Created before the VAO is bound; create_buffer unbinds its target
    let index_buffer = if geometry.indices.is_empty() {
        None
    } else {
        Some(create_buffer(gl, Gl::ELEMENT_ARRAY_BUFFER, geometry.indices.as_slice())?)
    };

    let vao = gl.create_vertex_array().ok_or(GlError::Create("vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let mut buffers = Vec::with_capacity(geometry.attributes.len());
    for attribute in &geometry.attributes {
        let buffer = match create_buffer(gl, Gl::ARRAY_BUFFER, attribute.data.as_slice()) {
            Ok(buffer) => buffer,
            Err(err) => {
                gl.bind_vertex_array(None);
                return Err(err);
            }
        };
        bind_data_buffer(
            gl,
            &buffer,
            &AttributeLayout::new(attribute.index).with_size(attribute.size),
        );
        buffers.push(buffer);
    }

    if let Some(index_buffer) = &index_buffer {
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
    }
    gl.bind_vertex_array(None);

    Ok(VertexArray {
        vao,
        buffers,
        index_buffer,
        index_count: geometry.indices.len() as i32,
    })
}
