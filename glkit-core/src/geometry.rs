/// Procedural primitive geometry laid out for indexed vertex-array drawing
use nalgebra::Vector3;

/// Attribute location of vertex positions (3 floats)
pub const POSITION_LOCATION: u32 = 0;
/// Attribute location of texture coordinates (2 floats)
pub const TEXCOORD_LOCATION: u32 = 1;
/// Attribute location of vertex normals (3 floats)
pub const NORMAL_LOCATION: u32 = 2;

/// One vertex attribute stream
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Shader attribute location
    pub index: u32,
    /// Components per vertex
    pub size: i32,
    pub data: Vec<f32>,
}

impl Attribute {
    pub fn new(index: u32, size: i32, data: Vec<f32>) -> Self {
        Self { index, size, data }
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.size.max(1) as usize
    }
}

/// Indexed triangle geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    pub indices: Vec<u16>,
    pub attributes: Vec<Attribute>,
}

impl Geometry {
    fn from_streams(vertices: Vec<f32>, textures: Vec<f32>, normals: Vec<f32>, indices: Vec<u16>) -> Self {
        Self {
            indices,
            attributes: vec![
                Attribute::new(POSITION_LOCATION, 3, vertices),
                Attribute::new(TEXCOORD_LOCATION, 2, textures),
                Attribute::new(NORMAL_LOCATION, 3, normals),
            ],
        }
    }

    pub fn attribute(&self, index: u32) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.index == index)
    }

    pub fn positions(&self) -> Option<&[f32]> {
        self.attribute(POSITION_LOCATION)
            .map(|attribute| attribute.data.as_slice())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unit UV sphere with 30 latitude and 30 longitude bands
    pub fn sphere() -> Self {
        const LATITUDE_BANDS: u16 = 30;
        const LONGITUDE_BANDS: u16 = 30;
        const RADIUS: f32 = 1.0;

        let vertex_count = ((LATITUDE_BANDS + 1) * (LONGITUDE_BANDS + 1)) as usize;
        let mut vertices = Vec::with_capacity(vertex_count * 3);
        let mut textures = Vec::with_capacity(vertex_count * 2);
        let mut normals = Vec::with_capacity(vertex_count * 3);
        let mut indices = Vec::with_capacity((LATITUDE_BANDS * LONGITUDE_BANDS * 6) as usize);

        for lat in 0..=LATITUDE_BANDS {
            let theta = lat as f32 * std::f32::consts::PI / LATITUDE_BANDS as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for long in 0..=LONGITUDE_BANDS {
                let phi = long as f32 * 2.0 * std::f32::consts::PI / LONGITUDE_BANDS as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let normal = Vector3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
                let position = normal * RADIUS;
                let u = 1.0 - long as f32 / LONGITUDE_BANDS as f32;
                let v = 1.0 - lat as f32 / LATITUDE_BANDS as f32;

                normals.extend_from_slice(normal.as_slice());
                textures.extend_from_slice(&[u, v]);
                vertices.extend_from_slice(position.as_slice());
            }
        }

        for lat in 0..LATITUDE_BANDS {
            for long in 0..LONGITUDE_BANDS {
                let first = lat * (LONGITUDE_BANDS + 1) + long;
                let second = first + LONGITUDE_BANDS + 1;
                indices.extend_from_slice(&[second, first, first + 1, second + 1, second, first + 1]);
            }
        }

        Self::from_streams(vertices, textures, normals, indices)
    }

    /// Axis-aligned cube spanning -1..1 with four vertices per face
    pub fn cube() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            // front face (z: +1)
             1.0,  1.0,  1.0,   -1.0,  1.0,  1.0,   -1.0, -1.0,  1.0,    1.0, -1.0,  1.0,
            // right face (x: +1)
             1.0,  1.0, -1.0,    1.0,  1.0,  1.0,    1.0, -1.0,  1.0,    1.0, -1.0, -1.0,
            // top face (y: +1)
             1.0,  1.0, -1.0,   -1.0,  1.0, -1.0,   -1.0,  1.0,  1.0,    1.0,  1.0,  1.0,
            // left face (x: -1)
            -1.0,  1.0,  1.0,   -1.0,  1.0, -1.0,   -1.0, -1.0, -1.0,   -1.0, -1.0,  1.0,
            // bottom face (y: -1)
             1.0, -1.0,  1.0,   -1.0, -1.0,  1.0,   -1.0, -1.0, -1.0,    1.0, -1.0, -1.0,
            // back face (z: -1)
            -1.0,  1.0, -1.0,    1.0,  1.0, -1.0,    1.0, -1.0, -1.0,   -1.0, -1.0, -1.0,
        ];

        let face_normals: [[f32; 3]; 6] = [
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, -1.0],
        ];
        // top right, top left, bottom left, bottom right
        let face_uvs: [f32; 8] = [1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0];

        let mut normals = Vec::with_capacity(72);
        let mut textures = Vec::with_capacity(48);
        let mut indices = Vec::with_capacity(36);
        for (face, normal) in face_normals.iter().enumerate() {
            for _ in 0..4 {
                normals.extend_from_slice(normal);
            }
            textures.extend_from_slice(&face_uvs);

            let base = face as u16 * 4;
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::from_streams(vertices, textures, normals, indices)
    }
}
