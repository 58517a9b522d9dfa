use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position, normal, texture coordinate. 32-byte stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

const fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        uv,
    }
}

/// Indexed triangle list with counter-clockwise front faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Single triangle in the XY plane facing +Z.
    pub fn triangle() -> Self {
        let n = [0.0, 0.0, 1.0];
        Self::new(
            vec![
                v([-0.5, -0.5, 0.0], n, [0.0, 0.0]),
                v([0.5, -0.5, 0.0], n, [1.0, 0.0]),
                v([0.0, 0.5, 0.0], n, [0.5, 1.0]),
            ],
            vec![0, 1, 2],
        )
    }

    /// Unit quad in the XY plane facing +Z.
    pub fn quad() -> Self {
        let n = [0.0, 0.0, 1.0];
        Self::new(
            vec![
                v([-0.5, -0.5, 0.0], n, [0.0, 0.0]),
                v([-0.5, 0.5, 0.0], n, [0.0, 1.0]),
                v([0.5, 0.5, 0.0], n, [1.0, 1.0]),
                v([0.5, -0.5, 0.0], n, [1.0, 0.0]),
            ],
            vec![0, 3, 1, 1, 3, 2],
        )
    }

    /// Horizontal plane facing +Y. Half extents are `width / 2` and `depth / 2`
    /// rounded down, so odd sizes shrink by one.
    pub fn plane(width: u32, depth: u32) -> Self {
        let hw = (width >> 1) as f32;
        let hd = (depth >> 1) as f32;
        let n = [0.0, 1.0, 0.0];
        Self::new(
            vec![
                v([-hw, 0.0, hd], n, [0.0, 0.0]),
                v([hw, 0.0, hd], n, [1.0, 0.0]),
                v([-hw, 0.0, -hd], n, [0.0, 1.0]),
                v([hw, 0.0, -hd], n, [1.0, 1.0]),
            ],
            vec![0, 1, 2, 2, 1, 3],
        )
    }

    /// Unit cube centered on the origin, four vertices per face.
    pub fn cube() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            // front
            v([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
            v([ 0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 0.0]),
            v([-0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 1.0]),
            v([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
            // back
            v([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
            v([ 0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
            v([-0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
            v([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
            // left
            v([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 0.0]),
            v([-0.5, -0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 0.0]),
            v([-0.5,  0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 1.0]),
            v([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 1.0]),
            // right
            v([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
            v([ 0.5, -0.5,  0.5], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
            v([ 0.5,  0.5, -0.5], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
            v([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0], [1.0, 1.0]),
            // top
            v([-0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
            v([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
            v([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
            v([ 0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
            // bottom
            v([-0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
            v([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
            v([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
            v([ 0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 2, 1, 3,         // front
            7, 5, 6, 6, 5, 4,         // back
            8, 9, 10, 10, 9, 11,      // left
            15, 13, 14, 14, 13, 12,   // right
            16, 17, 18, 18, 17, 19,   // top
            23, 21, 22, 22, 21, 20,   // bottom
        ];
        Self::new(vertices, indices)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
