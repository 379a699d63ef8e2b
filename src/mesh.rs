// mesh.rs — unit quad and the flattened room vertex buffer

use crate::cube::CubeGeometry;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RoomVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 3],
    /// 1.0 samples the background texture, 0.0 is a flat fill.
    pub tex_mix: f32,
}

impl RoomVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2, 2 => Float32x3, 3 => Float32];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RoomVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuadMesh {
    pub positions: [[f32; 3]; 4],
    pub uvs: [[f32; 2]; 4],
    pub indices: [u16; 6],
}

/// 1x1 quad in the XY plane, centred on the origin, facing +Z.
pub fn build_unit_quad() -> QuadMesh {
    QuadMesh {
        positions: [
            [-0.5, -0.5, 0.0],
            [0.5, -0.5, 0.0],
            [0.5, 0.5, 0.0],
            [-0.5, 0.5, 0.0],
        ],
        uvs: [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        indices: [0, 1, 2, 0, 2, 3],
    }
}

pub const VERTICES_PER_ROOM: usize = 6 * 4;
pub const INDICES_PER_ROOM: usize = 6 * 6;

/// World-space vertices and indices for every wall of `geometry`.
pub fn build_room(geometry: &CubeGeometry) -> (Vec<RoomVertex>, Vec<u16>) {
    let quad = build_unit_quad();
    let mut vertices = Vec::with_capacity(VERTICES_PER_ROOM);
    let mut indices = Vec::with_capacity(INDICES_PER_ROOM);

    for wall in geometry.walls() {
        let base = vertices.len() as u16;
        let model = wall.transform.matrix();
        let tex_mix = if wall.material.textured { 1.0 } else { 0.0 };

        for (pos, uv) in quad.positions.iter().zip(quad.uvs.iter()) {
            let p = model.transform_point3(glam::Vec3::from_array(*pos));
            vertices.push(RoomVertex {
                position: p.to_array(),
                uv: *uv,
                color: wall.material.color,
                tex_mix,
            });
        }
        indices.extend(quad.indices.iter().map(|i| base + i));
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WallColors;
    use crate::cube::Surface;
    use crate::viewport::WallDimensions;

    #[test]
    fn room_buffer_sizes() {
        let mut cube = CubeGeometry::new(&WallColors::default());
        cube.apply(WallDimensions { width: 45.0, height: 23.0 });
        let (v, i) = build_room(&cube);
        assert_eq!(v.len(), VERTICES_PER_ROOM);
        assert_eq!(i.len(), INDICES_PER_ROOM);
        assert!(i.iter().all(|&ix| (ix as usize) < v.len()));
    }

    #[test]
    fn front_wall_spans_its_dimensions() {
        let mut cube = CubeGeometry::new(&WallColors::default());
        cube.apply(WallDimensions { width: 40.0, height: 20.0 });
        let (v, _) = build_room(&cube);
        // Front is the first surface.
        assert_eq!(cube.walls()[0].surface, Surface::Front);
        let front = &v[0..4];
        for vert in front {
            assert!((vert.position[2] + 20.0).abs() < 1e-4);
            assert!((vert.position[0].abs() - 20.0).abs() < 1e-4);
            assert!((vert.position[1].abs() - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn only_textured_walls_sample() {
        let mut cube = CubeGeometry::new(&WallColors::default());
        cube.set_front_texture(true);
        cube.apply(WallDimensions { width: 10.0, height: 10.0 });
        let (v, _) = build_room(&cube);
        assert!(v[0..4].iter().all(|vert| vert.tex_mix == 1.0));
        assert!(v[4..].iter().all(|vert| vert.tex_mix == 0.0));
    }
}
