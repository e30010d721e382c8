//! The shared vertex buffer: two triangles packed contiguously, uploaded once.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

/// Object-space vertex position.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(x: f32, y: f32, z: f32) -> Vertex {
    Vertex { pos: [x, y, z] }
}

/// Both triangles, packed contiguously. Immutable after upload.
pub const VERTICES: [Vertex; 6] = [
    v(-0.7, -0.8, 0.0),
    v(-0.7, 0.8, 0.0),
    v(0.5, 0.0, 0.0),
    v(0.6, 0.4, 0.0),
    v(0.6, -0.4, 0.0),
    v(-0.5, 0.0, 0.0),
];

/// Draw range for the first triangle.
pub const TRIANGLE_A: Range<u32> = 0..3;

/// Draw range for the second triangle.
///
/// Ends at the buffer bound; every draw range must stay inside `VERTICES`.
pub const TRIANGLE_B: Range<u32> = 3..6;

#[cfg(test)]
mod tests {
    use super::*;

    // ── sub-ranges ────────────────────────────────────────────────────────

    #[test]
    fn sub_ranges_are_disjoint() {
        assert!(TRIANGLE_A.end <= TRIANGLE_B.start);
    }

    #[test]
    fn sub_ranges_stay_inside_buffer() {
        assert!(TRIANGLE_A.end as usize <= VERTICES.len());
        assert!(TRIANGLE_B.end as usize <= VERTICES.len());
    }

    #[test]
    fn sub_ranges_cover_whole_buffer() {
        let covered = (TRIANGLE_A.end - TRIANGLE_A.start) + (TRIANGLE_B.end - TRIANGLE_B.start);
        assert_eq!(covered as usize, VERTICES.len());
    }

    // ── upload representation ─────────────────────────────────────────────

    #[test]
    fn upload_bytes_round_trip_exactly() {
        let bytes: &[u8] = bytemuck::cast_slice(&VERTICES);
        assert_eq!(bytes.len(), VERTICES.len() * std::mem::size_of::<Vertex>());

        let back: &[Vertex] = bytemuck::cast_slice(bytes);
        assert_eq!(back, &VERTICES[..]);
    }

    #[test]
    fn layout_is_tightly_packed() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].offset, 0);
    }
}
