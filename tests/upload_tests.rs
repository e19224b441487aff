//! Staged upload layout tests
//!
//! The copy pass itself needs a live device; what is pinned here is the
//! byte-exact staging layout it consumes: vertex region first, index region
//! immediately after at offset equal to the vertex payload size, no padding.

use glint::gpu::upload::pack_staging_bytes;
use glint::PositionVertex;

/// The demo quad: 4 corners, 2 triangles.
const QUAD_VERTICES: [PositionVertex; 4] = [
    PositionVertex::new(-0.5, -0.5, 0.0),
    PositionVertex::new(0.5, -0.5, 0.0),
    PositionVertex::new(0.5, 0.5, 0.0),
    PositionVertex::new(-0.5, 0.5, 0.0),
];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[test]
fn quad_staging_layout_is_contiguous() {
    let (packed, index_offset) = pack_staging_bytes(&QUAD_VERTICES, &QUAD_INDICES);

    // 4 vertices of 12 bytes, then 6 indices of 2 bytes.
    assert_eq!(index_offset, 48);
    assert_eq!(packed.len(), 48 + 12);

    let vertex_bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
    let index_bytes: &[u8] = bytemuck::cast_slice(&QUAD_INDICES);
    assert_eq!(&packed[..48], vertex_bytes);
    assert_eq!(&packed[48..], index_bytes);
}

#[test]
fn index_region_starts_at_vertex_payload_size() {
    // Regardless of vertex count, the index region begins exactly where
    // the vertex payload ends.
    for n in [1usize, 2, 3, 4, 7] {
        let vertices = vec![PositionVertex::new(1.0, 2.0, 3.0); n];
        let indices: Vec<u16> = (0..n as u16).collect();
        let (packed, offset) = pack_staging_bytes(&vertices, &indices);
        assert_eq!(offset as usize, n * size_of::<PositionVertex>());
        assert_eq!(packed.len(), offset as usize + indices.len() * 2);
    }
}

#[test]
fn written_indices_round_trip_through_the_staging_image() {
    let (packed, offset) = pack_staging_bytes(&QUAD_VERTICES, &QUAD_INDICES);
    let recovered: Vec<u16> = packed[offset as usize..]
        .chunks_exact(2)
        .map(|b| u16::from_ne_bytes([b[0], b[1]]))
        .collect();
    assert_eq!(recovered, QUAD_INDICES);
}

#[test]
fn quad_payloads_satisfy_copy_alignment() {
    let (packed, offset) = pack_staging_bytes(&QUAD_VERTICES, &QUAD_INDICES);
    assert_eq!(offset % wgpu::COPY_BUFFER_ALIGNMENT, 0);
    assert_eq!((packed.len() as u64 - offset) % wgpu::COPY_BUFFER_ALIGNMENT, 0);
}
