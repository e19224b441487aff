//! Staged Buffer Upload
//!
//! Geometry reaches device-local memory through a one-shot staging pass:
//! allocate a host-visible [`TransferBuffer`] sized for both payloads,
//! write the vertex region then the index region immediately after it,
//! unmap, record one copy per region, submit, and drop the staging buffer.
//! wgpu keeps resources referenced by submitted command buffers alive until
//! the GPU is done with them, so the drop is safe immediately after
//! submission.
//!
//! Allocation failures here are fatal to startup: wgpu reports them through
//! its uncaptured-error handler, which aborts the process. No
//! partial-resource recovery is attempted.

use log::debug;

use crate::gpu::context::GpuContext;

/// A short-lived host-visible staging buffer.
///
/// Created mapped; write, [`unmap`](Self::unmap), use once as a copy
/// source, then drop. Never remapped or reused after the copy pass it
/// feeds.
pub struct TransferBuffer {
    buffer: wgpu::Buffer,
    size: u64,
}

impl TransferBuffer {
    #[must_use]
    pub fn new(device: &wgpu::Device, size: u64) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Transfer Buffer"),
            size,
            usage: wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: true,
        });
        Self { buffer, size }
    }

    /// Writes `bytes` into the mapped buffer at `offset`.
    ///
    /// Panics if the buffer is unmapped or the range is out of bounds.
    pub fn write(&mut self, offset: u64, bytes: &[u8]) {
        let end = offset + bytes.len() as u64;
        let mut view = self.buffer.slice(offset..end).get_mapped_range_mut();
        view.copy_from_slice(bytes);
    }

    /// Invalidates the host view; no further writes are permitted.
    pub fn unmap(&self) {
        self.buffer.unmap();
    }

    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Device-local geometry buffers, populated exactly once before the render
/// loop starts and owned for the run.
pub struct MeshBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

/// Packs vertex and index payloads into one contiguous staging image:
/// vertex bytes first, index bytes immediately after, no padding.
///
/// Returns the packed bytes and the byte offset of the index region, which
/// equals the vertex payload size exactly.
#[must_use]
pub fn pack_staging_bytes<V: bytemuck::Pod>(vertices: &[V], indices: &[u16]) -> (Vec<u8>, u64) {
    let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
    let index_bytes: &[u8] = bytemuck::cast_slice(indices);
    let index_offset = vertex_bytes.len() as u64;

    let mut packed = Vec::with_capacity(vertex_bytes.len() + index_bytes.len());
    packed.extend_from_slice(vertex_bytes);
    packed.extend_from_slice(index_bytes);
    (packed, index_offset)
}

/// Uploads vertex records and 16-bit indices into fresh device-local
/// buffers via a staged copy pass.
///
/// Both payload sizes must be multiples of wgpu's 4-byte copy alignment
/// (position-only vertices and an even index count satisfy this). The
/// transfer buffer is submitted as a copy source and dropped before this
/// function returns.
pub fn upload_mesh<V: bytemuck::Pod>(
    ctx: &GpuContext,
    vertices: &[V],
    indices: &[u16],
) -> MeshBuffers {
    let (staging_bytes, index_offset) = pack_staging_bytes(vertices, indices);
    let vertex_size = index_offset;
    let index_size = staging_bytes.len() as u64 - vertex_size;
    assert_eq!(vertex_size % wgpu::COPY_BUFFER_ALIGNMENT, 0);
    assert_eq!(index_size % wgpu::COPY_BUFFER_ALIGNMENT, 0);

    let device = &ctx.device;
    let vertex = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Vertex Buffer"),
        size: vertex_size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let index = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Index Buffer"),
        size: index_size,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut staging = TransferBuffer::new(device, staging_bytes.len() as u64);
    staging.write(0, &staging_bytes);
    staging.unmap();

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Mesh Upload"),
    });
    encoder.copy_buffer_to_buffer(staging.buffer(), 0, &vertex, 0, vertex_size);
    encoder.copy_buffer_to_buffer(staging.buffer(), index_offset, &index, 0, index_size);
    ctx.queue.submit(Some(encoder.finish()));
    debug!("Uploaded {vertex_size} vertex bytes and {index_size} index bytes");

    // `staging` drops here; the submitted copy keeps it alive on the GPU
    // timeline until the transfer completes.
    MeshBuffers {
        vertex,
        index,
        index_count: indices.len() as u32,
        index_format: wgpu::IndexFormat::Uint16,
    }
}
