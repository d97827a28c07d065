//! Vertex, index and instance buffers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Indexed mesh uploaded once and drawn many times.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl MeshBuffer {
    /// Bind the mesh to vertex slot 0 and the index slot.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw `instances` copies of the mesh.
    pub fn draw_instanced(&self, render_pass: &mut wgpu::RenderPass<'_>, instances: u32) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..instances);
    }
}

pub enum IndexData<'a> {
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl IndexData<'_> {
    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            IndexData::U16(data) => data.len() as u32,
            IndexData::U32(data) => data.len() as u32,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(data) => bytemuck::cast_slice(data),
            IndexData::U32(data) => bytemuck::cast_slice(data),
        }
    }
}

/// Creates static GPU buffers from CPU data.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    pub fn create_mesh(&self, label: &str, vertices: &[u8], indices: IndexData) -> MeshBuffer {
        let vertex_buffer = self.create_vertex_buffer(&format!("{label}-vertices"), vertices);
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-indices")),
                contents: indices.as_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: indices.count(),
            index_format: indices.format(),
        }
    }

    pub fn create_vertex_buffer(&self, label: &str, data: &[u8]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: wgpu::BufferUsages::VERTEX,
            })
    }
}

/// Per-instance (or per-frame vertex) data rewritten every frame.
///
/// Grows to the next power of two when a write does not fit; never shrinks.
pub struct InstanceBuffer {
    buffer: wgpu::Buffer,
    label: &'static str,
    usage: wgpu::BufferUsages,
    capacity: u64,
    len: u32,
}

impl InstanceBuffer {
    const MIN_CAPACITY: u64 = 256;

    /// `usage` is `VERTEX` for instance and overlay data; `COPY_DST` is added.
    pub fn new(device: &wgpu::Device, label: &'static str, usage: wgpu::BufferUsages) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        Self {
            buffer: Self::allocate(device, label, usage, Self::MIN_CAPACITY),
            label,
            usage,
            capacity: Self::MIN_CAPACITY,
            len: 0,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &'static str,
        usage: wgpu::BufferUsages,
        size: u64,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    /// Replace the contents with `items`.
    pub fn write<T: Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(items);
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            log::debug!("Growing {} to {} bytes", self.label, self.capacity);
            self.buffer = Self::allocate(device, self.label, self.usage, self.capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.len = items.len() as u32;
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    /// Number of items from the last write.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

/// Position and RGBA color. Used for the star point cloud.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct VertexPositionColor {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl VertexPositionColor {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Position and normal of a unit-sphere vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionNormal {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl VertexPositionNormal {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Screen-space vertex: position in normalized device coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl OverlayVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_device::create_test_device;

    #[test]
    fn test_index_format_selection() {
        assert_eq!(IndexData::U16(&[0, 1, 2]).format(), wgpu::IndexFormat::Uint16);
        assert_eq!(IndexData::U32(&[0, 1, 2]).format(), wgpu::IndexFormat::Uint32);
    }

    #[test]
    fn test_index_data_as_bytes() {
        assert_eq!(IndexData::U16(&[0, 1, 2]).as_bytes().len(), 6);
        assert_eq!(IndexData::U32(&[0, 1, 2]).as_bytes().len(), 12);
    }

    #[test]
    fn test_vertex_layout_strides() {
        assert_eq!(VertexPositionColor::layout().array_stride, 28);
        assert_eq!(VertexPositionNormal::layout().array_stride, 24);
        assert_eq!(OverlayVertex::layout().array_stride, 24);
    }

    #[test]
    fn test_overlay_color_offset() {
        let layout = OverlayVertex::layout();
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_mesh_index_count() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let vertices = [VertexPositionNormal {
            position: [0.0; 3],
            normal: [0.0, 1.0, 0.0],
        }; 3];
        let mesh = BufferAllocator::new(&device).create_mesh(
            "triangle",
            bytemuck::cast_slice(&vertices),
            IndexData::U32(&[0, 1, 2]),
        );
        assert_eq!(mesh.index_count, 3);
        assert_eq!(mesh.index_format, wgpu::IndexFormat::Uint32);
    }

    #[test]
    fn test_instance_buffer_grows() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let mut buffer = InstanceBuffer::new(&device, "test-instances", wgpu::BufferUsages::VERTEX);
        assert!(buffer.is_empty());

        let vertices = vec![
            OverlayVertex {
                position: [0.0, 0.0],
                color: [1.0; 4],
            };
            100
        ];
        buffer.write(&device, &queue, &vertices);
        assert_eq!(buffer.len(), 100);
        assert!(buffer.capacity() >= 2400);

        buffer.write::<OverlayVertex>(&device, &queue, &[]);
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 2400);
    }
}
