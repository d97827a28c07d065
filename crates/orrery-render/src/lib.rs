//! wgpu rendering for the orbital viewer: device and surface management,
//! reverse-Z depth, mesh and instance buffers, a screen-ray camera and the
//! three unlit pipelines the scene is drawn with (lit spheres, star points,
//! screen-space overlay quads).

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod pipeline;

pub use buffer::{
    BufferAllocator, IndexData, InstanceBuffer, MeshBuffer, OverlayVertex, VertexPositionColor,
    VertexPositionNormal,
};
pub use camera::{Camera, ndc_from_cursor};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use pipeline::{
    CameraBinding, CameraUniform, OVERLAY_SHADER_SOURCE, OverlayPipeline, POINT_SHADER_SOURCE,
    PointPipeline, SPHERE_SHADER_SOURCE, SphereInstance, SpherePipeline,
};

#[cfg(test)]
pub(crate) mod test_device {
    /// Request a headless device; `None` when the machine has no usable adapter.
    pub fn create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .ok()?;

            adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .ok()
        })
    }
}
