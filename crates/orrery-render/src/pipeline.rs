//! Unlit pipelines for the orbital scene.
//!
//! - [`SpherePipeline`]: one icosphere mesh drawn instanced for the sun and
//!   every planet, shaded by the direction to the origin.
//! - [`PointPipeline`]: the starfield as a point list.
//! - [`OverlayPipeline`]: alpha-blended screen-space triangles in NDC for the
//!   loading spinner and the detail panel. Drawn in a pass without depth.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::buffer::{OverlayVertex, VertexPositionColor, VertexPositionNormal};
use crate::camera::Camera;
use crate::depth::DepthBuffer;

/// Uniform buffer for camera view-projection matrix.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4], // 64 bytes, mat4x4
}

/// Per-instance sphere transform and color.
///
/// `emissive` is 1.0 for self-lit bodies (the sun), 0.0 for bodies lit by it.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub emissive: f32,
}

impl SphereInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Camera uniform buffer with its bind group.
pub struct CameraBinding {
    pub layout: wgpu::BindGroupLayout,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(64), // mat4x4<f32>
                },
                count: None,
            }],
        });
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera-uniform"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            layout,
            buffer,
            bind_group,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&camera.to_uniform()));
    }
}

/// Settings that differ between the three pipelines.
struct PipelineSpec<'a> {
    label: &'static str,
    source: &'static str,
    bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    depth_stencil: Option<wgpu::DepthStencilState>,
    blend: Option<wgpu::BlendState>,
}

fn create_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(spec.label),
        source: wgpu::ShaderSource::Wgsl(spec.source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(spec.label),
        bind_group_layouts: spec.bind_group_layouts,
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: spec.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: spec.depth_stencil,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: spec.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

pub struct SpherePipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl SpherePipeline {
    pub fn new(
        device: &wgpu::Device,
        camera: &CameraBinding,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let pipeline = create_pipeline(
            device,
            surface_format,
            PipelineSpec {
                label: "sphere-pipeline",
                source: SPHERE_SHADER_SOURCE,
                bind_group_layouts: &[&camera.layout],
                buffers: &[VertexPositionNormal::layout(), SphereInstance::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_stencil: Some(DepthBuffer::stencil_state(true)),
                blend: None,
            },
        );
        Self { pipeline }
    }
}

pub struct PointPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl PointPipeline {
    pub fn new(
        device: &wgpu::Device,
        camera: &CameraBinding,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let pipeline = create_pipeline(
            device,
            surface_format,
            PipelineSpec {
                label: "point-pipeline",
                source: POINT_SHADER_SOURCE,
                bind_group_layouts: &[&camera.layout],
                buffers: &[VertexPositionColor::layout()],
                topology: wgpu::PrimitiveTopology::PointList,
                depth_stencil: Some(DepthBuffer::stencil_state(true)),
                blend: None,
            },
        );
        Self { pipeline }
    }
}

pub struct OverlayPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl OverlayPipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let pipeline = create_pipeline(
            device,
            surface_format,
            PipelineSpec {
                label: "overlay-pipeline",
                source: OVERLAY_SHADER_SOURCE,
                bind_group_layouts: &[],
                buffers: &[OverlayVertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_stencil: None,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            },
        );
        Self { pipeline }
    }
}

pub const SPHERE_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) center_radius: vec4<f32>,
    @location(3) color_emissive: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color_emissive: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let world = vertex.position * instance.center_radius.w + instance.center_radius.xyz;
    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(world, 1.0);
    out.world_position = world;
    out.normal = vertex.normal;
    out.color_emissive = instance.color_emissive;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = in.color_emissive.rgb;
    if (in.color_emissive.a > 0.5) {
        return vec4<f32>(color, 1.0);
    }
    // Light comes from the sun at the origin.
    let to_sun = normalize(-in.world_position);
    let diffuse = max(dot(normalize(in.normal), to_sun), 0.0);
    return vec4<f32>(color * (0.25 + 0.75 * diffuse), 1.0);
}
"#;

pub const POINT_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

pub const OVERLAY_SHADER_SOURCE: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(in.position, 0.0, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_device::create_test_device;

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;

    #[test]
    fn test_camera_uniform_size() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }

    #[test]
    fn test_sphere_instance_layout() {
        assert_eq!(std::mem::size_of::<SphereInstance>(), 32);
        let layout = SphereInstance::layout();
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.attributes[0].shader_location, 2);
        assert_eq!(layout.attributes[1].shader_location, 3);
        assert_eq!(layout.attributes[1].offset, 16);
    }

    #[test]
    fn test_shaders_declare_entry_points() {
        for source in [
            SPHERE_SHADER_SOURCE,
            POINT_SHADER_SOURCE,
            OVERLAY_SHADER_SOURCE,
        ] {
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
        }
    }

    #[test]
    fn test_pipelines_create() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let camera = CameraBinding::new(&device);
        let _spheres = SpherePipeline::new(&device, &camera, FORMAT);
        let _points = PointPipeline::new(&device, &camera, FORMAT);
        let _overlay = OverlayPipeline::new(&device, FORMAT);
    }
}
