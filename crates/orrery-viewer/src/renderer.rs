//! GPU resources for drawing the orbital scene and its overlay.

use orrery_render::{
    BufferAllocator, Camera, CameraBinding, DepthBuffer, FrameEncoder, IndexData, InstanceBuffer,
    MeshBuffer, OverlayPipeline, OverlayVertex, PointPipeline, RenderContext, RenderPassBuilder,
    SpherePipeline, SurfaceError,
};
use orrery_scene::{DEFAULT_SUBDIVISIONS, Scene, icosphere};
use tracing::{debug, info};

use crate::overlay::TextLabel;
use crate::text::TextLayer;

/// Everything the renderer needs for one frame. Borrowed, never retained.
pub struct FrameSnapshot<'a> {
    pub camera: &'a Camera,
    /// `None` while loading or after a failure: only the overlay is drawn.
    pub scene: Option<&'a Scene>,
    pub clear_color: wgpu::Color,
    pub overlay: &'a [OverlayVertex],
    pub labels: &'a [TextLabel],
}

struct StarBuffer {
    buffer: wgpu::Buffer,
    count: u32,
    generation: u64,
}

pub struct SceneRenderer {
    camera: CameraBinding,
    sphere_pipeline: SpherePipeline,
    point_pipeline: PointPipeline,
    overlay_pipeline: OverlayPipeline,
    depth: DepthBuffer,
    sphere_mesh: MeshBuffer,
    stars: Option<StarBuffer>,
    sphere_instances: InstanceBuffer,
    overlay_vertices: InstanceBuffer,
    text: TextLayer,
}

impl SceneRenderer {
    pub fn new(ctx: &RenderContext) -> Self {
        let device = &ctx.device;
        let (width, height) = ctx.size();

        let camera = CameraBinding::new(device);
        let sphere_pipeline = SpherePipeline::new(device, &camera, ctx.surface_format);
        let point_pipeline = PointPipeline::new(device, &camera, ctx.surface_format);
        let overlay_pipeline = OverlayPipeline::new(device, ctx.surface_format);
        let text = TextLayer::new(device, &ctx.queue, ctx.surface_format);

        let mesh = icosphere(DEFAULT_SUBDIVISIONS);
        let sphere_mesh = BufferAllocator::new(device).create_mesh(
            "sphere-mesh",
            bytemuck::cast_slice(&mesh.vertices),
            IndexData::U32(&mesh.indices),
        );
        info!(
            "Sphere mesh: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );

        Self {
            camera,
            sphere_pipeline,
            point_pipeline,
            overlay_pipeline,
            depth: DepthBuffer::new(device, width, height),
            sphere_mesh,
            stars: None,
            sphere_instances: InstanceBuffer::new(
                device,
                "sphere-instances",
                wgpu::BufferUsages::VERTEX,
            ),
            overlay_vertices: InstanceBuffer::new(
                device,
                "overlay-vertices",
                wgpu::BufferUsages::VERTEX,
            ),
            text,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    /// Upload the scene's starfield unless this generation is already resident.
    pub fn upload_scene(&mut self, device: &wgpu::Device, scene: &Scene) {
        if self
            .stars
            .as_ref()
            .is_some_and(|stars| stars.generation == scene.generation())
        {
            return;
        }
        self.stars = None;

        let vertices = scene.star_vertices();
        if vertices.is_empty() {
            return;
        }
        let buffer = BufferAllocator::new(device)
            .create_vertex_buffer("starfield", bytemuck::cast_slice(&vertices));
        debug!(
            "Uploaded {} stars for scene generation {}",
            vertices.len(),
            scene.generation()
        );
        self.stars = Some(StarBuffer {
            buffer,
            count: vertices.len() as u32,
            generation: scene.generation(),
        });
    }

    /// Drop GPU data belonging to the current scene.
    pub fn release_scene(&mut self) {
        self.stars = None;
    }

    /// Draw one frame: the scene with depth, then the overlay on top.
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        frame: &FrameSnapshot<'_>,
    ) -> Result<(), SurfaceError> {
        let surface_texture = ctx.get_current_texture()?;

        self.camera.update(&ctx.queue, frame.camera);
        let instances = frame.scene.map(Scene::sphere_instances).unwrap_or_default();
        self.sphere_instances
            .write(&ctx.device, &ctx.queue, &instances);
        self.overlay_vertices
            .write(&ctx.device, &ctx.queue, frame.overlay);
        self.text.prepare(&ctx.device, &ctx.queue, ctx.size(), frame.labels);

        let mut encoder = FrameEncoder::new(&ctx.device, surface_texture);
        {
            let builder = RenderPassBuilder::new()
                .clear_color(frame.clear_color)
                .depth(&self.depth.view)
                .label("scene-pass");
            let mut pass = encoder.begin_render_pass(&builder);
            pass.set_bind_group(0, &self.camera.bind_group, &[]);

            if frame.scene.is_some()
                && let Some(stars) = &self.stars
            {
                pass.set_pipeline(&self.point_pipeline.pipeline);
                pass.set_vertex_buffer(0, stars.buffer.slice(..));
                pass.draw(0..stars.count, 0..1);
            }

            if !self.sphere_instances.is_empty() {
                pass.set_pipeline(&self.sphere_pipeline.pipeline);
                self.sphere_mesh.bind(&mut pass);
                pass.set_vertex_buffer(1, self.sphere_instances.slice());
                self.sphere_mesh
                    .draw_instanced(&mut pass, self.sphere_instances.len());
            }
        }

        if !self.overlay_vertices.is_empty() || !self.text.is_empty() {
            let builder = RenderPassBuilder::new()
                .load_existing()
                .label("overlay-pass");
            let mut pass = encoder.begin_render_pass(&builder);
            if !self.overlay_vertices.is_empty() {
                pass.set_pipeline(&self.overlay_pipeline.pipeline);
                pass.set_vertex_buffer(0, self.overlay_vertices.slice());
                pass.draw(0..self.overlay_vertices.len(), 0..1);
            }
            // Text goes over the panel quads.
            self.text.render(&mut pass);
        }

        encoder.submit(&ctx.queue);
        self.text.trim();
        Ok(())
    }
}
