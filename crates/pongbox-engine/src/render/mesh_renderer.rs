use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::device::DEPTH_FORMAT;

use super::texture::upload_texture;
use super::{
    DrawRecorder, DrawUniforms, Fill, MeshData, MeshId, ProgramBindings, ProgramInterface,
    RenderCtx, RenderTarget, TextureId, TextureImage, Topology, Vertex,
};

/// Interface of `shaders/mesh.wgsl`.
pub const MESH_PROGRAM: ProgramInterface = ProgramInterface {
    label: "mesh.wgsl",
    attributes: &[
        ("vertexPosition", 0),
        ("vertexColor", 1),
        ("vertexNormal", 2),
        ("vertexTextureCoord", 3),
    ],
    uniforms: &[
        "modelViewMatrix",
        "projectionMatrix",
        "normalMatrix",
        "textureMatrix",
        "lightPosition",
        "lightColor",
        "enableTexture",
        "enableLighting",
        "sampler",
    ],
};

/// Texel used until a texture's image has been delivered.
const PLACEHOLDER_RGBA: [u8; 4] = [0, 0, 0, 255];

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
    topology: Topology,
}

struct TextureEntry {
    label: String,
    /// Image waiting to be uploaded on the next frame.
    pending: Option<TextureImage>,
    bind_group: Option<wgpu::BindGroup>,
}

/// Replays a [`DrawRecorder`] on the GPU.
///
/// Meshes and textures are registered up front on the CPU and uploaded lazily
/// the first time a device is available. Each recorded draw gets its own slot
/// in a dynamic-offset uniform buffer so all draws share one render pass.
pub struct MeshRenderer {
    bindings: ProgramBindings,
    recorder: DrawRecorder,
    clear_color: wgpu::Color,

    pipeline_format: Option<wgpu::TextureFormat>,
    triangle_pipeline: Option<wgpu::RenderPipeline>,
    line_pipeline: Option<wgpu::RenderPipeline>,

    uniform_layout: Option<wgpu::BindGroupLayout>,
    texture_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    uniform_ubo: Option<wgpu::Buffer>,
    uniform_bind_group: Option<wgpu::BindGroup>,
    uniform_capacity: usize,
    uniform_stride: u64,

    pending_meshes: Vec<MeshData>,
    meshes: Vec<GpuMesh>,
    textures: Vec<TextureEntry>,
    placeholder: Option<wgpu::BindGroup>,

    warned_missing_mesh: bool,
}

impl MeshRenderer {
    /// Creates a renderer for the mesh program, resolving its bindings.
    pub fn new() -> Self {
        let bindings = ProgramBindings::resolve(&MESH_PROGRAM);
        Self {
            recorder: DrawRecorder::new(bindings.clone()),
            bindings,
            clear_color: wgpu::Color::BLACK,
            pipeline_format: None,
            triangle_pipeline: None,
            line_pipeline: None,
            uniform_layout: None,
            texture_layout: None,
            sampler: None,
            uniform_ubo: None,
            uniform_bind_group: None,
            uniform_capacity: 0,
            uniform_stride: 0,
            pending_meshes: Vec::new(),
            meshes: Vec::new(),
            textures: Vec::new(),
            placeholder: None,
            warned_missing_mesh: false,
        }
    }

    /// Straight RGBA used when a frame requests a clear.
    pub fn with_clear_color(mut self, [r, g, b, a]: [f64; 4]) -> Self {
        self.clear_color = wgpu::Color { r, g, b, a };
        self
    }

    /// Registers a mesh. Upload happens on the first rendered frame.
    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        debug_assert!(mesh.is_well_formed(), "mesh `{}` is malformed", mesh.label);
        let id = MeshId((self.meshes.len() + self.pending_meshes.len()) as u32);
        self.pending_meshes.push(mesh);
        id
    }

    /// Registers a texture that samples as the placeholder until
    /// [`set_texture_image`](Self::set_texture_image) delivers its contents.
    pub fn add_texture(&mut self, label: impl Into<String>) -> TextureId {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(TextureEntry {
            label: label.into(),
            pending: None,
            bind_group: None,
        });
        id
    }

    /// Replaces the contents of `id`; takes effect on the next frame.
    pub fn set_texture_image(&mut self, id: TextureId, image: TextureImage) {
        match self.textures.get_mut(id.0 as usize) {
            Some(entry) => entry.pending = Some(image),
            None => log::warn!("image delivered for unknown texture {id:?}"),
        }
    }

    /// Starts recording a frame.
    pub fn begin_frame(&mut self, aspect_ratio: f32) -> &mut DrawRecorder {
        self.recorder.begin_frame(aspect_ratio);
        &mut self.recorder
    }

    pub fn recorder(&self) -> &DrawRecorder {
        &self.recorder
    }

    /// Executes the draws recorded since [`begin_frame`](Self::begin_frame).
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipelines(ctx);
        self.ensure_sampler(ctx);
        self.ensure_meshes(ctx);
        self.ensure_textures(ctx);

        let draw_count = self.recorder.draws().len();
        self.ensure_uniform_capacity(ctx, draw_count.max(1));
        self.write_uniforms(ctx);

        let (color_load, depth_load) = if self.recorder.cleared() {
            (wgpu::LoadOp::Clear(self.clear_color), wgpu::LoadOp::Clear(1.0))
        } else {
            (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pongbox mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(uniform_bind_group) = self.uniform_bind_group.as_ref() else { return };
        let Some(placeholder) = self.placeholder.as_ref() else { return };

        for (i, draw) in self.recorder.draws().iter().enumerate() {
            let Some(mesh) = self.meshes.get(draw.mesh.0 as usize) else {
                if !self.warned_missing_mesh {
                    log::warn!("draw references unregistered mesh {:?}; skipped", draw.mesh);
                    self.warned_missing_mesh = true;
                }
                continue;
            };

            let pipeline = match mesh.topology {
                Topology::Triangles => self.triangle_pipeline.as_ref(),
                Topology::Lines => self.line_pipeline.as_ref(),
            };
            let Some(pipeline) = pipeline else { continue };

            // Flat fills never sample, but the layout still needs a texture group.
            let texture_group = match draw.fill {
                Fill::Flat(_) => None,
                Fill::Shaded => draw
                    .texture()
                    .and_then(|t| self.textures.get(t.0 as usize))
                    .and_then(|t| t.bind_group.as_ref()),
            }
            .unwrap_or(placeholder);

            let offset = (i as u64 * self.uniform_stride) as wgpu::DynamicOffset;
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, uniform_bind_group, &[offset]);
            rpass.set_bind_group(1, texture_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.triangle_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pongbox mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let uniform_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("pongbox mesh uniform bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: true,
                            min_binding_size: Some(draw_uniforms_size()),
                        },
                        count: None,
                    }],
                });

        let texture_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("pongbox mesh texture bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("pongbox mesh pipeline layout"),
                    bind_group_layouts: &[&uniform_layout, &texture_layout],
                    immediate_size: 0,
                });

        let attributes = Vertex::attributes(&self.bindings);
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        };

        let make_pipeline = |label: &str, topology: wgpu::PrimitiveTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout.clone()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Arena panels are viewed from the inside.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let triangle_pipeline =
            make_pipeline("pongbox mesh pipeline", wgpu::PrimitiveTopology::TriangleList);
        let line_pipeline =
            make_pipeline("pongbox wire pipeline", wgpu::PrimitiveTopology::LineList);

        self.pipeline_format = Some(ctx.surface_format);
        self.triangle_pipeline = Some(triangle_pipeline);
        self.line_pipeline = Some(line_pipeline);
        self.uniform_layout = Some(uniform_layout);
        self.texture_layout = Some(texture_layout);

        // Bind groups belong to the old layouts.
        self.uniform_ubo = None;
        self.uniform_bind_group = None;
        self.uniform_capacity = 0;
        self.placeholder = None;
        for entry in &mut self.textures {
            entry.bind_group = None;
        }

        log::debug!("mesh pipelines built for {:?}", ctx.surface_format);
    }

    /// Linear magnification and minification, nearest mip selection.
    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("pongbox texture sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>) {
        for mesh in self.pending_meshes.drain(..) {
            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(mesh.label),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            // Index buffer sizes must be 4-byte aligned; pad odd u16 counts.
            let mut indices = mesh.indices.clone();
            if indices.len() % 2 == 1 {
                indices.push(0);
            }
            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(mesh.label),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            self.meshes.push(GpuMesh {
                vbo,
                ibo,
                index_count: mesh.indices.len() as u32,
                topology: mesh.topology,
            });
        }
    }

    fn ensure_textures(&mut self, ctx: &RenderCtx<'_>) {
        let Some(layout) = self.texture_layout.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let make_group = |view: &wgpu::TextureView, label: &str| {
            ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            })
        };

        if self.placeholder.is_none() {
            let image = TextureImage::solid(PLACEHOLDER_RGBA);
            match upload_texture(ctx.device, ctx.queue, &image, "pongbox placeholder texture") {
                Ok(view) => self.placeholder = Some(make_group(&view, "pongbox placeholder")),
                Err(e) => log::error!("failed to create placeholder texture: {e:#}"),
            }
        }

        for entry in &mut self.textures {
            if let Some(image) = entry.pending.take() {
                match upload_texture(ctx.device, ctx.queue, &image, &entry.label) {
                    Ok(view) => {
                        entry.bind_group = Some(make_group(&view, &entry.label));
                        log::debug!(
                            "texture `{}` uploaded ({}x{}, {} mips)",
                            entry.label,
                            image.width,
                            image.height,
                            image.mip_level_count()
                        );
                    }
                    // Keep sampling whatever was bound before.
                    Err(e) => log::warn!("texture `{}` not uploaded: {e:#}", entry.label),
                }
            }
        }
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.uniform_capacity && self.uniform_bind_group.is_some() {
            return;
        }
        let Some(layout) = self.uniform_layout.as_ref() else { return };

        let align = u64::from(ctx.device.limits().min_uniform_buffer_offset_alignment);
        let stride = (std::mem::size_of::<DrawUniforms>() as u64).div_ceil(align) * align;
        let new_cap = required.next_power_of_two().max(16);

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pongbox draw uniforms"),
            size: stride * new_cap as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pongbox draw uniforms bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: Some(draw_uniforms_size()),
                }),
            }],
        });

        self.uniform_ubo = Some(ubo);
        self.uniform_bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
        self.uniform_stride = stride;
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let draws = self.recorder.draws();
        if draws.is_empty() {
            return;
        }

        let stride = self.uniform_stride as usize;
        let mut bytes = vec![0u8; stride * draws.len()];
        for (chunk, draw) in bytes.chunks_exact_mut(stride).zip(draws) {
            let flat = match draw.fill {
                Fill::Flat(color) => Some(color),
                Fill::Shaded => None,
            };
            let block = draw.state.to_gpu(flat);
            chunk[..std::mem::size_of::<DrawUniforms>()].copy_from_slice(bytemuck::bytes_of(&block));
        }
        ctx.queue.write_buffer(ubo, 0, &bytes);
    }
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `DrawUniforms` is a fixed, non-empty block.
fn draw_uniforms_size() -> NonZeroU64 {
    NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64)
        .unwrap_or(NonZeroU64::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderContext, Vertex};

    fn tri() -> MeshData {
        let mut m = MeshData::new("tri", Topology::Triangles);
        for _ in 0..3 {
            m.push_vertex(Vertex::default());
        }
        m.indices = vec![0, 1, 2];
        m
    }

    #[test]
    fn ids_are_assigned_in_registration_order() {
        let mut r = MeshRenderer::new();
        assert_eq!(r.add_mesh(tri()), MeshId(0));
        assert_eq!(r.add_mesh(tri()), MeshId(1));
        assert_eq!(r.add_texture("walls"), TextureId(0));
        assert_eq!(r.add_texture("paddles"), TextureId(1));
    }

    #[test]
    fn late_image_is_queued_for_upload() {
        let mut r = MeshRenderer::new();
        let t = r.add_texture("walls");
        r.set_texture_image(t, TextureImage::solid([255, 0, 0, 255]));
        assert!(r.textures[0].pending.is_some());

        // Unknown ids are ignored.
        r.set_texture_image(TextureId(9), TextureImage::solid([0; 4]));
    }

    #[test]
    fn begin_frame_resets_recording() {
        let mut r = MeshRenderer::new();
        let mesh = r.add_mesh(tri());
        let rec = r.begin_frame(2.0);
        rec.clear();
        rec.draw_mesh(mesh, Fill::Shaded);
        assert_eq!(r.recorder().draws().len(), 1);

        r.begin_frame(2.0);
        assert!(r.recorder().draws().is_empty());
    }
}
