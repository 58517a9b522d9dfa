use std::num::NonZeroU64;

use aphrodite_common::{Mesh, Rgba8Image, TransformUniforms, Vertex};
use aphrodite_math::{Matrix4x4, Vector2, Vector4};
use wgpu::util::DeviceExt;

use crate::shaders;
use crate::{GpuContext, GpuTimer, RenderError};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const DEPTH_CLEAR: f32 = 0.0;
const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const MAX_ANISOTROPY: u16 = 16;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x2,
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// wgpu accepts clamps in `1..=16`; anything else is pulled into range.
fn clamp_anisotropy(anisotropy: u16) -> u16 {
    anisotropy.clamp(1, MAX_ANISOTROPY)
}

/// GPU copies of a [`Mesh`].
pub struct MeshBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
    pub index_count: u32,
}

struct DepthTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&Default::default());
        Self { texture, view }
    }
}

/// Textured, depth-tested pipeline drawing one indexed mesh per pass.
///
/// Owns the 512-byte transform uniform buffer: the PVM matrix at offset 0
/// (vertex stage) and the texture multiplier at offset 256 (fragment stage).
pub struct BasicRenderPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    transform_buffer: wgpu::Buffer,
    uniforms: TransformUniforms,
    depth: DepthTarget,
    timer: Option<GpuTimer>,
}

impl BasicRenderPipeline {
    pub fn new(ctx: &GpuContext) -> Self {
        let device = &ctx.device;
        let uniforms = TransformUniforms::default();
        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("transform_buffer"),
            contents: uniforms.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = |binding, visibility, size| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(size),
            },
            count: None,
        };
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("basic_bind_group_layout"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX, TransformUniforms::PVM_SIZE),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                uniform_entry(
                    3,
                    wgpu::ShaderStages::FRAGMENT,
                    TransformUniforms::MULTIPLIER_SIZE,
                ),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("basic_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("basic_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BASIC_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("basic_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::GreaterEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (width, height) = ctx.size();
        let depth = DepthTarget::new(device, width, height);
        let timer = ctx
            .timestamps
            .then(|| GpuTimer::new(device, &ctx.queue));

        tracing::debug!(width, height, timing = timer.is_some(), "basic pipeline created");

        Self {
            pipeline,
            bind_group_layout,
            transform_buffer,
            uniforms,
            depth,
            timer,
        }
    }

    /// Replaces the depth target. The old texture is destroyed first.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.texture.destroy();
        self.depth = DepthTarget::new(device, width, height);
    }

    pub fn set_pvm(&mut self, queue: &wgpu::Queue, pvm: &Matrix4x4) {
        self.uniforms.set_pvm(pvm);
        queue.write_buffer(
            &self.transform_buffer,
            TransformUniforms::PVM_OFFSET,
            self.uniforms.pvm_bytes(),
        );
    }

    pub fn set_texture_multiplier(&mut self, queue: &wgpu::Queue, multiplier: Vector2) {
        self.uniforms.set_texture_multiplier(multiplier);
        queue.write_buffer(
            &self.transform_buffer,
            TransformUniforms::MULTIPLIER_OFFSET,
            self.uniforms.multiplier_bytes(),
        );
    }

    pub fn create_mesh_buffers(&self, device: &wgpu::Device, mesh: &Mesh) -> MeshBuffers {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: mesh.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: mesh.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });
        tracing::debug!(
            vertices = mesh.vertices.len(),
            indices = mesh.indices.len(),
            "mesh buffers created"
        );
        MeshBuffers {
            vertex,
            index,
            index_count: mesh.index_count(),
        }
    }

    /// Uploads `levels` as a mipmapped texture; `levels[0]` is the base.
    pub fn create_texture(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        levels: &[Rgba8Image],
    ) -> Result<wgpu::Texture, RenderError> {
        let base = levels.first().ok_or(RenderError::EmptyMipChain)?;
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("mesh_texture"),
            size: wgpu::Extent3d {
                width: base.width,
                height: base.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, image) in levels.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &image.data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(image.bytes_per_row()),
                    rows_per_image: Some(image.height),
                },
                wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
            );
        }
        tracing::debug!(
            width = base.width,
            height = base.height,
            mips = levels.len(),
            "texture uploaded"
        );
        Ok(texture)
    }

    /// 2x2 checkerboard texture with its box-filtered mip chain.
    pub fn create_checkerboard_texture(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        light: Vector4,
        dark: Vector4,
    ) -> Result<wgpu::Texture, RenderError> {
        let levels = Rgba8Image::checkerboard(light, dark).mip_chain();
        self.create_texture(device, queue, &levels)
    }

    /// Repeating, trilinear sampler with the given anisotropy clamp.
    pub fn create_default_sampler(&self, device: &wgpu::Device, anisotropy: u16) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("default_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            anisotropy_clamp: clamp_anisotropy(anisotropy),
            ..Default::default()
        })
    }

    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        texture: &wgpu::Texture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        let view = texture.create_view(&Default::default());
        let uniform = |offset, size| {
            wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &self.transform_buffer,
                offset,
                size: NonZeroU64::new(size),
            })
        };
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("basic_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform(TransformUniforms::PVM_OFFSET, TransformUniforms::PVM_SIZE),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: uniform(
                        TransformUniforms::MULTIPLIER_OFFSET,
                        TransformUniforms::MULTIPLIER_SIZE,
                    ),
                },
            ],
        })
    }

    /// Clears `target` to `clear` and draws `mesh`. Returns the render pass
    /// time in milliseconds when a timestamp readback completed this frame.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        clear: Vector4,
        mesh: &MeshBuffers,
        bind_group: &wgpu::BindGroup,
    ) -> Option<f64> {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("basic_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("basic_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(clear.r()),
                            g: f64::from(clear.g()),
                            b: f64::from(clear.b()),
                            a: f64::from(clear.a()),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DEPTH_CLEAR),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: self.timer.as_ref().map(GpuTimer::pass_writes),
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.vertex.slice(..));
            pass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }

        if let Some(timer) = &mut self.timer {
            timer.resolve(&mut encoder);
        }
        queue.submit(std::iter::once(encoder.finish()));

        let timer = self.timer.as_mut()?;
        timer.request_readback();
        timer.poll(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_vertex_struct() {
        let layout = vertex_layout();
        assert_eq!(layout.array_stride, 32);
        let offsets: Vec<_> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(
            offsets,
            vec![
                std::mem::offset_of!(Vertex, position) as u64,
                std::mem::offset_of!(Vertex, normal) as u64,
                std::mem::offset_of!(Vertex, uv) as u64,
            ]
        );
        let locations: Vec<_> = layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1, 2]);
        assert_eq!(layout.attributes[2].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn anisotropy_is_clamped() {
        assert_eq!(clamp_anisotropy(0), 1);
        assert_eq!(clamp_anisotropy(8), 8);
        assert_eq!(clamp_anisotropy(64), 16);
    }

    #[test]
    fn multiplier_binding_is_offset_aligned() {
        let min_alignment = u64::from(wgpu::Limits::default().min_uniform_buffer_offset_alignment);
        assert_eq!(TransformUniforms::MULTIPLIER_OFFSET % min_alignment, 0);
        assert!(TransformUniforms::MULTIPLIER_OFFSET >= TransformUniforms::PVM_SIZE);
    }

    #[test]
    fn shader_declares_entry_points_and_bindings() {
        for needle in ["fn vs_main", "fn fs_main", "@binding(0)", "@binding(3)"] {
            assert!(shaders::BASIC_SHADER.contains(needle), "missing {needle}");
        }
    }
}
