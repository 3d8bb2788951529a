use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::device::DEPTH_FORMAT;
use crate::shader::ShaderError;

use super::{
    BufferHandle, BufferUsage, DrawCall, DrawPass, GraphicsBackend, ProgramDesc, ProgramHandle,
    RenderCtx, RenderTarget, Topology, VertexAttribute,
};

/// Size of a `mat4x4<f32>` uniform.
const MAT4_SIZE: u64 = std::mem::size_of::<glam::Mat4>() as u64;

/// Device resources that outlive individual frames.
///
/// Owned by the application; a [`WgpuBackend`] borrows it for setup and for
/// each frame. Handles index into these vectors.
#[derive(Default)]
pub struct GpuResources {
    buffers: Vec<wgpu::Buffer>,
    programs: Vec<GpuProgram>,
}

impl GpuResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }
}

struct GpuProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: Option<wgpu::BindGroup>,
    /// `(binding, buffer)` per mat4 uniform.
    uniform_buffers: Vec<(u32, wgpu::Buffer)>,
    /// Vertex-buffer slot order.
    attributes: Vec<VertexAttribute>,
    topology: Topology,
}

/// [`GraphicsBackend`] over a wgpu device.
///
/// Built without a render target during setup (resource creation only) and
/// with one for each frame.
pub struct WgpuBackend<'a> {
    ctx: RenderCtx<'a>,
    target: Option<RenderTarget<'a>>,
    resources: &'a mut GpuResources,
}

impl<'a> WgpuBackend<'a> {
    /// Backend for resource creation; `submit` is a no-op.
    pub fn setup(ctx: RenderCtx<'a>, resources: &'a mut GpuResources) -> Self {
        Self {
            ctx,
            target: None,
            resources,
        }
    }

    /// Backend recording into `target`.
    pub fn frame(ctx: RenderCtx<'a>, target: RenderTarget<'a>, resources: &'a mut GpuResources) -> Self {
        Self {
            ctx,
            target: Some(target),
            resources,
        }
    }
}

impl GraphicsBackend for WgpuBackend<'_> {
    fn create_buffer(&mut self, label: &str, usage: BufferUsage, contents: &[u8]) -> BufferHandle {
        let usage = match usage {
            BufferUsage::Vertex => wgpu::BufferUsages::VERTEX,
            BufferUsage::Index => wgpu::BufferUsages::INDEX,
        };

        let buffer = self.ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        });

        let handle = BufferHandle(self.resources.buffers.len() as u32);
        self.resources.buffers.push(buffer);
        log::debug!("buffer `{label}` ({} bytes) -> {handle:?}", contents.len());
        handle
    }

    fn create_program(&mut self, desc: &ProgramDesc<'_>) -> Result<ProgramHandle, ShaderError> {
        let program = desc.program;
        let label = program.label();
        let device = self.ctx.device;

        if let Some(u) = program.uniforms().iter().find(|u| !u.is_mat4) {
            return Err(ShaderError::unsupported(
                label,
                format!("uniform `{}` is not a mat4x4<f32>", u.name),
            ));
        }

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(program.vertex().label()),
            source: wgpu::ShaderSource::Wgsl(program.vertex().source().into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(program.fragment().label()),
            source: wgpu::ShaderSource::Wgsl(program.fragment().source().into()),
        });

        let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = program
            .uniforms()
            .iter()
            .map(|u| {
                let mut visibility = wgpu::ShaderStages::NONE;
                if u.vertex {
                    visibility |= wgpu::ShaderStages::VERTEX;
                }
                if u.fragment {
                    visibility |= wgpu::ShaderStages::FRAGMENT;
                }
                wgpu::BindGroupLayoutEntry {
                    binding: u.binding,
                    visibility,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(MAT4_SIZE),
                    },
                    count: None,
                }
            })
            .collect();

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &layout_entries,
        });

        let uniform_buffers: Vec<(u32, wgpu::Buffer)> = program
            .uniforms()
            .iter()
            .map(|u| {
                let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(u.name.as_str()),
                    size: MAT4_SIZE,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                (u.binding, buffer)
            })
            .collect();

        let bind_group = (!uniform_buffers.is_empty()).then(|| {
            let entries: Vec<wgpu::BindGroupEntry> = uniform_buffers
                .iter()
                .map(|(binding, buffer)| wgpu::BindGroupEntry {
                    binding: *binding,
                    resource: buffer.as_entire_binding(),
                })
                .collect();
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &entries,
            })
        });

        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = if bind_group.is_some() {
            vec![&bind_group_layout]
        } else {
            Vec::new()
        };
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &bind_group_layouts,
            immediate_size: 0,
        });

        // One non-interleaved buffer per attribute, offset applied when binding.
        let attribute_storage: Vec<[wgpu::VertexAttribute; 1]> = desc
            .attributes
            .iter()
            .map(|a| {
                [wgpu::VertexAttribute {
                    format: a.format.to_wgpu(),
                    offset: 0,
                    shader_location: a.location,
                }]
            })
            .collect();
        let buffer_layouts: Vec<wgpu::VertexBufferLayout> = desc
            .attributes
            .iter()
            .zip(&attribute_storage)
            .map(|(a, attrs)| wgpu::VertexBufferLayout {
                array_stride: a.effective_stride(),
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: attrs,
            })
            .collect();

        let depth_compare = if desc.depth_test {
            wgpu::CompareFunction::LessEqual
        } else {
            wgpu::CompareFunction::Always
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(program.vertex().entry_point()),
                compilation_options: Default::default(),
                buffers: &buffer_layouts,
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(program.fragment().entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: desc.topology.to_wgpu(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: desc.depth_test,
                depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        let handle = ProgramHandle(self.resources.programs.len() as u32);
        self.resources.programs.push(GpuProgram {
            pipeline,
            bind_group,
            uniform_buffers,
            attributes: desc.attributes.to_vec(),
            topology: desc.topology,
        });

        log::debug!("program `{label}` -> {handle:?}");
        Ok(handle)
    }

    fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    fn submit(&mut self, pass: &DrawPass) {
        let Some(target) = self.target.as_mut() else {
            log::warn!("draw pass submitted outside of a frame; ignored");
            return;
        };
        let resources = &*self.resources;

        let Some(program) = resources.programs.get(pass.program.index()) else {
            log::warn!("unknown program {:?}; pass skipped", pass.program);
            return;
        };
        if program.topology != pass.topology {
            log::warn!(
                "pass topology {:?} does not match program topology {:?}; pass skipped",
                pass.topology,
                program.topology
            );
            return;
        }

        // All handles resolve before recording; any bad one skips the pass.
        let mut vertex_buffers = Vec::with_capacity(pass.attributes.len());
        for binding in &pass.attributes {
            let Some(slot) = program
                .attributes
                .iter()
                .position(|a| a.location == binding.attribute.location)
            else {
                log::warn!("location {} is not part of the program layout", binding.attribute.location);
                return;
            };
            let Some(buffer) = resources.buffers.get(binding.buffer.index()) else {
                log::warn!("unknown buffer {:?}; pass skipped", binding.buffer);
                return;
            };
            vertex_buffers.push((slot as u32, buffer.slice(binding.attribute.offset..)));
        }

        let index_buffer = match pass.draw {
            DrawCall::Indexed { index_buffer, format, .. } => {
                let Some(buffer) = resources.buffers.get(index_buffer.index()) else {
                    log::warn!("unknown index buffer {index_buffer:?}; pass skipped");
                    return;
                };
                Some((buffer, format))
            }
            DrawCall::Arrays { .. } => None,
        };

        for upload in &pass.uniforms {
            match program.uniform_buffers.iter().find(|(b, _)| *b == upload.binding) {
                Some((_, buffer)) => {
                    self.ctx
                        .queue
                        .write_buffer(buffer, 0, bytemuck::bytes_of(&upload.value));
                }
                None => log::warn!("no uniform at binding {}", upload.binding),
            }
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism draw pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(pass.clear_color.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(pass.clear_depth),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&program.pipeline);
        if let Some(bind_group) = &program.bind_group {
            rpass.set_bind_group(0, bind_group, &[]);
        }
        for (slot, slice) in vertex_buffers {
            rpass.set_vertex_buffer(slot, slice);
        }

        match (pass.draw, index_buffer) {
            (DrawCall::Indexed { count, .. }, Some((buffer, format))) => {
                rpass.set_index_buffer(buffer.slice(..), format.to_wgpu());
                rpass.draw_indexed(0..count, 0, 0..1);
            }
            (DrawCall::Arrays { first, count }, _) => {
                rpass.draw(first..first + count, 0..1);
            }
            (DrawCall::Indexed { .. }, None) => {}
        }
    }
}
