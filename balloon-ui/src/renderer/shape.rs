//! GPU renderer for tessellated shapes

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPass, RenderPipeline, TextureFormat,
};

use crate::shape::{Shape, ShapeVertex};
use crate::transform::Affine;

/// Uniforms for shape rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ShapeUniforms {
    /// Linear part of the local-to-pixel matrix [a, b, c, d]
    linear: [f32; 4],
    /// [tx, ty, opacity, 0]
    offset: [f32; 4],
    /// Viewport size [width, height, 0, 0]
    viewport: [f32; 4],
}

impl ShapeUniforms {
    fn new(affine: &Affine, opacity: f32, viewport: [f32; 2]) -> Self {
        let (linear, [tx, ty]) = affine.to_columns();
        Self {
            linear,
            offset: [tx, ty, opacity, 0.0],
            viewport: [viewport[0], viewport[1], 0.0, 0.0],
        }
    }
}

/// Vertex and index buffers of the shape currently uploaded
struct Mesh {
    vertices: Buffer,
    indices: Buffer,
    index_count: u32,
}

/// Draws one [`Shape`] with a transform and an opacity
pub struct ShapeRenderer {
    pipeline: RenderPipeline,
    uniforms: Buffer,
    bind_group: BindGroup,
    mesh: Option<Mesh>,
}

impl ShapeRenderer {
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("balloon shape uniforms"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(UNIFORMS_SIZE),
                },
                count: None,
            }],
        });

        // one uniform block per renderer, rewritten on every prepare
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("balloon shape uniforms"),
            size: UNIFORMS_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("balloon shape uniforms"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });

        Self {
            pipeline: create_pipeline(device, format, &layout),
            uniforms,
            bind_group,
            mesh: None,
        }
    }

    /// Upload a shape placed by `affine` (local coordinates to pixels)
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        shape: &Shape,
        affine: &Affine,
        opacity: f32,
        viewport: [f32; 2],
    ) {
        let block = ShapeUniforms::new(affine, opacity, viewport);
        queue.write_buffer(&self.uniforms, 0, bytemuck::bytes_of(&block));

        let upload = |label, contents: &[u8], usage| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
        };
        self.mesh = Some(Mesh {
            vertices: upload(
                "balloon shape vertices",
                bytemuck::cast_slice(shape.vertices()),
                wgpu::BufferUsages::VERTEX,
            ),
            indices: upload(
                "balloon shape indices",
                bytemuck::cast_slice(shape.indices()),
                wgpu::BufferUsages::INDEX,
            ),
            index_count: shape.indices().len() as u32,
        });
    }

    /// Drop the prepared shape so nothing is drawn
    pub fn clear(&mut self) {
        self.mesh = None;
    }

    pub fn render<'a>(&'a self, render_pass: &mut RenderPass<'a>) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertices.slice(..));
        render_pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

const UNIFORMS_SIZE: u64 = std::mem::size_of::<ShapeUniforms>() as u64;

fn create_pipeline(device: &Device, format: TextureFormat, layout: &BindGroupLayout) -> RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("balloon shape shader"),
        source: wgpu::ShaderSource::Wgsl(SHAPE_SHADER.into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("balloon shape pipeline"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });
    let targets = [Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    })];

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("balloon shape pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[ShapeVertex::desc()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &targets,
        }),
        // triangle list, no culling: pins wind either way
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

const SHAPE_SHADER: &str = r#"
struct Uniforms {
    linear: vec4<f32>,    // a, b, c, d
    offset: vec4<f32>,    // tx, ty, opacity, 0
    viewport: vec4<f32>,  // width, height, 0, 0
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    let m = uniforms.linear;
    let world_pos = vec2<f32>(
        m.x * in.position.x + m.z * in.position.y + uniforms.offset.x,
        m.y * in.position.x + m.w * in.position.y + uniforms.offset.y,
    );

    // Convert to clip space (-1 to 1)
    let clip_x = (world_pos.x / uniforms.viewport.x) * 2.0 - 1.0;
    let clip_y = 1.0 - (world_pos.y / uniforms.viewport.y) * 2.0;

    out.clip_position = vec4<f32>(clip_x, clip_y, 0.0, 1.0);
    out.color = vec4<f32>(in.color.rgb, in.color.a * uniforms.offset.z);

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

    #[test]
    fn test_uniforms_pack_affine_and_opacity() {
        let affine = Affine::translation(30.0, 40.0);
        let block = ShapeUniforms::new(&affine, 0.25, [640.0, 480.0]);
        assert_eq!(block.linear, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(block.offset, [30.0, 40.0, 0.25, 0.0]);
        assert_eq!(block.viewport, [640.0, 480.0, 0.0, 0.0]);
        assert_eq!(UNIFORMS_SIZE, 48);
    }
}
