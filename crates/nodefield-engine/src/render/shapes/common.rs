//! Shared GPU types and utilities used by the shape renderers.

use std::marker::PhantomData;

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::paint::Paint;
use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

/// Viewport UBO + its bind group (group 0, binding 0, vertex stage).
pub(super) struct ViewportBinding {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,
}

impl ViewportBinding {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ViewportUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        Self { layout, bind_group, ubo }
    }

    pub fn write(&self, queue: &wgpu::Queue, viewport: Viewport) {
        queue.write_buffer(
            &self.ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
                _pad: [0.0; 2],
            }),
        );
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex + index buffers shared by instanced renderers.
pub(super) struct UnitQuad {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl UnitQuad {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        use wgpu::util::DeviceExt;

        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable per-instance vertex buffer. Capacity only ever grows.
pub(super) struct InstanceBuffer<T> {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            buffer: None,
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Uploads `instances`, reallocating when they do not fit.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, instances: &[T]) -> Option<&wgpu::Buffer> {
        if instances.len() > self.capacity || self.buffer.is_none() {
            let cap = instances.len().next_power_of_two().max(64);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = cap;
        }

        let buffer = self.buffer.as_ref()?;
        ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(instances));
        Some(buffer)
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Alpha-blended triangle-list pipeline over `QuadVertex` + one instance layout.
pub(super) fn instanced_quad_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader_src: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

// ── paint resolution ──────────────────────────────────────────────────────

/// Flattened fill for the circle shader.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct ResolvedFill {
    pub color0: [f32; 4],
    pub color1: [f32; 4],
    /// Gradient band `[inner, outer]` as distances from the circle center.
    pub band: [f32; 2],
}

/// Converts a `Paint` to the two-color radial form the circle shader understands.
///
/// Solid fills repeat the color across a unit band. Gradients whose center
/// differs from the circle center are drawn as if concentric; gradients with
/// more than two stops use the first and last (one-time debug message).
pub(super) fn resolve_fill(paint: &Paint, warned_multi_stop: &mut bool) -> ResolvedFill {
    match paint {
        Paint::Solid(c) => ResolvedFill {
            color0: c.to_array(),
            color1: c.to_array(),
            band: [0.0, 1.0],
        },
        Paint::RadialGradient(g) => {
            if g.stops.len() > 2 && !*warned_multi_stop {
                log::debug!("only 2-stop radial gradients supported; using first and last stop");
                *warned_multi_stop = true;
            }
            let (c0, c1) = g.edge_colors();
            ResolvedFill {
                color0: c0.to_array(),
                color1: c1.to_array(),
                band: [g.inner_radius.max(0.0), g.outer_radius.max(g.inner_radius)],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, ColorStop, RadialGradient};

    #[test]
    fn solid_resolves_to_flat_fill() {
        let c = Color::from_straight(0.2, 0.4, 0.6, 0.5);
        let mut warned = false;
        let f = resolve_fill(&Paint::solid(c), &mut warned);
        assert_eq!(f.color0, f.color1);
        assert_eq!(f.color0, c.to_array());
        assert!(!warned);
    }

    #[test]
    fn radial_uses_first_and_last_stop() {
        let a = Color::from_straight(1.0, 1.0, 1.0, 0.8);
        let b = Color::from_straight(1.0, 0.0, 0.0, 0.4);
        let g = RadialGradient::new(
            Vec2::zero(),
            1.0,
            6.0,
            vec![
                ColorStop::new(0.0, a),
                ColorStop::new(0.5, b),
                ColorStop::new(1.0, Color::transparent()),
            ],
        );
        let mut warned = false;
        let f = resolve_fill(&Paint::RadialGradient(g), &mut warned);

        assert_eq!(f.color0, a.to_array());
        assert_eq!(f.color1, [0.0; 4]);
        assert_eq!(f.band, [1.0, 6.0]);
        assert!(warned);
    }
}
