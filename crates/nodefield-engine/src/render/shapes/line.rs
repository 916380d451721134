use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{InstanceBuffer, UnitQuad, ViewportBinding, instanced_quad_pipeline};

/// Renderer for `DrawCmd::Line`.
///
/// Each segment is an oriented quad with butt caps and a one-pixel
/// anti-aliasing fringe, so sub-pixel widths fade instead of vanishing.
#[derive(Default)]
pub struct LineRenderer {
    gpu: Option<LineGpu>,
    instances: Vec<LineInstance>,
}

struct LineGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    quad: UnitQuad,
    instances: InstanceBuffer<LineInstance>,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.instances.clear();
        for cmd in draw_list.items() {
            let DrawCmd::Line(cmd) = cmd else { continue };
            if !(cmd.width > 0.0) || cmd.color.a <= 0.0 {
                continue;
            }
            if !cmd.from.is_finite() || !cmd.to.is_finite() {
                continue;
            }

            self.instances.push(LineInstance {
                endpoints: [cmd.from.x, cmd.from.y, cmd.to.x, cmd.to.y],
                width: [cmd.width, 0.0],
                color: cmd.color.to_array(),
            });
        }

        if self.instances.is_empty() {
            return;
        }

        let gpu = Self::ensure_gpu(&mut self.gpu, ctx);
        gpu.viewport.write(ctx.queue, ctx.viewport);
        let Some(instance_vbo) = gpu.instances.upload(ctx, &self.instances) else { return };

        let mut rpass = target.overlay_pass("nodefield line pass");
        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &gpu.viewport.bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(gpu.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..self.instances.len() as u32);
    }

    fn ensure_gpu<'a>(slot: &'a mut Option<LineGpu>, ctx: &RenderCtx<'_>) -> &'a mut LineGpu {
        if slot.as_ref().is_some_and(|g| g.format != ctx.surface_format) {
            *slot = None;
        }

        slot.get_or_insert_with(|| {
            let viewport = ViewportBinding::new(ctx.device, "nodefield line viewport");
            let pipeline = instanced_quad_pipeline(
                ctx,
                "nodefield line pipeline",
                include_str!("shaders/line.wgsl"),
                &viewport.layout,
                LineInstance::layout(),
            );
            LineGpu {
                format: ctx.surface_format,
                pipeline,
                viewport,
                quad: UnitQuad::new(ctx.device, "nodefield line quad"),
                instances: InstanceBuffer::new("nodefield line instances"),
            }
        })
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (40 bytes):
///
///  offset  0  endpoints [f32; 4]   loc 1  (.xy = from, .zw = to)
///  offset 16  width     [f32; 2]   loc 2  (.x = width, .y unused)
///  offset 24  color     [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    endpoints: [f32; 4],
    width: [f32; 2],
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x4, // endpoints
        2 => Float32x2, // width
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
