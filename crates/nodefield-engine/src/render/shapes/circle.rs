use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    InstanceBuffer, UnitQuad, ViewportBinding, instanced_quad_pipeline, resolve_fill,
};

/// Renderer for `DrawCmd::Circle`.
///
/// Supported paints:
/// - `Paint::Solid`
/// - `Paint::RadialGradient` (2-stop; first and last stop for longer gradients)
///
/// All circles of a draw list go out in one instanced draw, in list order.
#[derive(Default)]
pub struct CircleRenderer {
    gpu: Option<CircleGpu>,
    instances: Vec<CircleInstance>,
    warned_multi_stop: bool,
}

struct CircleGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    quad: UnitQuad,
    instances: InstanceBuffer<CircleInstance>,
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.instances.clear();
        for cmd in draw_list.items() {
            let DrawCmd::Circle(cmd) = cmd else { continue };
            if !(cmd.radius > 0.0) || !cmd.center.is_finite() {
                continue;
            }

            let fill = resolve_fill(&cmd.paint, &mut self.warned_multi_stop);
            self.instances.push(CircleInstance {
                center: [cmd.center.x, cmd.center.y],
                radii: [cmd.radius, fill.band[0], fill.band[1], 0.0],
                color0: fill.color0,
                color1: fill.color1,
            });
        }

        if self.instances.is_empty() {
            return;
        }

        let gpu = Self::ensure_gpu(&mut self.gpu, ctx);
        gpu.viewport.write(ctx.queue, ctx.viewport);
        let Some(instance_vbo) = gpu.instances.upload(ctx, &self.instances) else { return };

        let mut rpass = target.overlay_pass("nodefield circle pass");
        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &gpu.viewport.bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(gpu.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..self.instances.len() as u32);
    }

    fn ensure_gpu<'a>(slot: &'a mut Option<CircleGpu>, ctx: &RenderCtx<'_>) -> &'a mut CircleGpu {
        if slot.as_ref().is_some_and(|g| g.format != ctx.surface_format) {
            *slot = None;
        }

        slot.get_or_insert_with(|| {
            let viewport = ViewportBinding::new(ctx.device, "nodefield circle viewport");
            let pipeline = instanced_quad_pipeline(
                ctx,
                "nodefield circle pipeline",
                include_str!("shaders/circle.wgsl"),
                &viewport.layout,
                CircleInstance::layout(),
            );
            CircleGpu {
                format: ctx.surface_format,
                pipeline,
                viewport,
                quad: UnitQuad::new(ctx.device, "nodefield circle quad"),
                instances: InstanceBuffer::new("nodefield circle instances"),
            }
        })
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (56 bytes):
///
///  offset  0  center  [f32; 2]   loc 1
///  offset  8  radii   [f32; 4]   loc 2  (.x = radius, .y/.z = gradient band, .w unused)
///  offset 24  color0  [f32; 4]   loc 3
///  offset 40  color1  [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radii: [f32; 4],
    color0: [f32; 4],
    color1: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x4, // radii
        3 => Float32x4, // color0
        4 => Float32x4  // color1
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
