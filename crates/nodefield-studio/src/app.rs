use anyhow::{Context, Result};

use nodefield_engine::animation::{AnimationEngine, FrameRequest, FrameScheduler};
use nodefield_engine::coords::{Vec2, Viewport};
use nodefield_engine::core::{App, AppControl, FrameCtx};
use nodefield_engine::render::shapes::circle::CircleRenderer;
use nodefield_engine::render::shapes::line::LineRenderer;
use nodefield_engine::scene::DrawList;
use nodefield_engine::surface::Surface;

/// Frames between fps reports.
const FPS_LOG_INTERVAL: u64 = 600;

/// Runs the node field as a full-window background.
///
/// The engine records each frame into `draw_list`; the renderers then put
/// that list on screen.
pub struct NodefieldApp {
    engine: AnimationEngine,
    draw_list: DrawList,
    lines: LineRenderer,
    circles: CircleRenderer,
}

impl NodefieldApp {
    pub fn new(engine: AnimationEngine) -> Self {
        Self {
            engine,
            draw_list: DrawList::default(),
            lines: LineRenderer::new(),
            circles: CircleRenderer::new(),
        }
    }
}

impl App for NodefieldApp {
    fn on_surface_ready(
        &mut self,
        viewport: Option<Viewport>,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<()> {
        let surface: Option<&dyn Surface> = match viewport {
            Some(viewport) => {
                self.draw_list.set_viewport(viewport);
                Some(&self.draw_list)
            }
            None => None,
        };

        self.engine
            .surface_ready(surface, scheduler)
            .context("node field did not start")
    }

    fn on_resize(&mut self, viewport: Viewport, _scheduler: &mut dyn FrameScheduler) {
        self.draw_list.set_viewport(viewport);
        self.engine.resize(viewport);
    }

    fn on_pointer_moved(&mut self, pos: Vec2) {
        self.engine.set_pointer(pos);
    }

    fn on_stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.engine.stop(scheduler);
        log::info!("stopped after {} frames", self.engine.frame_count());
    }

    fn on_frame(&mut self, request: FrameRequest, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.engine.on_frame(request, &mut self.draw_list, &mut *ctx.scheduler) {
            return AppControl::Continue;
        }

        if ctx.time.frame_index % FPS_LOG_INTERVAL == 0 && ctx.time.fps > 0 {
            log::debug!(
                "{} fps, {} nodes, {} links",
                ctx.time.fps,
                self.engine.field().len(),
                self.engine.edges().len()
            );
        }

        let list = &self.draw_list;
        let lines = &mut self.lines;
        let circles = &mut self.circles;

        ctx.render(|rctx, target| {
            lines.render(rctx, target, list);
            circles.render(rctx, target, list);
        })
    }
}
