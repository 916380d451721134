use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::animation::{FrameRequest, FrameScheduler};
use crate::coords::Vec2;
use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx, logical_viewport};
use crate::device::{Gpu, GpuInit};
use crate::paint::Color;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Color the surface is cleared to before every frame.
    pub background: Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "nodefield".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            background: Color::from_srgb_u8(10, 10, 20, 255),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it stops or the window closes.
    ///
    /// Returns an error when the event loop fails or no drawing surface could
    /// be created for the window.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        // Redraws are only ever requested through the frame scheduler.
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(config, gpu_init, app);
        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ── frame scheduling ──────────────────────────────────────────────────────

/// Outstanding frame of the window, if any.
#[derive(Debug, Default)]
struct FrameSlot {
    next_id: u64,
    pending: Option<FrameRequest>,
}

impl FrameSlot {
    /// Mints a fresh request; it replaces whatever was pending.
    fn mint(&mut self) -> FrameRequest {
        self.next_id = self.next_id.wrapping_add(1);
        let request = FrameRequest::from_raw(self.next_id);
        self.pending = Some(request);
        request
    }

    fn cancel(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    /// Hands out the pending request for delivery.
    fn take_due(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }
}

/// `FrameScheduler` backed by winit redraw requests.
///
/// Requesting a frame asks the window for a redraw; the matching
/// `RedrawRequested` delivers the request to the app. Cancelled requests are
/// forgotten, so their redraw (if one still arrives) runs nothing.
pub struct RedrawScheduler<'a> {
    window: Option<&'a Window>,
    slot: &'a mut FrameSlot,
}

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) -> FrameRequest {
        let request = self.slot.mint();
        if let Some(window) = self.window {
            window.request_redraw();
        }
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.slot.cancel(request);
    }
}

// ── event loop state ──────────────────────────────────────────────────────

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    slot: FrameSlot,
    stopped: bool,
    /// Error surfaced from `Runtime::run` once the loop has exited.
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            slot: FrameSlot::default(),
            stopped: false,
            fatal: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            clock: FrameClock::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    /// Tells the app to stop (once) and leaves the event loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.stopped {
            self.stopped = true;
            let window = self.entry.as_ref().map(|e| e.borrow_window());
            let mut scheduler = RedrawScheduler { window, slot: &mut self.slot };
            self.app.on_stop(&mut scheduler);
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.stopped = true;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(request) = self.slot.take_due() else {
            return;
        };

        let background = self.config.background;
        let (app, slot) = (&mut self.app, &mut self.slot);
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let control = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let mut scheduler = RedrawScheduler {
                window: Some(fields.window),
                slot,
            };
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
                time,
                background,
                scheduler: &mut scheduler,
            };
            app.on_frame(request, &mut ctx)
        });

        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.stopped {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(err) => {
                // Let the app observe the missing surface; it must not start.
                let mut scheduler = RedrawScheduler { window: None, slot: &mut self.slot };
                let err = match self.app.on_surface_ready(None, &mut scheduler) {
                    Err(refusal) => err.context(refusal),
                    Ok(()) => err.context("app started without a drawing surface"),
                };
                self.fail(event_loop, err);
                return;
            }
        };

        let (app, slot) = (&mut self.app, &mut self.slot);
        let ready = entry.with_window(|w| {
            let viewport = logical_viewport(w);
            log::info!("surface ready: {}x{} logical px", viewport.width, viewport.height);
            let mut scheduler = RedrawScheduler { window: Some(w), slot };
            app.on_surface_ready(Some(viewport), &mut scheduler)
        });
        self.entry = Some(entry);

        if let Err(err) = ready {
            self.fail(event_loop, err.context("app refused to start"));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.stopped {
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.stopped {
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.shutdown(event_loop);
                return;
            }
            WindowEvent::KeyboardInput { event: key, .. }
                if key.state == ElementState::Pressed
                    && key.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                log::debug!("escape pressed");
                self.shutdown(event_loop);
                return;
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            _ => {}
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, slot) = (&mut self.app, &mut self.slot);
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match event {
            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| {
                    let mut scheduler = RedrawScheduler { window: Some(w), slot };
                    app.on_resize(logical_viewport(w), &mut scheduler);
                });
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| {
                    let mut scheduler = RedrawScheduler { window: Some(w), slot };
                    app.on_resize(logical_viewport(w), &mut scheduler);
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let scale = entry.borrow_window().scale_factor();
                let logical = position.to_logical::<f64>(scale);
                app.on_pointer_moved(Vec2::new(logical.x as f32, logical.y as f32));
            }

            _ => {}
        }
    }
}
