use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::coords::{Vec2, Viewport};
use crate::error::EngineError;
use crate::graph::{Edge, FieldConfig, NodeField, compute_edges, render_frame};
use crate::surface::Surface;

use super::schedule::{FrameRequest, FrameScheduler};

/// Self-contained animated node graph.
///
/// The engine owns all mutable effect state: nodes, the per-frame edge
/// buffer, the last pointer sample and the handle of the next scheduled
/// frame. Hosts feed it lifecycle events through the methods below; nothing
/// is shared through globals, so independent instances can coexist.
///
/// A frame is always `step → compute edges → render`, in that order.
#[derive(Debug)]
pub struct AnimationEngine<R = ChaCha8Rng> {
    config: FieldConfig,
    rng: R,
    field: NodeField,
    /// Rebuilt from scratch every frame.
    edges: Vec<Edge>,
    pointer: Vec2,
    pending: Option<FrameRequest>,
    frames: u64,
}

impl AnimationEngine<ChaCha8Rng> {
    /// Engine with a reproducible random source.
    pub fn seeded(config: FieldConfig, seed: u64) -> Result<Self, EngineError> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Engine seeded from OS entropy.
    pub fn from_entropy(config: FieldConfig) -> Result<Self, EngineError> {
        Self::new(config, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> AnimationEngine<R> {
    pub fn new(config: FieldConfig, rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            field: NodeField::empty(),
            edges: Vec::new(),
            pointer: Vec2::zero(),
            pending: None,
            frames: 0,
        })
    }

    // ── host lifecycle ────────────────────────────────────────────────────

    /// Handles "surface ready": populates the field for the surface and starts the loop.
    ///
    /// Without a surface nothing is populated or scheduled and
    /// `EngineError::MissingSurface` is returned for the host to report.
    pub fn surface_ready<Q: FrameScheduler + ?Sized>(
        &mut self,
        surface: Option<&dyn Surface>,
        scheduler: &mut Q,
    ) -> Result<(), EngineError> {
        let Some(surface) = surface else {
            log::error!("surface ready signalled without a drawing surface");
            return Err(EngineError::MissingSurface);
        };

        self.initialize(surface.viewport());
        self.start(scheduler);
        Ok(())
    }

    /// Replaces the node set with a fresh one sized for `viewport`.
    pub fn initialize(&mut self, viewport: Viewport) {
        self.field = NodeField::populate(viewport, &self.config, &mut self.rng);
        self.edges.clear();
    }

    /// Handles "surface resized". Previous nodes are discarded, not reflowed.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("resize to {}x{}", viewport.width, viewport.height);
        self.initialize(viewport);
    }

    /// Handles "pointer moved". Last write wins; read once per frame.
    #[inline]
    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Schedules the next frame, cancelling any frame still outstanding.
    pub fn start<Q: FrameScheduler + ?Sized>(&mut self, scheduler: &mut Q) {
        if let Some(previous) = self.pending.take() {
            log::debug!("restarting loop; cancelling frame {}", previous.id());
            scheduler.cancel_frame(previous);
        }
        self.pending = Some(scheduler.request_frame());
    }

    /// Handles "stop requested". Safe to call repeatedly.
    pub fn stop<Q: FrameScheduler + ?Sized>(&mut self, scheduler: &mut Q) {
        if let Some(previous) = self.pending.take() {
            log::debug!("loop stopped after {} frames", self.frames);
            scheduler.cancel_frame(previous);
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Runs the frame for `request` and schedules the following one.
    ///
    /// Returns `false` without touching any state when `request` is not the
    /// frame this engine is waiting for (cancelled, superseded, or foreign).
    pub fn on_frame<S, Q>(&mut self, request: FrameRequest, surface: &mut S, scheduler: &mut Q) -> bool
    where
        S: Surface + ?Sized,
        Q: FrameScheduler + ?Sized,
    {
        if self.pending != Some(request) {
            log::debug!("ignoring stale frame request {}", request.id());
            return false;
        }

        self.tick(surface);
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// One update/graph/render cycle, independent of scheduling.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.field.step(&self.config);
        compute_edges(self.field.nodes(), &self.config, &mut self.edges);
        render_frame(surface, self.field.nodes(), &self.edges, self.pointer, &self.config);
        self.frames = self.frames.wrapping_add(1);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn field(&self) -> &NodeField {
        &self.field
    }

    /// Edges of the most recent frame.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::QueuedScheduler;
    use crate::graph::proximity_edges;
    use crate::scene::{DrawCmd, DrawList};

    fn engine() -> AnimationEngine {
        AnimationEngine::seeded(FieldConfig::default(), 1234).expect("default config is valid")
    }

    fn surface(w: f32, h: f32) -> DrawList {
        DrawList::new(Viewport::new(w, h))
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = FieldConfig { area_per_node: 0.0, ..FieldConfig::default() };
        assert!(AnimationEngine::seeded(cfg, 1).is_err());
    }

    #[test]
    fn missing_surface_does_not_start() {
        let mut e = engine();
        let mut sched = QueuedScheduler::new();

        assert_eq!(e.surface_ready(None, &mut sched), Err(EngineError::MissingSurface));
        assert!(!e.is_running());
        assert!(e.field().is_empty());
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn surface_ready_populates_and_schedules_one_frame() {
        let mut e = engine();
        let mut sched = QueuedScheduler::new();
        let list = surface(800.0, 600.0);

        e.surface_ready(Some(&list), &mut sched).expect("surface present");

        assert_eq!(e.field().len(), 40);
        assert!(e.is_running());
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn restart_cancels_the_outstanding_frame() {
        let mut e = engine();
        let mut sched = QueuedScheduler::new();
        let mut list = surface(800.0, 600.0);
        e.surface_ready(Some(&list), &mut sched).expect("surface present");

        e.start(&mut sched);
        assert_eq!(sched.pending_count(), 1);

        let live = sched.next_due().expect("one frame pending");
        assert!(e.on_frame(live, &mut list, &mut sched));
        assert_eq!(e.frame_count(), 1);
    }

    #[test]
    fn superseded_request_is_ignored() {
        let mut e = engine();
        let mut sched = QueuedScheduler::new();
        let mut list = surface(800.0, 600.0);
        e.surface_ready(Some(&list), &mut sched).expect("surface present");

        let old = sched.next_due().expect("first frame");
        e.start(&mut sched);

        let before = e.field().clone();
        assert!(!e.on_frame(old, &mut list, &mut sched));
        assert_eq!(e.field(), &before);
        assert_eq!(e.frame_count(), 0);
    }

    #[test]
    fn stop_is_idempotent_and_blocks_pending_frame() {
        let mut e = engine();
        let mut sched = QueuedScheduler::new();
        let mut list = surface(800.0, 600.0);
        e.surface_ready(Some(&list), &mut sched).expect("surface present");

        // The host has already dequeued this frame when the stop arrives.
        let pending = sched.next_due().expect("frame pending");
        e.stop(&mut sched);
        e.stop(&mut sched);

        assert!(!e.is_running());
        assert_eq!(sched.pending_count(), 0);
        assert!(!e.on_frame(pending, &mut list, &mut sched));
        assert!(list.is_empty());
    }

    #[test]
    fn frames_keep_rescheduling_themselves() {
        let mut e = engine();
        let mut sched = QueuedScheduler::new();
        let mut list = surface(640.0, 480.0);
        e.surface_ready(Some(&list), &mut sched).expect("surface present");

        for _ in 0..10 {
            let r = sched.next_due().expect("loop keeps a frame scheduled");
            assert!(e.on_frame(r, &mut list, &mut sched));
        }
        assert_eq!(e.frame_count(), 10);
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn resize_regenerates_with_new_count() {
        let mut e = engine();
        let mut sched = QueuedScheduler::new();
        let list = surface(800.0, 600.0);
        e.surface_ready(Some(&list), &mut sched).expect("surface present");

        e.resize(Viewport::new(2000.0, 1500.0));
        assert_eq!(e.field().len(), 150);
        assert_eq!(e.field().bounds(), Viewport::new(2000.0, 1500.0));

        e.resize(Viewport::new(0.0, 0.0));
        assert_eq!(e.field().len(), 40);
    }

    // ── frame contents ────────────────────────────────────────────────────

    #[test]
    fn tick_edges_match_current_positions() {
        let mut e = engine();
        let mut list = surface(500.0, 400.0);
        e.initialize(list.viewport());

        for _ in 0..25 {
            e.tick(&mut list);
            let expected = proximity_edges(e.field().nodes(), e.config());
            assert_eq!(e.edges(), expected.as_slice());
        }
    }

    #[test]
    fn tick_draws_edges_then_two_circles_per_node() {
        let mut e = engine();
        let mut list = surface(500.0, 400.0);
        e.initialize(list.viewport());
        e.tick(&mut list);

        let edges = e.edges().len();
        let nodes = e.field().len();
        let items = list.items();
        assert_eq!(items.len(), edges + 2 * nodes);
        assert!(items[..edges].iter().all(|c| matches!(c, DrawCmd::Line(_))));
        assert!(items[edges..].iter().all(|c| matches!(c, DrawCmd::Circle(_))));
    }

    #[test]
    fn pointer_enlarges_nearby_node() {
        let mut e = engine();
        let mut list = surface(500.0, 400.0);
        e.initialize(list.viewport());
        e.tick(&mut list);

        // Park the pointer exactly where node 0 lands next frame.
        let target = e.field().nodes()[0];
        e.set_pointer(e.field().bounds().clamp(target.pos + target.vel));
        e.tick(&mut list);

        let first_node = e.edges().len();
        let DrawCmd::Circle(disc) = &list.items()[first_node + 1] else {
            panic!("expected first node disc");
        };
        assert_eq!(disc.radius, target.radius + 1.0);
    }

    #[test]
    fn same_seed_same_animation() {
        let mut a = engine();
        let mut b = engine();
        let mut la = surface(700.0, 500.0);
        let mut lb = surface(700.0, 500.0);
        a.initialize(la.viewport());
        b.initialize(lb.viewport());

        for _ in 0..5 {
            a.tick(&mut la);
            b.tick(&mut lb);
        }
        assert_eq!(la, lb);
    }
}
