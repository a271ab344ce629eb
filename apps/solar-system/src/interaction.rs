//! Pointer handling and the select/follow state machine.
//!
//! Consumes the drained input-event queue once per tick, so each gesture
//! dispatches exactly once — there is no per-gesture listener registration.

use glam::{Vec2, Vec3};
use orrery_engine::{BodyId, OrbitCamera, Registry};

/// Fraction of the remaining distance the camera covers per tick while
/// following. Exponential approach — it never converges exactly, which is
/// why the convergence threshold below terminates the state.
pub const FOLLOW_DAMPING: f32 = 0.05;
/// Camera-to-follow-position distance below which Following ends.
pub const FOLLOW_CONVERGE_DIST: f32 = 0.1;
/// Screen-pixel distance before a press becomes a camera drag.
const DRAG_THRESHOLD: f32 = 5.0;

/// The selection/follow state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    /// A body was picked this tick. Transient: promoted to Following in the
    /// same call, mirroring the conflated select/follow of the original UI.
    Selected { id: BodyId },
    Following { id: BodyId, follow_distance: f32 },
}

pub struct InteractionController {
    phase: Phase,
    hovered: Option<BodyId>,
    pointer_down: bool,
    drag_moved: bool,
    drag_start: Vec2,
    last_pointer: Vec2,
    /// Request token for the per-body metadata fetch. Bumped on every new
    /// selection and on deselect/reset, so a completion carrying an old
    /// token is recognizably stale and dropped instead of applied.
    generation: u32,
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            hovered: None,
            pointer_down: false,
            drag_moved: false,
            drag_start: Vec2::ZERO,
            last_pointer: Vec2::ZERO,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<BodyId> {
        match self.phase {
            Phase::Idle => None,
            Phase::Selected { id } | Phase::Following { id, .. } => Some(id),
        }
    }

    pub fn hovered(&self) -> Option<BodyId> {
        self.hovered
    }

    pub fn is_following(&self) -> bool {
        matches!(self.phase, Phase::Following { .. })
    }

    /// Current metadata request token. Completions with any other value are
    /// stale.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ray-pick against every visible body. When the ray passes through
    /// several, the nearest hit along the ray wins — no other tie-break.
    pub fn pick(&self, screen: Vec2, registry: &Registry, camera: &OrbitCamera) -> Option<BodyId> {
        let ray = camera.pick_ray(screen);
        registry
            .iter()
            .filter(|b| b.visible)
            .filter_map(|b| ray.intersect_sphere(b.pos, b.radius).map(|t| (b.id, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn on_pointer_down(&mut self, pos: Vec2) {
        self.pointer_down = true;
        self.drag_moved = false;
        self.drag_start = pos;
        self.last_pointer = pos;
    }

    pub fn on_pointer_move(
        &mut self,
        pos: Vec2,
        registry: &Registry,
        camera: &mut OrbitCamera,
    ) {
        if self.pointer_down {
            if (pos - self.drag_start).length() > DRAG_THRESHOLD {
                self.drag_moved = true;
            }
            if self.drag_moved {
                let delta = pos - self.last_pointer;
                // No-op while Following: the camera ignores user orbit input
                // until control returns on the Idle transition.
                camera.orbit(delta.x, delta.y);
            }
            self.last_pointer = pos;
        } else {
            // Hover pick for the tooltip. A miss is a normal empty result
            // that clears the tooltip, not an error.
            self.hovered = self.pick(pos, registry, camera);
        }
    }

    pub fn on_pointer_up(
        &mut self,
        pos: Vec2,
        registry: &mut Registry,
        camera: &mut OrbitCamera,
    ) {
        let was_click = self.pointer_down && !self.drag_moved;
        self.pointer_down = false;
        self.drag_moved = false;

        if !was_click {
            return;
        }
        match self.pick(pos, registry, camera) {
            Some(id) => self.select(id, registry, camera),
            None => self.clear_selection(camera),
        }
    }

    pub fn on_wheel(&mut self, delta: f32, camera: &mut OrbitCamera) {
        camera.zoom(delta);
    }

    /// Select a body: record it, toggle its rotation flag, and start
    /// following. Selection and follow-start are a single transition here,
    /// exactly as in the UI this replaces.
    pub fn select(&mut self, id: BodyId, registry: &mut Registry, camera: &mut OrbitCamera) {
        let Some(body) = registry.get(id) else {
            log::warn!("select: unknown body id {id:?}");
            return;
        };
        let follow_distance = body.radius * 3.0 + 10.0;
        registry.toggle_rotation(id);

        self.phase = Phase::Selected { id };
        // Selected → Following immediately.
        self.phase = Phase::Following { id, follow_distance };
        camera.controls_enabled = false;
        self.generation += 1;
    }

    /// Drop the selection and cancel any in-flight metadata request.
    pub fn clear_selection(&mut self, camera: &mut OrbitCamera) {
        if self.phase != Phase::Idle {
            self.generation += 1;
            self.phase = Phase::Idle;
            camera.controls_enabled = true;
        }
        self.hovered = None;
    }

    /// Explicit reset action: back to Idle and the home viewpoint.
    pub fn reset(&mut self, camera: &mut OrbitCamera) {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.hovered = None;
        camera.reset();
    }

    /// Per-frame follow update. Damped approach toward a point
    /// `follow_distance` behind the target along the current camera
    /// direction; ends the Following state once within the convergence
    /// threshold, handing camera control back to the user.
    pub fn tick(&mut self, registry: &Registry, camera: &mut OrbitCamera) {
        let Phase::Following { id, follow_distance } = self.phase else {
            return;
        };
        let Some(body) = registry.get(id) else {
            // Body disappeared (dataset re-ingest); nothing left to follow.
            self.phase = Phase::Idle;
            camera.controls_enabled = true;
            return;
        };

        let target = body.pos;
        let direction = (camera.pos - target).normalize_or(Vec3::Z);
        let follow_pos = target + direction * follow_distance;
        let remaining = camera.follow_step(follow_pos, target, FOLLOW_DAMPING);

        if remaining < FOLLOW_CONVERGE_DIST {
            self.phase = Phase::Idle;
            camera.controls_enabled = true;
        }
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}
