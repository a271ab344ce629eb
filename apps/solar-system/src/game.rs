/// Solar System — interactive 3D orrery with click-to-follow camera and
/// comet positions ingested from a public orbital-element dataset.
///
/// Body state lives in the registry; the JS renderer mirrors it from the
/// snapshot buffer. DOM widgets (dropdowns, tooltip, info panel) talk to us
/// through custom input events and read back game events.

use glam::Vec2;
use orrery_engine::{
    Body, BodyId, BodyKind, DataChannel, EngineContext, Game, GameConfig, GameEvent, InputEvent,
    InputQueue,
};

use crate::bodies;
use crate::data::{self, BodyInfo};
use crate::interaction::{InteractionController, Phase};

// ── Custom event kinds from the UI ───────────────────────────────────

/// Render-mode dropdown: a = 0 all, 1 planets, 2 asteroids.
pub const CUSTOM_RENDER_MODE: u32 = 1;
/// Speed dropdown: a = ratio between the new and previous preset.
/// The registry multiplier compounds, so the UI must send ratios.
pub const CUSTOM_SET_SPEED: u32 = 2;
/// Direct body select: a = index into the planet catalog.
pub const CUSTOM_SELECT_BODY: u32 = 3;
/// Reset action: deselect, cancel fetches, camera home.
pub const CUSTOM_RESET: u32 = 4;
/// Viewport resize: a = width, b = height.
pub const CUSTOM_RESIZE: u32 = 99;

pub const MODE_ALL: f32 = 0.0;
pub const MODE_PLANETS: f32 = 1.0;
pub const MODE_ASTEROIDS: f32 = 2.0;

// ── Game event kinds to the UI ───────────────────────────────────────

/// a = selected body id (-1 none), b = 1 while following, c = follow distance.
pub const EVENT_SELECTION: f32 = 1.0;
/// a = hovered body id (-1 none) for the tooltip.
pub const EVENT_HOVER: f32 = 2.0;
/// Ask JS to fetch metadata: a = body id, b = generation token.
pub const EVENT_REQUEST_INFO: f32 = 3.0;
/// Stored metadata is current for the selected body: a = body id.
pub const EVENT_INFO_READY: f32 = 4.0;
/// Ask JS to fetch the comet dataset: a = generation token.
pub const EVENT_REQUEST_COMETS: f32 = 5.0;

// ── Game struct ──────────────────────────────────────────────────────

pub struct SolarSystem {
    controller: InteractionController,
    planet_ids: Vec<BodyId>,
    /// Token for the comet-dataset request emitted at startup.
    comet_generation: u32,
    comets_requested: bool,
    /// Metadata for the most recent selection, kept for UI reads.
    body_info: Option<BodyInfo>,
    /// Emit EVENT_INFO_READY on the next tick (ingest lands between ticks,
    /// where emitted events would be cleared before JS sees them).
    pending_info_event: Option<BodyId>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            controller: InteractionController::new(),
            planet_ids: Vec::with_capacity(bodies::PLANET_COUNT),
            comet_generation: 1,
            comets_requested: false,
            body_info: None,
            pending_info_event: None,
        }
    }

    pub fn body_info(&self) -> Option<&BodyInfo> {
        self.body_info.as_ref()
    }

    fn apply_render_mode(registry: &mut orrery_engine::Registry, mode: f32) {
        let (planets, asteroids, comets) = if mode == MODE_PLANETS {
            (true, false, false)
        } else if mode == MODE_ASTEROIDS {
            (false, true, false)
        } else {
            (true, true, true)
        };
        registry.set_kind_visible(BodyKind::Planet, planets);
        registry.set_kind_visible(BodyKind::Asteroid, asteroids);
        registry.set_kind_visible(BodyKind::Comet, comets);
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_RENDER_MODE => Self::apply_render_mode(&mut ctx.registry, a),
            CUSTOM_SET_SPEED => ctx.registry.set_speed_multiplier(a),
            CUSTOM_SELECT_BODY => {
                let idx = a as usize;
                if let Some(&id) = self.planet_ids.get(idx) {
                    self.controller.select(id, &mut ctx.registry, &mut ctx.camera);
                } else {
                    log::warn!("select: planet index {idx} out of range");
                }
            }
            CUSTOM_RESET => {
                self.controller.reset(&mut ctx.camera);
                self.body_info = None;
            }
            CUSTOM_RESIZE => ctx.camera.set_screen_size(a, b),
            _ => {}
        }
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_bodies: 128,
            max_events: 32,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.camera.reset();

        ctx.registry.add(
            Body::new("sun", BodyKind::Star)
                .with_radius(bodies::SUN_RADIUS)
                .with_spin(bodies::SUN_SPIN_SPEED),
        );

        for spec in &bodies::PLANETS {
            let mut body = Body::new(spec.name, BodyKind::Planet)
                .with_orbit(spec.distance, spec.orbit_speed)
                .with_spin(spec.spin_speed)
                .with_radius(spec.radius);
            if let Some((inner, outer)) = spec.ring {
                body = body.with_ring(inner, outer);
            }
            self.planet_ids.push(ctx.registry.add(body));
        }

        for (i, a) in bodies::generate_asteroids().iter().enumerate() {
            ctx.registry.add(
                Body::new(format!("asteroid-{i}"), BodyKind::Asteroid)
                    .with_orbit(a.distance, a.orbit_speed)
                    .with_orbit_angle(a.orbit_angle)
                    .with_spin(a.spin_speed)
                    .with_radius(a.radius),
            );
        }

        log::info!("registered {} bodies", ctx.registry.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let selected_before = self.controller.selected();

        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    self.controller.on_pointer_down(Vec2::new(x, y));
                }
                InputEvent::PointerMove { x, y } => {
                    self.controller
                        .on_pointer_move(Vec2::new(x, y), &ctx.registry, &mut ctx.camera);
                }
                InputEvent::PointerUp { x, y } => {
                    self.controller
                        .on_pointer_up(Vec2::new(x, y), &mut ctx.registry, &mut ctx.camera);
                }
                InputEvent::Wheel { delta } => {
                    self.controller.on_wheel(delta, &mut ctx.camera);
                }
                InputEvent::Custom { kind, a, b, .. } => {
                    self.handle_custom(ctx, kind, a, b);
                }
            }
        }

        // Follow camera, then angular state.
        self.controller.tick(&ctx.registry, &mut ctx.camera);
        ctx.registry.advance();

        // One-shot dataset request after startup.
        if !self.comets_requested {
            self.comets_requested = true;
            ctx.emit_event(GameEvent {
                kind: EVENT_REQUEST_COMETS,
                a: self.comet_generation as f32,
                b: 0.0,
                c: 0.0,
            });
        }

        // Metadata request whenever the selection changed to a new body.
        let selected = self.controller.selected();
        if selected != selected_before {
            if let Some(id) = selected {
                ctx.emit_event(GameEvent {
                    kind: EVENT_REQUEST_INFO,
                    a: id.0 as f32,
                    b: self.controller.generation() as f32,
                    c: 0.0,
                });
            }
        }

        if let Some(id) = self.pending_info_event.take() {
            ctx.emit_event(GameEvent {
                kind: EVENT_INFO_READY,
                a: id.0 as f32,
                b: 0.0,
                c: 0.0,
            });
        }

        // Per-frame status for the UI.
        let (sel, following, follow_dist) = match self.controller.phase() {
            Phase::Idle => (-1.0, 0.0, 0.0),
            Phase::Selected { id } => (id.0 as f32, 0.0, 0.0),
            Phase::Following { id, follow_distance } => (id.0 as f32, 1.0, follow_distance),
        };
        ctx.emit_event(GameEvent { kind: EVENT_SELECTION, a: sel, b: following, c: follow_dist });

        let hover = self.controller.hovered().map(|id| id.0 as f32).unwrap_or(-1.0);
        ctx.emit_event(GameEvent { kind: EVENT_HOVER, a: hover, b: 0.0, c: 0.0 });
    }

    fn ingest(&mut self, ctx: &mut EngineContext, channel: DataChannel, json: &str, generation: u32) {
        match channel {
            DataChannel::Comets => {
                if generation != self.comet_generation {
                    log::debug!("dropping stale comet payload (generation {generation})");
                    return;
                }
                match data::parse_comet_records(json, bodies::COMET_DISPLAY_SCALE) {
                    Ok(comets) => {
                        ctx.registry.remove_kind(BodyKind::Comet);
                        let count = comets.len();
                        for comet in comets {
                            // Solver output is ecliptic (x, y, z-up); the
                            // display scene is y-up.
                            let pos = glam::Vec3::new(
                                comet.pos.x as f32,
                                comet.pos.z as f32,
                                comet.pos.y as f32,
                            );
                            ctx.registry.add(
                                Body::new(comet.name, BodyKind::Comet)
                                    .with_pos(pos)
                                    .with_radius(bodies::COMET_RADIUS)
                                    .with_spin(bodies::COMET_SPIN_SPEED),
                            );
                        }
                        log::info!("placed {count} comets from dataset");
                    }
                    // Fetch/parse failure degrades to an empty comet set;
                    // the session keeps running.
                    Err(err) => log::error!("comet dataset rejected: {err}"),
                }
            }
            DataChannel::BodyInfo => {
                if generation != self.controller.generation() {
                    log::debug!("dropping stale body info (generation {generation})");
                    return;
                }
                match BodyInfo::from_json(json) {
                    Ok(info) => {
                        log::info!("body info loaded for {}", info.name);
                        self.body_info = Some(info);
                        self.pending_info_event = self.controller.selected();
                    }
                    Err(err) => log::warn!("body info rejected: {err}"),
                }
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booted() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::new();
        ctx.camera.set_screen_size(1280.0, 720.0);
        game.init(&mut ctx);
        (game, ctx)
    }

    fn custom(kind: u32, a: f32, b: f32) -> InputQueue {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind, a, b, c: 0.0 });
        q
    }

    fn events_of(ctx: &EngineContext, kind: f32) -> Vec<GameEvent> {
        ctx.events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    const COMET_JSON: &str = r#"[{
        "object": "1P/Halley",
        "e": "0.9671",
        "q_au_1": "0.5860",
        "i_deg": "162.26",
        "w_deg": "111.33",
        "node_deg": "58.42"
    }]"#;

    #[test]
    fn init_registers_sun_planets_and_belt() {
        let (_, ctx) = booted();
        assert_eq!(ctx.registry.len(), 1 + bodies::PLANET_COUNT + bodies::ASTEROID_COUNT);
        assert!(ctx.registry.find_by_name("sun").is_some());
        assert!(ctx.registry.find_by_name("saturn").unwrap().ring.is_some());
    }

    #[test]
    fn first_update_requests_comet_dataset_once() {
        let (mut game, mut ctx) = booted();
        let input = InputQueue::new();
        game.update(&mut ctx, &input);
        assert_eq!(events_of(&ctx, EVENT_REQUEST_COMETS).len(), 1);

        ctx.clear_frame_data();
        game.update(&mut ctx, &input);
        assert!(events_of(&ctx, EVENT_REQUEST_COMETS).is_empty());
    }

    #[test]
    fn comet_ingest_places_bodies() {
        let (mut game, mut ctx) = booted();
        let before = ctx.registry.len();
        game.ingest(&mut ctx, DataChannel::Comets, COMET_JSON, 1);
        assert_eq!(ctx.registry.len(), before + 1);
        let comet = ctx.registry.find_by_name("1p/halley").unwrap();
        assert_eq!(comet.kind, BodyKind::Comet);
        // Inclined orbit: the comet must sit off the ecliptic plane.
        assert!(comet.pos.y.abs() > 0.0);
    }

    #[test]
    fn stale_comet_payload_is_dropped() {
        let (mut game, mut ctx) = booted();
        let before = ctx.registry.len();
        game.ingest(&mut ctx, DataChannel::Comets, COMET_JSON, 99);
        assert_eq!(ctx.registry.len(), before);
    }

    #[test]
    fn unparseable_dataset_degrades_to_empty() {
        let (mut game, mut ctx) = booted();
        let before = ctx.registry.len();
        game.ingest(&mut ctx, DataChannel::Comets, "<!doctype html>", 1);
        assert_eq!(ctx.registry.len(), before);
    }

    #[test]
    fn render_mode_planets_hides_belt_and_comets() {
        let (mut game, mut ctx) = booted();
        game.ingest(&mut ctx, DataChannel::Comets, COMET_JSON, 1);
        game.update(&mut ctx, &custom(CUSTOM_RENDER_MODE, MODE_PLANETS, 0.0));

        assert!(ctx.registry.find_by_name("earth").unwrap().visible);
        assert!(!ctx.registry.find_by_name("asteroid-0").unwrap().visible);
        assert!(!ctx.registry.find_by_name("1p/halley").unwrap().visible);

        game.update(&mut ctx, &custom(CUSTOM_RENDER_MODE, MODE_ALL, 0.0));
        assert!(ctx.registry.find_by_name("asteroid-0").unwrap().visible);
    }

    #[test]
    fn speed_dropdown_scales_all_speeds() {
        let (mut game, mut ctx) = booted();
        let before = ctx.registry.find_by_name("earth").unwrap().orbit_speed;
        game.update(&mut ctx, &custom(CUSTOM_SET_SPEED, 2.0, 0.0));
        let after = ctx.registry.find_by_name("earth").unwrap().orbit_speed;
        assert!((after - before * 2.0).abs() < 1e-9);
    }

    #[test]
    fn dropdown_select_follows_and_requests_info() {
        let (mut game, mut ctx) = booted();
        // Index 2 = earth.
        game.update(&mut ctx, &custom(CUSTOM_SELECT_BODY, 2.0, 0.0));

        let earth_id = ctx.registry.find_by_name("earth").unwrap().id;
        let requests = events_of(&ctx, EVENT_REQUEST_INFO);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].a, earth_id.0 as f32);

        let selection = events_of(&ctx, EVENT_SELECTION);
        assert_eq!(selection[0].a, earth_id.0 as f32);
        assert_eq!(selection[0].b, 1.0, "selection enters follow mode");
        assert!(!ctx.camera.controls_enabled);
    }

    #[test]
    fn matching_body_info_is_stored_and_announced() {
        let (mut game, mut ctx) = booted();
        game.update(&mut ctx, &custom(CUSTOM_SELECT_BODY, 2.0, 0.0));
        let generation = events_of(&ctx, EVENT_REQUEST_INFO)[0].b as u32;

        game.ingest(
            &mut ctx,
            DataChannel::BodyInfo,
            r#"{ "name": "Earth", "overview": { "content": "Home." } }"#,
            generation,
        );
        assert_eq!(game.body_info().unwrap().name, "Earth");

        ctx.clear_frame_data();
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(events_of(&ctx, EVENT_INFO_READY).len(), 1);
    }

    #[test]
    fn stale_body_info_is_dropped() {
        let (mut game, mut ctx) = booted();
        game.update(&mut ctx, &custom(CUSTOM_SELECT_BODY, 2.0, 0.0));
        let generation = events_of(&ctx, EVENT_REQUEST_INFO)[0].b as u32;

        // User resets before the fetch lands; the generation moves on.
        ctx.clear_frame_data();
        game.update(&mut ctx, &custom(CUSTOM_RESET, 0.0, 0.0));

        game.ingest(
            &mut ctx,
            DataChannel::BodyInfo,
            r#"{ "name": "Earth" }"#,
            generation,
        );
        assert!(game.body_info().is_none());
    }

    #[test]
    fn reset_goes_home_and_clears_selection() {
        let (mut game, mut ctx) = booted();
        game.update(&mut ctx, &custom(CUSTOM_SELECT_BODY, 5.0, 0.0));
        ctx.clear_frame_data();
        game.update(&mut ctx, &custom(CUSTOM_RESET, 0.0, 0.0));

        let selection = events_of(&ctx, EVENT_SELECTION);
        assert_eq!(selection[0].a, -1.0);
        assert!(ctx.camera.controls_enabled);
    }

    #[test]
    fn resize_updates_camera_viewport() {
        let (mut game, mut ctx) = booted();
        game.update(&mut ctx, &custom(CUSTOM_RESIZE, 1920.0, 1080.0));
        assert_eq!(ctx.camera.screen_width, 1920.0);
        assert_eq!(ctx.camera.screen_height, 1080.0);
    }
}
