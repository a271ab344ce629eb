use orrery_engine::{
    DataChannel, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
    SnapshotBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    snapshot: SnapshotBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let snapshot = SnapshotBuffer::with_capacity(config.max_bodies);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            snapshot,
            timestep,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.ctx
            .camera
            .set_screen_size(self.config.screen_width, self.config.screen_height);
        self.game.init(&mut self.ctx);
        self.snapshot.build(&self.ctx.registry);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Deliver a fetched JSON payload to the game between ticks.
    /// Completions become visible to the frame loop on the next tick.
    pub fn ingest(&mut self, channel: DataChannel, json: &str, generation: u32) {
        if !self.initialized {
            log::warn!("dropping {channel:?} payload delivered before init");
            return;
        }
        self.game.ingest(&mut self.ctx, channel, json, generation);
        self.snapshot.build(&self.ctx.registry);
    }

    /// Run one frame tick: update game, rebuild the body snapshot.
    ///
    /// Queued input is presented to the first fixed step only and drained
    /// right after it, so a gesture dispatches exactly once no matter how
    /// many catch-up steps the frame runs. A frame too short for a single
    /// step leaves the queue untouched for the next frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps == 0 {
            return;
        }

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();
        for _ in 1..steps {
            self.game.update(&mut self.ctx, &self.input);
        }

        // Rebuild the body buffer from the registry
        self.snapshot.build(&self.ctx.registry);
    }

    /// Read-only engine state, for game-specific extra exports.
    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for JS typed-array reads ----

    pub fn bodies_ptr(&self) -> *const f32 {
        self.snapshot.instances_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.snapshot.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Camera accessors (JS mirrors these into its scene camera) ----

    pub fn camera_floats(&self) -> [f32; 6] {
        let cam = &self.ctx.camera;
        [
            cam.pos.x, cam.pos.y, cam.pos.z, cam.target.x, cam.target.y, cam.target.z,
        ]
    }

    // ---- Capacity accessors ----

    pub fn max_bodies(&self) -> u32 {
        self.config.max_bodies as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
