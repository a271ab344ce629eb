use crate::api::types::GameEvent;
use crate::camera::OrbitCamera;
use crate::core::registry::Registry;
use crate::input::queue::InputQueue;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial viewport width in display units.
    pub screen_width: f32,
    /// Initial viewport height in display units.
    pub screen_height: f32,
    /// Maximum number of body instances in the snapshot buffer (default: 256).
    pub max_bodies: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            screen_width: 1280.0,
            screen_height: 720.0,
            max_bodies: 256,
            max_events: 32,
        }
    }
}

/// Which asynchronous dataset a JSON payload belongs to.
///
/// The JS side performs the actual HTTP fetches; completions arrive through
/// `Game::ingest` between ticks, tagged with the channel they answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataChannel {
    /// Array of comet orbital-element records.
    Comets,
    /// Descriptive metadata for a single body (display only).
    BodyInfo,
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, register bodies, place the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The frame tick. Consume input, advance body state, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Deliver a fetched JSON payload. `generation` is the request token the
    /// game handed out when it asked for the data; stale tokens must be
    /// dropped, not applied.
    fn ingest(&mut self, _ctx: &mut EngineContext, _channel: DataChannel, _json: &str, _generation: u32) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub registry: Registry,
    pub camera: OrbitCamera,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            camera: OrbitCamera::default(),
            events: Vec::new(),
        }
    }

    /// Emit a game event to be forwarded to the UI layer.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
