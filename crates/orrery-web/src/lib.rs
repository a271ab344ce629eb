pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers,
///   dataset ingestion entry points, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
/// use orrery_web::GameRunner;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `orrery_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Dataset ingestion ----
        //
        // JS performs the HTTP fetches and forwards the JSON here. The
        // `generation` token came from the game's request event; stale
        // completions (user already deselected / navigated away) are dropped
        // inside the game, never applied.

        #[wasm_bindgen]
        pub fn game_load_comets(json: &str, generation: u32) {
            with_runner(|r| r.ingest($crate::DataChannel::Comets, json, generation));
        }

        #[wasm_bindgen]
        pub fn game_load_body_info(json: &str, generation: u32) {
            with_runner(|r| r.ingest($crate::DataChannel::BodyInfo, json, generation));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_bodies_ptr() -> *const f32 {
            with_runner(|r| r.bodies_ptr())
        }

        #[wasm_bindgen]
        pub fn get_body_count() -> u32 {
            with_runner(|r| r.body_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_camera_state() -> Vec<f32> {
            with_runner(|r| r.camera_floats().to_vec())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_bodies() -> u32 {
            with_runner(|r| r.max_bodies())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}

// Re-export so the macro body can reach it as `$crate::DataChannel`.
pub use orrery_engine::api::game::DataChannel;
