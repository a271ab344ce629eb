//! Interactive solar system — wasm entry point.
//!
//! The snapshot buffer carries body ids, not names, so the UI resolves
//! display names through `get_body_name` when it builds tooltips and the
//! info panel.

use orrery_engine::*;
use wasm_bindgen::prelude::*;

mod bodies;
mod data;
mod game;
mod interaction;
mod orbit;

pub use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

/// Display name for a body id, or an empty string if the id is unknown
/// (e.g. a comet removed by a dataset re-ingest).
#[wasm_bindgen]
pub fn get_body_name(id: u32) -> String {
    with_runner(|r| {
        r.ctx()
            .registry
            .get(BodyId(id))
            .map(|b| b.name.clone())
            .unwrap_or_default()
    })
}
