use bytemuck::{Pod, Zeroable};

/// Stable identifier for a body in the registry.
///
/// Assigned by the registry at `add()` time and used for every subsequent
/// lookup — picking resolves to a `BodyId`, never to a render-object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// A game event communicated from Rust to the JS/UI layer via linear memory.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
