//! Flat per-body buffer the JS renderer reads from WASM linear memory.

use bytemuck::{Pod, Zeroable};

use crate::core::body::Body;
use crate::core::registry::Registry;

/// Per-body render data written for the JS scene graph.
/// Must match the JS protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct BodyInstance {
    /// Registry id (stable across frames).
    pub id: f32,
    /// BodyKind discriminant: 0 star, 1 planet, 2 asteroid, 3 comet.
    pub kind: f32,
    /// World position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Visual radius in display units.
    pub radius: f32,
    /// Self-rotation angle in radians (renderer applies it to the mesh).
    pub spin: f32,
    /// Bit flags: 1 visible, 2 rotating, 4 has ring.
    pub flags: f32,
    /// Ring geometry (zero when flag bit 4 is clear).
    pub ring_inner: f32,
    pub ring_outer: f32,
    /// Display-orbit radius for drawing the orbit ring (zero for comets/star).
    pub orbit_radius: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const FLAG_VISIBLE: u32 = 1;
    pub const FLAG_ROTATING: u32 = 2;
    pub const FLAG_RING: u32 = 4;

    fn from_body(body: &Body) -> Self {
        let mut flags = 0u32;
        if body.visible {
            flags |= Self::FLAG_VISIBLE;
        }
        if body.rotating {
            flags |= Self::FLAG_ROTATING;
        }
        if body.ring.is_some() {
            flags |= Self::FLAG_RING;
        }
        let (ring_inner, ring_outer) = body
            .ring
            .map(|r| (r.inner_radius, r.outer_radius))
            .unwrap_or((0.0, 0.0));
        Self {
            id: body.id.0 as f32,
            kind: body.kind as u32 as f32,
            x: body.pos.x,
            y: body.pos.y,
            z: body.pos.z,
            radius: body.radius,
            spin: body.spin_angle,
            flags: flags as f32,
            ring_inner,
            ring_outer,
            orbit_radius: body.distance,
            _pad: 0.0,
        }
    }
}

/// Snapshot buffer rebuilt from the registry after every tick.
pub struct SnapshotBuffer {
    instances: Vec<BodyInstance>,
}

impl SnapshotBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Rebuild the buffer from current registry state.
    pub fn build(&mut self, registry: &Registry) {
        self.instances.clear();
        self.instances.extend(registry.iter().map(BodyInstance::from_body));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for JS-side typed-array reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}
