use glam::Vec3;

use crate::api::types::BodyId;

/// Category of a registered body. Drives render-mode filtering and whether
/// the registry moves the body along a display orbit each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Asteroid,
    Comet,
}

impl BodyKind {
    /// Whether bodies of this kind advance along a circular display orbit.
    /// Comets are epoch snapshots — their position comes from the orbit
    /// solver once at ingestion and is never re-simulated.
    pub fn orbits(self) -> bool {
        matches!(self, BodyKind::Planet | BodyKind::Asteroid)
    }
}

/// Ring geometry for ringed planets (Saturn, Uranus), forwarded to the
/// renderer through the snapshot buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingInfo {
    pub inner_radius: f32,
    pub outer_radius: f32,
}

/// Fat body struct — one record per visualizable object with optional parts.
/// Designed for simplicity over ECS purity; the whole scene is a few hundred
/// bodies at most.
#[derive(Debug, Clone)]
pub struct Body {
    /// Unique identifier, assigned by the registry at `add()` time.
    /// `BodyId(0)` until registered.
    pub id: BodyId,
    /// Canonical lowercase name ("earth", "halley"), used for metadata
    /// lookups and the direct-select dropdown.
    pub name: String,
    pub kind: BodyKind,
    /// Position in display units.
    pub pos: Vec3,
    /// Display-orbit radius (distance from origin). Zero for the star.
    pub distance: f32,
    /// Angular position along the display orbit, radians.
    pub orbit_angle: f32,
    /// Display-orbit increment per tick, radians.
    pub orbit_speed: f32,
    /// Self-rotation angle, radians.
    pub spin_angle: f32,
    /// Self-rotation increment per tick, radians.
    pub spin_speed: f32,
    /// Visual/pick radius in display units.
    pub radius: f32,
    /// Whether this body's angular state advances. Toggled by clicking.
    pub rotating: bool,
    /// Render-mode visibility (the body stays registered either way).
    pub visible: bool,
    pub ring: Option<RingInfo>,
}

impl Body {
    /// Create a body of the given kind at the origin. Register it with
    /// `Registry::add` to receive a real id.
    pub fn new(name: impl Into<String>, kind: BodyKind) -> Self {
        Self {
            id: BodyId(0),
            name: name.into(),
            kind,
            pos: Vec3::ZERO,
            distance: 0.0,
            orbit_angle: 0.0,
            orbit_speed: 0.0,
            spin_angle: 0.0,
            spin_speed: 0.0,
            radius: 1.0,
            rotating: true,
            visible: true,
            ring: None,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    /// Place the body on a circular display orbit of the given radius.
    /// Position is derived from `distance` and `orbit_angle` on each tick.
    pub fn with_orbit(mut self, distance: f32, orbit_speed: f32) -> Self {
        self.distance = distance;
        self.orbit_speed = orbit_speed;
        self.pos = Vec3::new(distance, 0.0, 0.0);
        self
    }

    /// Set the starting angle along the display orbit (call after
    /// `with_orbit` so the position lands on the circle immediately).
    pub fn with_orbit_angle(mut self, angle: f32) -> Self {
        self.orbit_angle = angle;
        self.pos = Vec3::new(
            self.distance * angle.cos(),
            self.pos.y,
            self.distance * angle.sin(),
        );
        self
    }

    pub fn with_spin(mut self, spin_speed: f32) -> Self {
        self.spin_speed = spin_speed;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_ring(mut self, inner_radius: f32, outer_radius: f32) -> Self {
        self.ring = Some(RingInfo { inner_radius, outer_radius });
        self
    }
}
