use glam::Vec3;

use crate::api::types::BodyId;
use crate::core::body::{Body, BodyKind};

/// Body storage using a flat Vec.
/// Designed for small scenes (hundreds of bodies, not millions).
///
/// The registry owns all mutable per-body runtime state — rotation toggles,
/// angular offsets, orbital speeds. Ids are assigned here at registration and
/// are the only handle the rest of the system uses.
pub struct Registry {
    bodies: Vec<Body>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(128),
            next_id: 1,
        }
    }

    /// Register a body, assigning it a unique id. Returns the handle.
    pub fn add(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Remove a body by id. Returns the removed body if found.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.swap_remove(idx))
    }

    /// Get a reference to a body by id.
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Get a mutable reference to a body by id.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Find the first body matching a predicate.
    pub fn find(&self, pred: impl Fn(&Body) -> bool) -> Option<&Body> {
        self.bodies.iter().find(|b| pred(b))
    }

    /// Find a body by its canonical lowercase name.
    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Iterate over all bodies.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Iterate over all bodies mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Number of registered bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Remove all bodies of a given kind (used when re-ingesting a dataset).
    pub fn remove_kind(&mut self, kind: BodyKind) {
        self.bodies.retain(|b| b.kind != kind);
    }

    /// Flip a body's `rotating` flag. Purely presentational: a frozen body
    /// stops advancing its angular state but stays picked up by everything
    /// else (picking, snapshot, metadata).
    pub fn toggle_rotation(&mut self, id: BodyId) {
        if let Some(body) = self.get_mut(id) {
            body.rotating = !body.rotating;
            log::debug!("body {} rotating={}", body.name, body.rotating);
        }
    }

    /// Scale every body's orbit and spin speed by `factor`.
    ///
    /// Applied cumulatively: calling this twice with 2.0 quadruples the
    /// original speeds. Callers switching between named speed presets must
    /// send the ratio between presets, not the preset value itself.
    pub fn set_speed_multiplier(&mut self, factor: f32) {
        for body in &mut self.bodies {
            body.orbit_speed *= factor;
            body.spin_speed *= factor;
        }
    }

    /// Show or hide every body of the given kind.
    pub fn set_kind_visible(&mut self, kind: BodyKind, visible: bool) {
        for body in &mut self.bodies {
            if body.kind == kind {
                body.visible = visible;
            }
        }
    }

    /// Advance angular state by exactly one tick's increment.
    ///
    /// Idempotent per tick: N calls advance each angle by exactly N times its
    /// increment, so there is no drift beyond float accumulation. Bodies with
    /// a display orbit get their position recomputed from the new angle;
    /// comets keep their solver-computed epoch position.
    pub fn advance(&mut self) {
        for body in &mut self.bodies {
            if !body.rotating {
                continue;
            }
            body.spin_angle += body.spin_speed;
            body.orbit_angle += body.orbit_speed;
            if body.kind.orbits() {
                body.pos = Vec3::new(
                    body.distance * body.orbit_angle.cos(),
                    body.pos.y,
                    body.distance * body.orbit_angle.sin(),
                );
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(name: &str, distance: f32, orbit_speed: f32) -> Body {
        Body::new(name, BodyKind::Planet)
            .with_orbit(distance, orbit_speed)
            .with_spin(0.02)
            .with_radius(5.0)
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut reg = Registry::new();
        let a = reg.add(planet("earth", 62.0, 0.01));
        let b = reg.add(planet("mars", 78.0, 0.008));
        assert_ne!(a, b);
        assert_eq!(reg.get(a).unwrap().name, "earth");
        assert_eq!(reg.find_by_name("mars").unwrap().id, b);
    }

    #[test]
    fn toggle_rotation_twice_restores_state() {
        let mut reg = Registry::new();
        let id = reg.add(planet("earth", 62.0, 0.01));
        assert!(reg.get(id).unwrap().rotating);
        reg.toggle_rotation(id);
        assert!(!reg.get(id).unwrap().rotating);
        reg.toggle_rotation(id);
        assert!(reg.get(id).unwrap().rotating);
    }

    #[test]
    fn frozen_body_does_not_advance() {
        let mut reg = Registry::new();
        let id = reg.add(planet("earth", 62.0, 0.01));
        reg.toggle_rotation(id);
        reg.advance();
        let body = reg.get(id).unwrap();
        assert_eq!(body.orbit_angle, 0.0);
        assert_eq!(body.spin_angle, 0.0);
    }

    #[test]
    fn advance_is_idempotent_per_tick() {
        let mut reg = Registry::new();
        let id = reg.add(planet("earth", 62.0, 0.01));
        for _ in 0..100 {
            reg.advance();
        }
        let angle = reg.get(id).unwrap().orbit_angle;
        assert!((angle - 100.0 * 0.01).abs() < 1e-5, "angle = {angle}");
    }

    #[test]
    fn speed_multiplier_identity() {
        let mut reg = Registry::new();
        let id = reg.add(planet("earth", 62.0, 0.01));
        reg.set_speed_multiplier(1.0);
        assert_eq!(reg.get(id).unwrap().orbit_speed, 0.01);
    }

    #[test]
    fn speed_multiplier_compounds() {
        // Documented footgun: repeated application multiplies, it does not set.
        let mut reg = Registry::new();
        let id = reg.add(planet("earth", 62.0, 0.01));
        reg.set_speed_multiplier(2.0);
        reg.set_speed_multiplier(2.0);
        let body = reg.get(id).unwrap();
        assert!((body.orbit_speed - 0.04).abs() < 1e-9);
        assert!((body.spin_speed - 0.08).abs() < 1e-9);
    }

    #[test]
    fn comet_position_is_not_resimulated() {
        let mut reg = Registry::new();
        let pos = Vec3::new(10.0, 5.0, -3.0);
        let id = reg.add(Body::new("halley", BodyKind::Comet).with_pos(pos).with_spin(0.01));
        for _ in 0..10 {
            reg.advance();
        }
        let body = reg.get(id).unwrap();
        assert_eq!(body.pos, pos);
        // Self-rotation still runs.
        assert!(body.spin_angle > 0.0);
    }

    #[test]
    fn kind_visibility_filters() {
        let mut reg = Registry::new();
        let p = reg.add(planet("earth", 62.0, 0.01));
        let a = reg.add(Body::new("belt-0", BodyKind::Asteroid).with_orbit(90.0, 0.002));
        reg.set_kind_visible(BodyKind::Asteroid, false);
        assert!(reg.get(p).unwrap().visible);
        assert!(!reg.get(a).unwrap().visible);
    }

    #[test]
    fn remove_kind_clears_comets_only() {
        let mut reg = Registry::new();
        reg.add(planet("earth", 62.0, 0.01));
        reg.add(Body::new("c1", BodyKind::Comet));
        reg.add(Body::new("c2", BodyKind::Comet));
        reg.remove_kind(BodyKind::Comet);
        assert_eq!(reg.len(), 1);
    }
}
