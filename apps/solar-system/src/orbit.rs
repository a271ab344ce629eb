/// Keplerian orbital mechanics — pure math, no engine dependencies.
///
/// Uses f64 throughout for precision; only convert to f32 at the final
/// display-coordinate step in game.rs.

use glam::DVec3;
use thiserror::Error;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Keplerian orbital elements of a single body, as published in the comet
/// dataset. Angles in degrees, distances in AU. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Eccentricity, must be in [0, 1) — parabolic/hyperbolic unsupported.
    pub e: f64,
    /// Perihelion distance (AU), must be positive.
    pub q: f64,
    /// Inclination of the orbital plane (degrees).
    pub i_deg: f64,
    /// Argument of periapsis (degrees).
    pub w_deg: f64,
    /// Longitude of the ascending node (degrees).
    pub node_deg: f64,
    /// Mean anomaly (radians). The dataset carries no anomaly, so ingestion
    /// fixes this at 0 — every computed position is an epoch snapshot at
    /// perihelion, not advanced over time.
    pub m: f64,
}

/// Orbits the solver cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OrbitError {
    #[error("eccentricity {0} out of range: only elliptic orbits (e < 1) are supported")]
    Eccentricity(f64),
    #[error("perihelion distance {0} must be positive")]
    Perihelion(f64),
}

/// Semi-major axis from perihelion distance and eccentricity: a = q / (1 - e).
/// Diverges as e approaches 1, which is why e >= 1 is a domain error.
pub fn semi_major_axis(q: f64, e: f64) -> f64 {
    q / (1.0 - e)
}

/// Compute a heliocentric 3D position from orbital elements, multiplied by
/// `scale` for display-unit conversion.
///
/// The Kepler solve is the single-term approximation E = M + e·sin M, not a
/// Newton iteration — exact at the M = 0 epoch this system uses, and
/// intentionally nothing more. Callers wanting motion must re-invoke with an
/// updated mean anomaly.
///
/// Pure function: no state, bit-identical output for identical input, safe
/// to call repeatedly or concurrently.
pub fn compute_position(elements: &OrbitalElements, scale: f64) -> Result<DVec3, OrbitError> {
    if !(0.0..1.0).contains(&elements.e) {
        return Err(OrbitError::Eccentricity(elements.e));
    }
    if elements.q <= 0.0 {
        return Err(OrbitError::Perihelion(elements.q));
    }

    let a = semi_major_axis(elements.q, elements.e);
    let e = elements.e;

    // First-order Kepler solve.
    let ea = elements.m + e * elements.m.sin();

    // Position in the orbital plane.
    let x0 = a * (ea.cos() - e);
    let y0 = a * (1.0 - e * e).sqrt() * ea.sin();

    // Standard orbital → ecliptic rotation by i, w, Ω. The y0 terms vanish
    // at M = 0 but are kept so a future anomaly-aware caller gets correct
    // positions along the whole ellipse.
    let (sin_i, cos_i) = (elements.i_deg * DEG_TO_RAD).sin_cos();
    let (sin_w, cos_w) = (elements.w_deg * DEG_TO_RAD).sin_cos();
    let (sin_node, cos_node) = (elements.node_deg * DEG_TO_RAD).sin_cos();

    let x = x0 * (cos_node * cos_w - sin_node * sin_w * cos_i)
        - y0 * (cos_node * sin_w + sin_node * cos_w * cos_i);
    let y = x0 * (sin_node * cos_w + cos_node * sin_w * cos_i)
        - y0 * (sin_node * sin_w - cos_node * cos_w * cos_i);
    let z = x0 * (sin_w * sin_i) + y0 * (cos_w * sin_i);

    Ok(DVec3::new(x, y, z) * scale)
}
