/// Static body catalog — sizes, orbit distances, and per-tick rates.
///
/// Sizes and distances are exaggerated for readability (real proportions
/// would put every planet sub-pixel); rates are tuned so Mercury visibly
/// laps the outer planets.

/// Visual and orbital properties for one planet.
pub struct PlanetSpec {
    /// Canonical lowercase name, also the metadata-lookup key.
    pub name: &'static str,
    /// Visual radius in display units.
    pub radius: f32,
    /// Display-orbit radius.
    pub distance: f32,
    /// Self-rotation per tick, radians.
    pub spin_speed: f32,
    /// Orbit advance per tick, radians.
    pub orbit_speed: f32,
    /// (inner, outer) ring radii for ringed planets.
    pub ring: Option<(f32, f32)>,
}

pub const PLANET_COUNT: usize = 9;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 16.0;
pub const SUN_SPIN_SPEED: f32 = 0.004;

// ── Planets ──────────────────────────────────────────────────────────

pub const PLANETS: [PlanetSpec; PLANET_COUNT] = [
    PlanetSpec { name: "mercury", radius: 3.2,  distance: 28.0,  spin_speed: 0.004, orbit_speed: 0.04,    ring: None },
    PlanetSpec { name: "venus",   radius: 5.8,  distance: 44.0,  spin_speed: 0.002, orbit_speed: 0.015,   ring: None },
    PlanetSpec { name: "earth",   radius: 6.0,  distance: 62.0,  spin_speed: 0.02,  orbit_speed: 0.01,    ring: None },
    PlanetSpec { name: "mars",    radius: 4.0,  distance: 78.0,  spin_speed: 0.018, orbit_speed: 0.008,   ring: None },
    PlanetSpec { name: "jupiter", radius: 12.0, distance: 100.0, spin_speed: 0.04,  orbit_speed: 0.002,   ring: None },
    PlanetSpec { name: "saturn",  radius: 10.0, distance: 138.0, spin_speed: 0.038, orbit_speed: 0.0009,  ring: Some((10.0, 20.0)) },
    PlanetSpec { name: "uranus",  radius: 7.0,  distance: 176.0, spin_speed: 0.03,  orbit_speed: 0.0004,  ring: Some((7.0, 12.0)) },
    PlanetSpec { name: "neptune", radius: 7.0,  distance: 200.0, spin_speed: 0.032, orbit_speed: 0.0001,  ring: None },
    PlanetSpec { name: "pluto",   radius: 2.8,  distance: 216.0, spin_speed: 0.008, orbit_speed: 0.00007, ring: None },
];

// ── Comets ───────────────────────────────────────────────────────────

/// Display units per AU for solver-computed comet positions. Brings typical
/// perihelia (q ≈ 0.3–1.5 AU) inside the planet band.
pub const COMET_DISPLAY_SCALE: f64 = 60.0;
pub const COMET_RADIUS: f32 = 1.8;
pub const COMET_SPIN_SPEED: f32 = 0.01;

// ── Asteroid field ───────────────────────────────────────────────────

pub const ASTEROID_COUNT: usize = 50;
/// Belt between the Mars and Jupiter display orbits.
pub const ASTEROID_DIST_MIN: f32 = 84.0;
pub const ASTEROID_DIST_MAX: f32 = 96.0;

/// One asteroid in the belt.
pub struct AsteroidSpec {
    pub distance: f32,
    pub radius: f32,
    pub orbit_angle: f32,
    pub orbit_speed: f32,
    pub spin_speed: f32,
}

/// Deterministic hash for asteroid generation (no external rand crate).
pub fn asteroid_hash(seed: u32) -> u32 {
    let mut n = seed;
    n = n.wrapping_mul(2654435761);
    n ^= n >> 16;
    n = n.wrapping_mul(2246822519);
    n ^= n >> 13;
    n
}

/// Generate the belt with deterministic pseudo-random spread, so the field
/// is identical on every load without carrying a rand dependency.
pub fn generate_asteroids() -> Vec<AsteroidSpec> {
    let frac = |h: u32| (h as f32) / (u32::MAX as f32);

    let mut asteroids = Vec::with_capacity(ASTEROID_COUNT);
    for i in 0..ASTEROID_COUNT {
        let h1 = asteroid_hash(i as u32 * 7 + 31);
        let h2 = asteroid_hash(i as u32 * 13 + 97);
        let h3 = asteroid_hash(i as u32 * 19 + 151);
        let h4 = asteroid_hash(i as u32 * 23 + 211);

        let distance = ASTEROID_DIST_MIN + frac(h1) * (ASTEROID_DIST_MAX - ASTEROID_DIST_MIN);
        // Farther asteroids orbit slower, roughly bracketing the Mars and
        // Jupiter rates.
        let t = (distance - ASTEROID_DIST_MIN) / (ASTEROID_DIST_MAX - ASTEROID_DIST_MIN);
        let orbit_speed = 0.006 - t * 0.003;

        asteroids.push(AsteroidSpec {
            distance,
            radius: 0.6 + frac(h2) * 0.9,
            orbit_angle: frac(h3) * std::f32::consts::TAU,
            orbit_speed,
            spin_speed: 0.01 + frac(h4) * 0.02,
        });
    }
    asteroids
}
