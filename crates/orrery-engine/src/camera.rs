//! 3D orbit camera: projection, pick rays, and damped follow movement.
//!
//! The camera keeps a free world-space position so the follow controller can
//! interpolate it directly; orbit/pan/zoom reconstruct the position around
//! the current target.

use glam::{Vec2, Vec3};

/// Projection result from 3D to 2D.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// 2D screen position.
    pub pos: Vec2,
    /// Distance along the view direction (positive = in front of camera).
    pub depth: f32,
    /// Scale factor for depth-based sizing.
    pub scale: f32,
}

/// A world-space pick ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Distance along the ray to the nearest intersection with a sphere,
    /// or None on a miss. Intersections behind the origin do not count.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let along = to_center.dot(self.dir);
        if along < 0.0 {
            return None;
        }
        let closest_sq = to_center.length_squared() - along * along;
        let r_sq = radius * radius;
        if closest_sq > r_sq {
            return None;
        }
        let half_chord = (r_sq - closest_sq).sqrt();
        let t = along - half_chord;
        if t >= 0.0 { Some(t) } else { Some(along + half_chord) }
    }
}

/// Orbit camera for viewing the scene.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// World-space position.
    pub pos: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    /// Screen dimensions for projection.
    pub screen_width: f32,
    pub screen_height: f32,
    /// Whether user orbit/pan/zoom input is honored. The follow controller
    /// clears this while it owns the camera.
    pub controls_enabled: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            pos: Self::HOME_POS,
            target: Vec3::ZERO,
            fov_y: 45.0_f32.to_radians(),
            screen_width: 1280.0,
            screen_height: 720.0,
            controls_enabled: true,
        }
    }
}

impl OrbitCamera {
    /// Starting viewpoint: above and behind the ecliptic, sun centered.
    pub const HOME_POS: Vec3 = Vec3::new(-90.0, 140.0, 140.0);

    const ORBIT_SENSITIVITY: f32 = 0.008;
    const ZOOM_SPEED: f32 = 0.1;
    const MIN_DISTANCE: f32 = 30.0;
    const MAX_DISTANCE: f32 = 800.0;
    /// Elevation clamp (~85 degrees) to avoid gimbal flip at the poles.
    const MAX_ELEVATION: f32 = 1.48;

    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Default::default()
        }
    }

    /// Update screen dimensions on viewport resize.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Distance from the look target.
    pub fn distance(&self) -> f32 {
        (self.pos - self.target).length()
    }

    /// View basis: (right, up, forward). Forward points at the target.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.pos).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// Orbit around the target by pointer delta. No-op while controls are
    /// disabled (follow mode owns the camera).
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if !self.controls_enabled {
            return;
        }
        let rel = self.pos - self.target;
        let len = rel.length().max(1e-6);
        let azimuth = rel.z.atan2(rel.x) + dx * Self::ORBIT_SENSITIVITY;
        let elevation = (rel.y / len).asin() + dy * Self::ORBIT_SENSITIVITY;
        let elevation = elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        self.pos = self.target
            + len
                * Vec3::new(
                    elevation.cos() * azimuth.cos(),
                    elevation.sin(),
                    elevation.cos() * azimuth.sin(),
                );
    }

    /// Pan target and position together in the view plane.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.controls_enabled {
            return;
        }
        let (right, up, _) = self.basis();
        // Scale pan speed by distance for consistent feel.
        let scale = self.distance() * 0.002;
        let shift = right * (-dx * scale) + up * (dy * scale);
        self.pos += shift;
        self.target += shift;
    }

    /// Zoom toward/away from the target (positive = zoom in).
    pub fn zoom(&mut self, delta: f32) {
        if !self.controls_enabled {
            return;
        }
        let dist = (self.distance() * (1.0 - delta * Self::ZOOM_SPEED))
            .clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
        let dir = (self.pos - self.target).normalize_or(Vec3::Z);
        self.pos = self.target + dir * dist;
    }

    /// Return to the home viewpoint and re-enable controls.
    pub fn reset(&mut self) {
        self.pos = Self::HOME_POS;
        self.target = Vec3::ZERO;
        self.controls_enabled = true;
    }

    /// Move one damped step toward `follow_pos`, looking at `look_at`.
    /// Exponential approach: each step covers `damping` of the remaining
    /// distance, so it never converges exactly — callers terminate on a
    /// distance threshold. Returns the remaining distance after the step.
    pub fn follow_step(&mut self, follow_pos: Vec3, look_at: Vec3, damping: f32) -> f32 {
        self.pos = self.pos.lerp(follow_pos, damping);
        self.target = look_at;
        (follow_pos - self.pos).length()
    }

    /// Project a world position to screen coordinates.
    pub fn project(&self, world: Vec3) -> Projection {
        let (right, up, forward) = self.basis();
        let rel = world - self.pos;
        let depth = rel.dot(forward);
        let safe_depth = depth.max(0.1);

        // Perspective scale: screen pixels per world unit at this depth.
        let half_h = self.screen_height / 2.0;
        let scale = half_h / ((self.fov_y / 2.0).tan() * safe_depth);

        Projection {
            pos: Vec2::new(
                self.screen_width / 2.0 + rel.dot(right) * scale,
                half_h - rel.dot(up) * scale,
            ),
            depth,
            scale,
        }
    }

    /// Build the world-space pick ray through a screen point.
    pub fn pick_ray(&self, screen: Vec2) -> Ray {
        let (right, up, forward) = self.basis();
        let half_h = self.screen_height / 2.0;
        let tan = (self.fov_y / 2.0).tan();
        let ndc_x = (screen.x - self.screen_width / 2.0) / half_h;
        let ndc_y = (half_h - screen.y) / half_h;
        let dir = (forward + right * (ndc_x * tan) + up * (ndc_y * tan)).normalize();
        Ray { origin: self.pos, dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_target_lands_at_screen_center() {
        let cam = OrbitCamera::new(800.0, 600.0);
        let proj = cam.project(Vec3::ZERO);
        assert!((proj.pos.x - 400.0).abs() < 1.0, "x = {}", proj.pos.x);
        assert!((proj.pos.y - 300.0).abs() < 1.0, "y = {}", proj.pos.y);
        assert!(proj.depth > 0.0);
    }

    #[test]
    fn closer_points_project_larger() {
        let mut cam = OrbitCamera::new(800.0, 600.0);
        cam.pos = Vec3::new(0.0, 0.0, 200.0);
        cam.target = Vec3::ZERO;
        let near = cam.project(Vec3::new(0.0, 0.0, 100.0));
        let far = cam.project(Vec3::new(0.0, 0.0, -100.0));
        assert!(near.scale > far.scale);
    }

    #[test]
    fn center_ray_hits_target_sphere() {
        let cam = OrbitCamera::new(800.0, 600.0);
        let ray = cam.pick_ray(Vec2::new(400.0, 300.0));
        let hit = ray.intersect_sphere(Vec3::ZERO, 16.0);
        assert!(hit.is_some());
        let t = hit.unwrap();
        let expected = cam.distance() - 16.0;
        assert!((t - expected).abs() < 0.5, "t = {t}, expected ~{expected}");
    }

    #[test]
    fn ray_misses_off_axis_sphere() {
        let cam = OrbitCamera::new(800.0, 600.0);
        let ray = cam.pick_ray(Vec2::new(400.0, 300.0));
        assert!(ray.intersect_sphere(Vec3::new(1000.0, 1000.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn spheres_behind_camera_do_not_hit() {
        let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, -50.0), 5.0).is_none());
    }

    #[test]
    fn orbit_preserves_distance() {
        let mut cam = OrbitCamera::default();
        let before = cam.distance();
        cam.orbit(25.0, -12.0);
        assert!((cam.distance() - before).abs() < 1e-2);
    }

    #[test]
    fn orbit_clamps_elevation() {
        let mut cam = OrbitCamera::default();
        cam.orbit(0.0, 1.0e5);
        let rel = cam.pos - cam.target;
        let elevation = (rel.y / rel.length()).asin();
        assert!(elevation.abs() <= 1.49);
    }

    #[test]
    fn controls_disabled_blocks_user_input() {
        let mut cam = OrbitCamera::default();
        cam.controls_enabled = false;
        let pos = cam.pos;
        cam.orbit(50.0, 50.0);
        cam.pan(50.0, 50.0);
        cam.zoom(1.0);
        assert_eq!(cam.pos, pos);
    }

    #[test]
    fn follow_step_decreases_distance_without_overshoot() {
        let mut cam = OrbitCamera::default();
        let target = Vec3::ZERO;
        cam.pos = Vec3::new(45.0, 0.0, 0.0);
        // follow_distance 20 → follow_pos 20 units from target, camera 25 out.
        let follow_pos = Vec3::new(20.0, 0.0, 0.0);
        let before = (follow_pos - cam.pos).length();
        let after = cam.follow_step(follow_pos, target, 0.05);
        assert!(after < before);
        assert!(after > 0.0);
    }

    #[test]
    fn reset_restores_home_view() {
        let mut cam = OrbitCamera::default();
        cam.orbit(100.0, 40.0);
        cam.zoom(3.0);
        cam.controls_enabled = false;
        cam.reset();
        assert_eq!(cam.pos, OrbitCamera::HOME_POS);
        assert_eq!(cam.target, Vec3::ZERO);
        assert!(cam.controls_enabled);
    }
}
