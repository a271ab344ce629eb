/// Fixed timestep accumulator.
///
/// The display refresh drives `tick()` with a variable frame delta; body
/// state must still advance in whole, even increments so the per-tick
/// angular update stays idempotent. The accumulator converts frame time
/// into a count of fixed steps to run.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

/// Cap on catch-up steps per frame, so a background tab resuming after
/// seconds of inactivity does not stall the loop.
const MAX_STEPS_PER_FRAME: f32 = 10.0;

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self { dt, accumulator: 0.0 }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
