/// Input event types the engine understands.
/// Generic — no orrery-specific semantics.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at screen coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at screen coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Scroll wheel delta (positive = zoom in).
    Wheel { delta: f32 },
    /// A custom event from the UI layer (dropdowns, reset button, resize).
    /// `kind` identifies the event; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
///
/// JS writes events into the queue; the runner presents the queue to exactly
/// one update step and drains it right after. One gesture, one dispatch —
/// there is no per-gesture listener registration that could double-fire.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
