/// Something the page reported since the last simulation step.
///
/// Pointer positions are canvas pixels with the origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// Focus left the canvas; anything held counts as released.
    Blur,
    /// Page-defined event, e.g. an overlay button. The game gives `kind`
    /// and the three payload slots their meaning.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events waiting for the next `Game::update`, oldest first.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.pending.iter()
    }

    /// Forget everything once an update has seen it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
