//! Held-state trackers fed from the input queue.
//!
//! The queue carries edges (down, up, move); movement needs levels (is the
//! pointer held, which arrows are down). Games keep one tracker of each and
//! feed every event through `handle` at the start of `update`.

use std::collections::HashSet;
use glam::Vec2;
use crate::input::queue::InputEvent;

/// Browser `keyCode` values for the keys the engine knows by name.
pub mod keys {
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const E: u32 = 69;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
}

/// Whether the mouse button or a finger is held, and where (canvas pixels).
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    held: bool,
    screen: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from one event. Returns true when this event is a fresh press.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let fresh = !self.held;
                self.held = true;
                self.screen = Vec2::new(x, y);
                fresh
            }
            InputEvent::PointerMove { x, y } => {
                self.screen = Vec2::new(x, y);
                false
            }
            InputEvent::PointerUp { x, y } => {
                self.held = false;
                self.screen = Vec2::new(x, y);
                false
            }
            InputEvent::Blur => {
                self.held = false;
                false
            }
            _ => false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Last known pointer position in canvas pixels.
    pub fn screen(&self) -> Vec2 {
        self.screen
    }
}

/// Set of keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    held: HashSet<u32>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from one event. Returns the key code on a fresh press;
    /// browser auto-repeat of a held key returns `None`.
    pub fn handle(&mut self, event: &InputEvent) -> Option<u32> {
        match *event {
            InputEvent::KeyDown { key_code } => self.held.insert(key_code).then_some(key_code),
            InputEvent::KeyUp { key_code } => {
                self.held.remove(&key_code);
                None
            }
            InputEvent::Blur => {
                self.held.clear();
                None
            }
            _ => None,
        }
    }

    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    fn any_held(&self, codes: &[u32]) -> bool {
        codes.iter().any(|code| self.held.contains(code))
    }

    /// Arrow/WASD direction with each axis in {-1, 0, 1}, Y-down.
    /// Opposite keys cancel. The result is not normalized.
    pub fn arrow_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.any_held(&[keys::LEFT, keys::A]) {
            axis.x -= 1.0;
        }
        if self.any_held(&[keys::RIGHT, keys::D]) {
            axis.x += 1.0;
        }
        if self.any_held(&[keys::UP, keys::W]) {
            axis.y -= 1.0;
        }
        if self.any_held(&[keys::DOWN, keys::S]) {
            axis.y += 1.0;
        }
        axis
    }
}
