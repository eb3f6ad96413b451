//! Per-entity property animation.
//!
//! A room needs two kinds: props that bob on the Y axis forever, and
//! sprites that fade in once. Tweens are keyed by `EntityId` and dropped as
//! soon as their entity leaves the scene.

use crate::api::types::EntityId;
use crate::core::scene::Scene;
use super::easing::Easing;

/// The entity property a tween drives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenProperty {
    /// `Entity::pos.y`.
    Y,
    /// Sprite alpha; entities without a sprite are left alone.
    Alpha,
}

/// What a tween does after reaching its end value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenRepeat {
    #[default]
    Once,
    /// Swing back to the start value, then forth again, forever.
    PingPong,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub property: TweenProperty,
    pub from: f32,
    pub to: f32,
    /// Seconds for one leg.
    pub duration: f32,
    pub easing: Easing,
    pub repeat: TweenRepeat,
    elapsed: f32,
    reversed: bool,
}

impl Tween {
    fn new(property: TweenProperty, from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            property,
            from,
            to,
            duration,
            easing,
            repeat: TweenRepeat::Once,
            elapsed: 0.0,
            reversed: false,
        }
    }

    pub fn position_y(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenProperty::Y, from, to, duration, easing)
    }

    /// Alpha from 0 to 1.
    pub fn fade_in(duration: f32, easing: Easing) -> Self {
        Self::new(TweenProperty::Alpha, 0.0, 1.0, duration, easing)
    }

    pub fn ping_pong(mut self) -> Self {
        self.repeat = TweenRepeat::PingPong;
        self
    }

    /// Advance by `dt` and return the current value, plus whether a
    /// `Once` tween has finished.
    fn advance(&mut self, dt: f32) -> (f32, bool) {
        self.elapsed += dt;
        let leg_done = self.duration <= 0.0 || self.elapsed >= self.duration;
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        let (start, end) = if self.reversed {
            (self.to, self.from)
        } else {
            (self.from, self.to)
        };
        let value = self.easing.between(start, end, t);

        if !leg_done {
            return (value, false);
        }
        match self.repeat {
            TweenRepeat::Once => (value, true),
            TweenRepeat::PingPong => {
                // Carry the overshoot into the next leg so the period stays exact.
                self.elapsed = (self.elapsed - self.duration).max(0.0);
                self.reversed = !self.reversed;
                (value, false)
            }
        }
    }
}

/// Handle returned by `TweenState::add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Every running tween, in the order they were added.
#[derive(Debug, Default)]
pub struct TweenState {
    running: Vec<(TweenId, EntityId, Tween)>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.running.push((id, entity, tween));
        id
    }

    /// Stop a tween, leaving the property at its current value.
    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.running.len();
        self.running.retain(|(tween_id, _, _)| *tween_id != id);
        self.running.len() != before
    }

    pub fn remove_entity(&mut self, entity: EntityId) {
        self.running.retain(|(_, owner, _)| *owner != entity);
    }

    /// Advance every tween and write its value into the scene.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) {
        self.running.retain_mut(|(_, owner, tween)| {
            let Some(entity) = scene.get_mut(*owner) else {
                return false;
            };
            let (value, finished) = tween.advance(dt);
            match tween.property {
                TweenProperty::Y => entity.pos.y = value,
                TweenProperty::Alpha => {
                    if let Some(sprite) = entity.sprite.as_mut() {
                        sprite.alpha = value;
                    }
                }
            }
            !finished
        });
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }
}
