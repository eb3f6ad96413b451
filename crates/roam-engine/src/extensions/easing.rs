//! Easing curves shared by the camera follow and entity tweens.

use glam::Vec2;
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed; the camera follow uses this.
    #[default]
    Linear,
    /// Decelerating, for quick fades.
    QuadOut,
    /// Slow at both ends, for floating props.
    SineInOut,
}

impl Easing {
    /// Map linear progress `t` (clamped to [0, 1]) onto this curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::SineInOut => (1.0 - (PI * t).cos()) * 0.5,
        }
    }

    /// Value between `from` and `to` at progress `t`.
    pub fn between(self, from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * self.apply(t)
    }

    pub fn between_vec2(self, from: Vec2, to: Vec2, t: f32) -> Vec2 {
        from.lerp(to, self.apply(t))
    }
}
