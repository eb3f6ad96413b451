//! Easing curves and entity tweens. Tweens address entities by id and only
//! touch `pos.y` and sprite alpha.

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{Tween, TweenId, TweenProperty, TweenRepeat, TweenState};
