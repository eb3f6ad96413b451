use glam::Vec2;
use crate::extensions::easing::Easing;

/// Tween that slides the camera centre toward a goal.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CameraTween {
    from: Vec2,
    to: Vec2,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

/// 2D camera over a Y-down world.
///
/// The page renderer reads `center`, `width` and `height` to build its
/// projection; the game uses the camera to follow the player and to turn
/// canvas pointer positions into world positions.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Camera center position in world space.
    center: Vec2,
    /// Optional world bounds (min, max) the viewport must stay inside.
    bounds: Option<(Vec2, Vec2)>,
    /// Canvas pixels per world unit, set by `resize`.
    pixels_per_unit: f32,
    tween: Option<CameraTween>,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::ZERO,
            bounds: None,
            pixels_per_unit: 1.0,
            tween: None,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Resize the camera viewport (e.g. on window resize).
    /// Fits the game area inside the canvas and keeps the canvas aspect ratio.
    pub fn resize(
        &mut self,
        viewport_width: f32,
        viewport_height: f32,
        game_width: f32,
        game_height: f32,
    ) {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return;
        }
        let horiz_ratio = viewport_width / game_width;
        let vert_ratio = viewport_height / game_height;
        let scale = horiz_ratio.min(vert_ratio);
        self.width = viewport_width / scale;
        self.height = viewport_height / scale;
        self.pixels_per_unit = scale;
        self.clamp_to_bounds();
    }

    /// Set world bounds for camera clamping.
    pub fn set_bounds(&mut self, min: Vec2, max: Vec2) {
        self.bounds = Some((min, max));
        self.clamp_to_bounds();
    }

    /// Snap the camera to the target, cancelling any follow tween.
    pub fn look_at(&mut self, target: Vec2) {
        self.tween = None;
        self.center = target;
        self.clamp_to_bounds();
    }

    /// Glide toward `target` over `duration` seconds.
    ///
    /// Called every frame with the followed entity's position. Whenever the
    /// target moves a fresh tween starts from the current centre, so a moving
    /// target is chased smoothly and a still one is reached in `duration`.
    /// The goal is clamped first, so a target pressed against the level edge
    /// counts as reached once the view stops at that edge.
    pub fn follow(&mut self, target: Vec2, duration: f32, easing: Easing) {
        let target = self.clamped(target);
        if self.center == target {
            self.tween = None;
            return;
        }
        if let Some(tween) = &self.tween {
            if tween.to == target {
                return;
            }
        }
        self.tween = Some(CameraTween {
            from: self.center,
            to: target,
            elapsed: 0.0,
            duration,
            easing,
        });
    }

    /// Advance the follow tween.
    pub fn tick(&mut self, dt: f32) {
        let Some(mut tween) = self.tween.take() else {
            return;
        };
        tween.elapsed += dt;
        let t = if tween.duration > 0.0 {
            (tween.elapsed / tween.duration).min(1.0)
        } else {
            1.0
        };
        self.center = tween.easing.between_vec2(tween.from, tween.to, t);
        if t < 1.0 {
            self.tween = Some(tween);
        }
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        self.center = self.clamped(self.center);
    }

    /// Where the centre would end up for `point` once the view is kept inside
    /// the bounds. An axis on which the view is wider than the bounds is centred.
    fn clamped(&self, point: Vec2) -> Vec2 {
        let Some((min, max)) = self.bounds else {
            return point;
        };
        let half = Vec2::new(self.width, self.height) / 2.0;
        let axis = |p: f32, view: f32, lo: f32, hi: f32, half: f32| {
            if view >= hi - lo {
                (lo + hi) / 2.0
            } else {
                p.clamp(lo + half, hi - half)
            }
        };
        Vec2::new(
            axis(point.x, self.width, min.x, max.x, half.x),
            axis(point.y, self.height, min.y, max.y, half.y),
        )
    }

    /// World-space rectangle currently in view, as (min, max).
    pub fn view_rect(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(self.width, self.height) / 2.0;
        (self.center - half, self.center + half)
    }

    /// Convert a canvas position (pixels, origin top-left) to world space.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let (min, _) = self.view_rect();
        min + screen / self.pixels_per_unit
    }
}
