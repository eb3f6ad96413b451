//! Animation component for sprite-sheet frame sequences.
//!
//! A sheet is an atlas sliced into equal cells; frames are addressed either
//! by (col, row) or by a linear frame index counted left-to-right,
//! top-to-bottom.

use std::collections::HashMap;

/// Default playback rate for sheet ranges, in frames per second.
pub const DEFAULT_FPS: f32 = 10.0;

/// Convert a linear frame index into a (col, row) cell of a sheet with `cols` columns.
pub fn frame_to_cell(frame: u32, cols: u32) -> (f32, f32) {
    let cols = cols.max(1);
    ((frame % cols) as f32, (frame / cols) as f32)
}

/// Definition of a single animation sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    /// Frame cells as (col, row) pairs in the atlas.
    pub frames: Vec<(f32, f32)>,
    /// Seconds per frame.
    pub frame_duration: f32,
    /// Whether to loop when reaching the end.
    pub looping: bool,
}

impl AnimationDef {
    /// Inclusive range of linear frame indices on a sheet with `cols` columns.
    /// A reversed range (`from > to`) plays backwards.
    pub fn sheet_range(cols: u32, from: u32, to: u32, fps: f32, looping: bool) -> Self {
        let indices: Vec<u32> = if from <= to {
            (from..=to).collect()
        } else {
            (to..=from).rev().collect()
        };
        Self {
            frames: indices.into_iter().map(|i| frame_to_cell(i, cols)).collect(),
            frame_duration: 1.0 / fps.max(f32::EPSILON),
            looping,
        }
    }

    /// A still frame (used for idle poses).
    pub fn still(cols: u32, frame: u32) -> Self {
        Self {
            frames: vec![frame_to_cell(frame, cols)],
            frame_duration: 1.0 / DEFAULT_FPS,
            looping: false,
        }
    }

    /// Get the number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Animation state for an entity.
#[derive(Debug, Clone)]
pub struct AnimationComponent {
    /// Named animations available for this entity.
    pub animations: HashMap<String, AnimationDef>,
    /// Currently playing animation name.
    current: String,
    /// Current frame index.
    pub frame_index: usize,
    /// Time accumulated in current frame.
    pub frame_timer: f32,
    /// Whether animation is playing (vs paused).
    pub playing: bool,
    /// Playback speed multiplier (1.0 = normal).
    pub speed: f32,
}

impl Default for AnimationComponent {
    fn default() -> Self {
        Self {
            animations: HashMap::new(),
            current: String::new(),
            frame_index: 0,
            frame_timer: 0.0,
            playing: true,
            speed: 1.0,
        }
    }
}

impl AnimationComponent {
    /// Create with a set of named animations, starting on `initial`.
    pub fn new(animations: HashMap<String, AnimationDef>, initial: &str) -> Self {
        let mut anim = Self {
            animations,
            ..Default::default()
        };
        anim.play(initial);
        anim
    }

    /// Create with a single default animation.
    pub fn single(name: impl Into<String>, def: AnimationDef) -> Self {
        let name = name.into();
        let mut animations = HashMap::new();
        animations.insert(name.clone(), def);
        Self::new(animations, &name)
    }

    /// Add an animation.
    pub fn add(&mut self, name: impl Into<String>, def: AnimationDef) {
        self.animations.insert(name.into(), def);
    }

    /// Name of the animation currently selected.
    pub fn current_name(&self) -> &str {
        &self.current
    }

    /// Play a named animation from the beginning.
    /// Returns false (and keeps the current animation) if the name is unknown.
    pub fn play(&mut self, name: &str) -> bool {
        if !self.animations.contains_key(name) {
            log::warn!("animation '{}' not found", name);
            return false;
        }
        self.current = name.to_string();
        self.frame_index = 0;
        self.frame_timer = 0.0;
        self.playing = true;
        true
    }

    /// Play animation only if it's different from current.
    pub fn play_if_different(&mut self, name: &str) {
        if self.current != name {
            self.play(name);
        }
    }

    /// Get current animation definition.
    pub fn current_def(&self) -> Option<&AnimationDef> {
        self.animations.get(&self.current)
    }

    /// Get current frame (col, row) for sprite rendering.
    pub fn current_frame(&self) -> Option<(f32, f32)> {
        self.current_def()
            .and_then(|def| def.frames.get(self.frame_index).copied())
    }

    /// Check if animation has finished (only meaningful for non-looping).
    pub fn is_finished(&self) -> bool {
        if let Some(def) = self.current_def() {
            !def.looping && self.frame_index >= def.frames.len().saturating_sub(1)
        } else {
            true
        }
    }

    /// Advance animation by dt seconds. Returns true if frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }

        let Some(def) = self.animations.get(&self.current) else {
            return false;
        };

        if def.frames.len() <= 1 {
            return false;
        }

        self.frame_timer += dt * self.speed;
        let mut frame_changed = false;

        while self.frame_timer >= def.frame_duration {
            self.frame_timer -= def.frame_duration;
            self.frame_index += 1;
            frame_changed = true;

            if self.frame_index >= def.frames.len() {
                if def.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = def.frames.len() - 1;
                    self.playing = false;
                    break;
                }
            }
        }

        frame_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_maps_to_cells() {
        assert_eq!(frame_to_cell(0, 4), (0.0, 0.0));
        assert_eq!(frame_to_cell(5, 4), (1.0, 1.0));
        assert_eq!(frame_to_cell(31, 4), (3.0, 7.0));
    }

    #[test]
    fn sheet_range_is_inclusive() {
        let def = AnimationDef::sheet_range(4, 8, 11, 10.0, true);
        assert_eq!(def.frame_count(), 4);
        assert_eq!(def.frames[0], (0.0, 2.0));
        assert_eq!(def.frames[3], (3.0, 2.0));
        assert!((def.frame_duration - 0.1).abs() < 1e-6);
    }

    #[test]
    fn reversed_range_plays_backwards() {
        let def = AnimationDef::sheet_range(4, 3, 0, 10.0, true);
        assert_eq!(def.frames.first(), Some(&(3.0, 0.0)));
        assert_eq!(def.frames.last(), Some(&(0.0, 0.0)));
    }

    #[test]
    fn animation_ticks_through_frames() {
        let def = AnimationDef::sheet_range(4, 0, 3, 10.0, true);
        let mut anim = AnimationComponent::single("walk", def);

        assert_eq!(anim.current_frame(), Some((0.0, 0.0)));

        anim.tick(0.15);
        assert_eq!(anim.frame_index, 1);
        assert_eq!(anim.current_frame(), Some((1.0, 0.0)));

        anim.tick(0.3);
        assert_eq!(anim.frame_index, 0); // Looped back
    }

    #[test]
    fn non_looping_animation_stops() {
        let def = AnimationDef::sheet_range(4, 0, 2, 10.0, false);
        let mut anim = AnimationComponent::single("blink", def);

        anim.tick(0.35);
        assert!(anim.is_finished());
        assert!(!anim.playing);
        assert_eq!(anim.frame_index, 2);
    }

    #[test]
    fn still_frame_never_advances() {
        let mut anim = AnimationComponent::single("walk-up-idle", AnimationDef::still(4, 16));
        assert!(!anim.tick(5.0));
        assert_eq!(anim.current_frame(), Some((0.0, 4.0)));
    }

    #[test]
    fn play_if_different_keeps_running_animation() {
        let mut anim = AnimationComponent::default();
        anim.add("walk-down-idle", AnimationDef::still(4, 0));
        anim.add("walk-down", AnimationDef::sheet_range(4, 0, 3, 10.0, true));

        anim.play("walk-down");
        anim.tick(0.1);
        let old_frame = anim.frame_index;

        anim.play_if_different("walk-down");
        assert_eq!(anim.frame_index, old_frame);

        anim.play_if_different("walk-down-idle");
        assert_eq!(anim.current_name(), "walk-down-idle");
        assert_eq!(anim.frame_index, 0);
    }

    #[test]
    fn unknown_animation_is_ignored() {
        let mut anim = AnimationComponent::single("idle", AnimationDef::still(1, 0));
        assert!(!anim.play("dance"));
        assert_eq!(anim.current_name(), "idle");
    }
}
