//! Tuning constants for the room.

use glam::Vec2;

/// Pixel-art upscale: one sheet pixel is this many world units.
pub const SCALE: f32 = 4.0;

/// Keyboard diagonals move at the same speed as straight lines.
pub const DIAGONAL_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Player walking speed in world units per second.
pub const PLAYER_SPEED: f32 = 300.0;

/// Interactables closer than this to the player can be inspected.
pub const INTERACT_RADIUS: f32 = 100.0;

pub const TYPEWRITER_SECS_PER_CHAR: f32 = 0.02;

/// Camera follow tween length.
pub const CAMERA_FOLLOW_SECS: f32 = 0.5;

/// Sheet cell size in pixels.
pub const TILE_PX: f32 = 16.0;

/// World size of one map cell and of every sprite.
pub const TILE: f32 = TILE_PX * SCALE;

/// Page clear colour (#311047).
pub const BACKGROUND: u32 = 0x311047;

/// Player hitbox in sheet pixels; only the feet block.
pub const PLAYER_HITBOX_PX: Vec2 = Vec2::new(5.0, 10.0);

/// Pointer closer than this to the player does not steer.
pub const POINTER_DEADZONE: f32 = 4.0;

/// How far above its target the interaction hint floats.
pub const HINT_OFFSET: f32 = TILE * 0.75;
pub const HINT_FADE_SECS: f32 = 0.2;

/// Orbs bob up and down by this much.
pub const ORB_BOB: f32 = 6.0;
pub const ORB_BOB_SECS: f32 = 1.2;

/// Sound played when a dialogue opens.
pub const SOUND_DIALOGUE: u32 = 1;

/// Game event: the player confirmed a link. `a` = link index in `content::LINKS`.
pub const EVENT_OPEN_LINK: u32 = 1;
