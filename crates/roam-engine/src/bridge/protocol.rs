/// Frame data layout shared with the page.
/// Must stay in sync with the page-side `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame; the page reads them
/// to compute offsets instead of hardcoding sizes.

use crate::api::game::GameConfig;
use glam::Vec2;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_WORLD_WIDTH: usize = 4;
pub const HEADER_WORLD_HEIGHT: usize = 5;
pub const HEADER_CAMERA_X: usize = 6;
pub const HEADER_CAMERA_Y: usize = 7;
pub const HEADER_MAX_SOUNDS: usize = 8;
pub const HEADER_SOUND_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;
pub const HEADER_INSTANCE_OVERFLOW: usize = 13;
pub const HEADER_DIALOGUE_OPEN: usize = 14;
/// Clear colour as 0xRRGGBB (exact in f32).
pub const HEADER_BACKGROUND: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance: x, y, z, size, col, row, alpha, atlas.
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of sound data section in floats.
    pub sound_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_sounds: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let sound_data_offset = instance_data_offset + instance_data_floats;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_sounds,
            max_events,
            instance_data_floats,
            sound_data_floats,
            event_data_floats,
            instance_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_sounds, config.max_events)
    }
}

/// Per-frame values that go into the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameHeader {
    pub frame: u32,
    pub instance_count: u32,
    pub instance_overflow: u32,
    pub sound_count: u32,
    pub event_count: u32,
    pub world_size: Vec2,
    pub camera_center: Vec2,
    pub dialogue_open: bool,
    pub background: u32,
}

/// Fill `out` with the header for one frame. The lock slot is left at 0.
pub fn write_header(layout: &ProtocolLayout, frame: &FrameHeader, out: &mut [f32; HEADER_FLOATS]) {
    *out = [0.0; HEADER_FLOATS];
    out[HEADER_FRAME_COUNTER] = frame.frame as f32;
    out[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    out[HEADER_INSTANCE_COUNT] = frame.instance_count.min(layout.max_instances as u32) as f32;
    out[HEADER_WORLD_WIDTH] = frame.world_size.x;
    out[HEADER_WORLD_HEIGHT] = frame.world_size.y;
    out[HEADER_CAMERA_X] = frame.camera_center.x;
    out[HEADER_CAMERA_Y] = frame.camera_center.y;
    out[HEADER_MAX_SOUNDS] = layout.max_sounds as f32;
    out[HEADER_SOUND_COUNT] = frame.sound_count.min(layout.max_sounds as u32) as f32;
    out[HEADER_MAX_EVENTS] = layout.max_events as f32;
    out[HEADER_EVENT_COUNT] = frame.event_count.min(layout.max_events as u32) as f32;
    out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    out[HEADER_INSTANCE_OVERFLOW] = frame.instance_overflow as f32;
    out[HEADER_DIALOGUE_OPEN] = if frame.dialogue_open { 1.0 } else { 0.0 };
    out[HEADER_BACKGROUND] = (frame.background & 0x00ff_ffff) as f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.max_instances, 1024);
        assert_eq!(layout.max_sounds, 32);
        assert_eq!(layout.max_events, 32);

        assert_eq!(layout.instance_data_offset, 16);
        assert_eq!(layout.sound_data_offset, 16 + 1024 * 8);
        assert_eq!(layout.event_data_offset, 16 + 1024 * 8 + 32);
        assert_eq!(layout.buffer_total_floats, 16 + 1024 * 8 + 32 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 10, 20);

        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.sound_data_offset, layout.instance_data_offset + layout.instance_data_floats);
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + layout.sound_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_carries_camera_and_counts() {
        let layout = ProtocolLayout::new(4, 2, 2);
        let frame = FrameHeader {
            frame: 7,
            instance_count: 9,
            instance_overflow: 5,
            sound_count: 1,
            event_count: 0,
            world_size: Vec2::new(1280.0, 720.0),
            camera_center: Vec2::new(640.0, 300.0),
            dialogue_open: true,
            background: 0x311047,
        };
        let mut header = [1.0; HEADER_FLOATS];
        write_header(&layout, &frame, &mut header);

        assert_eq!(header[HEADER_LOCK], 0.0);
        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        // Counts never exceed capacity.
        assert_eq!(header[HEADER_INSTANCE_COUNT], 4.0);
        assert_eq!(header[HEADER_INSTANCE_OVERFLOW], 5.0);
        assert_eq!(header[HEADER_CAMERA_X], 640.0);
        assert_eq!(header[HEADER_CAMERA_Y], 300.0);
        assert_eq!(header[HEADER_WORLD_WIDTH], 1280.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_DIALOGUE_OPEN], 1.0);
        assert_eq!(header[HEADER_BACKGROUND] as u32, 0x311047);
    }
}
