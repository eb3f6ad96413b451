/// Render layer: coarse draw order for entities.
///
/// Layers are drawn back-to-front: Floor first, UI last.
/// Within a layer, entities are ordered by their `z` (see `systems::depth`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    /// Floor tiles, rugs, anything the player walks over.
    Floor = 0,
    /// Furniture, characters, the player. Depth-sorted by Y.
    #[default]
    Objects = 1,
    /// Things that always draw above objects (ceiling lamps, hints).
    Overhead = 2,
    UI = 3,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 4;

    /// Convert from a u8 value to a RenderLayer.
    /// Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Floor),
            1 => Some(Self::Objects),
            2 => Some(Self::Overhead),
            3 => Some(Self::UI),
            _ => None,
        }
    }

    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
