use thiserror::Error;

/// Failure while loading or resolving the asset manifest.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("manifest is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown sprite sheet '{0}'")]
    UnknownSheet(String),
    #[error("sheet '{sheet}' refers to atlas {atlas}, which is not declared")]
    UnknownAtlas { sheet: String, atlas: u32 },
    #[error("animation '{anim}' of sheet '{sheet}' uses frame {frame}, but the sheet has {count} frames")]
    FrameOutOfRange {
        sheet: String,
        anim: String,
        frame: u32,
        count: u32,
    },
    #[error("sheet '{0}' has no cells")]
    EmptySheet(String),
}
