pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod extensions;
pub mod input;
pub mod level;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use assets::error::AssetError;
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use bridge::protocol::{ProtocolLayout, FrameHeader};
pub use components::animation::{AnimationComponent, AnimationDef};
pub use components::entity::{Entity, DepthSort};
pub use components::interactable::Interactable;
pub use components::layer::RenderLayer;
pub use components::sprite::{SpriteComponent, AtlasId};
pub use components::tilemap::{TilemapComponent, Tile};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use input::tracker::{keys, KeyTracker, PointerTracker};
pub use level::{BuiltLevel, Cell, Legend, LevelError, LevelMap, require_marker};
pub use renderer::camera::Camera2D;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use systems::animation::tick_animations;
pub use systems::depth::apply_depth_sort;
pub use systems::dialogue::DialogueBox;
pub use systems::interaction::{nearest_interactable, interactables_in_range, Nearby};

#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial,
};

pub use extensions::{
    Easing, Tween, TweenId, TweenProperty, TweenRepeat, TweenState,
};
