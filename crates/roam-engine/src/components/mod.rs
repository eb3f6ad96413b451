pub mod animation;
pub mod entity;
pub mod interactable;
pub mod layer;
pub mod sprite;
pub mod tilemap;
