pub mod animation;
pub mod depth;
pub mod dialogue;
pub mod interaction;
pub mod render;
