pub mod queue;
pub mod tracker;
