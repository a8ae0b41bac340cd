//! Product entity wiring for the generic resource actor.

pub mod entity;

pub use entity::sequential_ids;
