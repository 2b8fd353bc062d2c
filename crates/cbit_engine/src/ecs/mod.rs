//! Entity-Component-System implementation
//!
//! A [`Registry`] owns generational entity handles and one typed store per
//! component kind. [`World`] wraps a registry together with the camera and
//! lighting systems, and [`GameObject`] is a borrowed facade for working with
//! a single entity.

pub mod component;
pub mod components;
pub mod entity;
pub mod game_object;
pub mod query;
pub mod registry;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::Component;
pub use entity::Entity;
pub use game_object::GameObject;
pub use query::Query;
pub use registry::{EcsError, Registry};
pub use system::System;
pub use world::World;
