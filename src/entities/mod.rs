//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//!
//! A bare [Entity] is only a slot index and is meant to be used within a single tick.
//! Anything that needs to hold on to an entity across ticks should keep an [EntityHandle]
//! and resolve it through [EntityRegistry::resolve] every time.

mod entity;
mod entity_registry;

pub use entity::*;
pub use entity_registry::*;
