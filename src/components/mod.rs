//! [Components](Component) are plain data blocks attached to [entities](crate::entities::Entity).
//!
//! Every component type lives in exactly one pool per [World](crate::world::World).
//! Types carrying data are stored in a [DataPool], field-less marker types in a [TagPool].
//! `#[derive(Component)]` picks the right one by looking at the type's fields.

mod data_pool;
mod tag_pool;
mod component_id;
mod component_type;
mod component_store;

pub use data_pool::*;
pub use tag_pool::*;
pub use component_id::*;
pub use component_type::*;
pub use component_store::*;
pub use drake_ecs_derive::Component;

pub(crate) use component_type::sealed::StorageMut;
