//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A system opts into lifecycle phases and injected values by declaring
//! [capabilities](Capabilities); the [pipeline](crate::pipeline::Pipeline) only calls
//! a system for the phases it declared. A [System] must be added to a
//! [PipelineBuilder](crate::pipeline::PipelineBuilder) for it to become active.

mod system;
mod capabilities;
mod system_cell;

pub use system::*;
pub use capabilities::*;
pub use drake_ecs_derive::System;

pub(crate) use system_cell::*;
