//! Resolving systems into a deterministic execution order and driving their phases.
//!
//! A [PipelineBuilder] collects systems together with their placement hints:
//! a [layer](LayerList), an integer sort order and the order they were added in.
//! [PipelineBuilder::build] sorts them into one total order (layer first, then sort order,
//! then insertion order) and derives the per-phase sequences the [Pipeline] runs.

mod layers;
mod module;
mod builder;
mod pipeline;
mod process_runner;

pub use layers::*;
pub use module::*;
pub use builder::*;
pub use pipeline::*;

pub(crate) use process_runner::*;
