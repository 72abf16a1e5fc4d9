//! A runtime for composing and executing game-style logic.
//!
//! Entities are bare identifiers, components are plain data attached to them, and systems
//! are units of behaviour resolved into a deterministic [Pipeline](pipeline::Pipeline)
//! that drives them phase by phase over a [World](world::World).

extern crate self as drake_ecs;

pub mod data_structures;
pub mod components;
pub mod injection;
pub mod entities;
pub mod pipeline;
pub mod systems;
pub mod config;
pub mod error;
pub mod world;

pub use lazy_static::lazy_static;

pub mod prelude {
	pub use crate::systems::{
		Capabilities, DestroyProcess, Inject, InitProcess, InjectionComplete, Phase, PreInitProcess,
		RunProcess, System,
	};
	pub use crate::pipeline::{
		LayerList, LayerPosition, Module, Pipeline, PipelineBuilder, BASIC, BEGIN, END, POST_END,
		PRE_BEGIN,
	};
	pub use crate::error::{BoxedError, ConfigError, EcsError, PipelineError, ProcessResult, StorageError};
	pub use crate::components::{Component, ComponentId, DataPool, Storage, TagPool};
	pub use crate::injection::{Ancestors, Injectable, Injector};
	pub use crate::entities::{Entity, EntityHandle};
	pub use crate::config::WorldConfig;
	pub use crate::world::World;
}

#[cfg(test)]
mod tests;
