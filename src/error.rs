//! Error types for configuration, storage and pipeline execution.
//!
//! Configuration errors come out of [`PipelineBuilder::build`](crate::pipeline::PipelineBuilder::build)
//! and are fatal for that build attempt. Storage errors are caller-recoverable and
//! are normally avoided by checking [`World::has`](crate::world::World::has) or
//! [`World::try_get_id`](crate::world::World::try_get_id) first.
//! Pipeline errors report misuse of the lifecycle or a failing system callback.

use crate::entities::{Entity, EntityHandle};
use crate::systems::Phase;
use thiserror::Error;

/// Error type returned by system callbacks.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a single system callback.
pub type ProcessResult = Result<(), BoxedError>;

/// Build-time configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	/// Two systems of the same concrete type were added as unique.
	#[error("system {system} was added as unique more than once")]
	DuplicateUniqueSystem {
		/// Type name of the offending system.
		system: &'static str,
	},

	/// A layer name was referenced that is not part of the layer list.
	#[error("unknown layer: {layer}")]
	UnknownLayer {
		/// The missing layer.
		layer: String,
	},

	/// A layer with the same name already exists.
	#[error("layer {layer} already exists")]
	DuplicateLayer {
		/// The duplicated layer.
		layer: String,
	},

	/// The injection graph is frozen once the pipeline has been built.
	#[error("cannot inject {type_name} after the pipeline has been built")]
	InjectionAfterBuild {
		/// Type name of the rejected value or node.
		type_name: &'static str,
	},

	/// The builder has already produced its pipeline.
	#[error("the pipeline has already been built")]
	AlreadyBuilt,
}

/// Errors raised by entity and component storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
	#[error("entity {entity} already has a {component} component")]
	DuplicateComponent { entity: Entity, component: &'static str },

	#[error("entity {entity} has no {component} component")]
	MissingComponent { entity: Entity, component: &'static str },

	/// The handle's generation no longer matches the slot's generation.
	#[error("stale entity handle {handle}")]
	StaleEntity { handle: EntityHandle },

	#[error("entity {entity} is not alive")]
	DeadEntity { entity: Entity },
}

/// Errors raised while driving a [Pipeline](crate::pipeline::Pipeline).
#[derive(Error, Debug)]
pub enum PipelineError {
	#[error("the pipeline must be initialized first")]
	NotInitialized,

	#[error("the pipeline has already been initialized")]
	AlreadyInitialized,

	#[error("the pipeline has been destroyed")]
	Destroyed,

	/// A system callback failed and aborted its phase.
	#[error("system {system} failed during {phase}")]
	Process {
		system: &'static str,
		phase: Phase,
		#[source]
		source: BoxedError,
	},
}

/// Umbrella error for callers that drive the whole runtime.
#[derive(Error, Debug)]
pub enum EcsError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Storage(#[from] StorageError),

	#[error(transparent)]
	Pipeline(#[from] PipelineError),
}
