use crate::pipeline::{LayerList, Module, Pipeline, PipelineNode, BASIC};
use crate::injection::{Injectable, Injector};
use crate::systems::{System, SystemCell};
use crate::error::{ConfigError, EcsError};
use std::collections::HashSet;
use crate::world::World;

/// Collects systems, modules, layers and injected values, then resolves them into a [Pipeline].
///
/// ```ignore
/// let mut builder = PipelineBuilder::new();
/// builder.layers().insert_after(BASIC, "PHYSICS")?;
/// builder
///     .add(Input::default())
///     .add_to_layer(Integrate::default(), "PHYSICS", 0)
///     .add_module(RenderModule)
///     .inject(Settings::default())?;
/// let mut pipeline = builder.build_and_init(&mut world)?;
/// ```
pub struct PipelineBuilder {
	nodes: Vec<PipelineNode>,
	layers: LayerList,
	injector: Injector,
	next_sequence: u64,
	built: bool,
}

impl PipelineBuilder {
	pub fn new() -> Self {
		Self {
			nodes: Vec::new(),
			layers: LayerList::new(),
			injector: Injector::new(),
			next_sequence: 0,
			built: false,
		}
	}

	/// Adds a system to the [BASIC] layer with sort order 0.
	pub fn add<S: System>(&mut self, system: S) -> &mut Self {
		self.push(system, BASIC, 0, false)
	}

	/// Adds a system to `layer`. Within a layer, lower sort orders run first.
	pub fn add_to_layer<S: System>(&mut self, system: S, layer: &str, sort_order: i32) -> &mut Self {
		self.push(system, layer, sort_order, false)
	}

	/// Like [PipelineBuilder::add], but the build fails with
	/// [ConfigError::DuplicateUniqueSystem] if another `S` was added as unique.
	pub fn add_unique<S: System>(&mut self, system: S) -> &mut Self {
		self.push(system, BASIC, 0, true)
	}

	pub fn add_unique_to_layer<S: System>(&mut self, system: S, layer: &str, sort_order: i32) -> &mut Self {
		self.push(system, layer, sort_order, true)
	}

	/// Imports every system of `module`, in the order the module adds them.
	pub fn add_module<M: Module>(&mut self, module: M) -> &mut Self {
		module.import(self);
		self
	}

	/// Stores a value for delivery during [Pipeline::init]. See [Injector::inject].
	pub fn inject<T: Injectable>(&mut self, value: T) -> Result<&mut Self, ConfigError> {
		self.injector.inject(value)?;
		Ok(self)
	}

	pub fn injector(&mut self) -> &mut Injector {
		&mut self.injector
	}

	pub fn layers(&mut self) -> &mut LayerList {
		&mut self.layers
	}

	/// Number of systems added so far.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	fn push<S: System>(&mut self, system: S, layer: &str, sort_order: i32, unique: bool) -> &mut Self {
		let sequence = self.next_sequence;
		self.next_sequence += 1;

		self.nodes.push(PipelineNode {
			system: Box::new(SystemCell::new(system)),
			layer: layer.to_string(),
			sort_order,
			sequence,
			unique,
		});
		self
	}

	/// Resolves the final execution order and materializes the [Pipeline].
	///
	/// Nodes are ordered by layer, then by sort order, then by insertion order.
	/// Every configuration error is detected before anything is consumed, so a failed
	/// build leaves the builder untouched.
	pub fn build(&mut self) -> Result<Pipeline, ConfigError> {
		if self.built {
			return Err(ConfigError::AlreadyBuilt);
		}

		let mut uniques = HashSet::new();
		for node in self.nodes.iter().filter(|n| n.unique) {
			if !uniques.insert(node.system_type()) {
				return Err(ConfigError::DuplicateUniqueSystem { system: node.name() });
			}
		}

		let mut layer_indices = Vec::with_capacity(self.nodes.len());
		for node in self.nodes.iter() {
			match self.layers.index_of(&node.layer) {
				Some(index) => layer_indices.push(index),
				None => return Err(ConfigError::UnknownLayer { layer: node.layer.clone() }),
			}
		}

		self.built = true;
		let injector = std::mem::replace(&mut self.injector, Injector::frozen());

		let mut keyed = layer_indices.into_iter().zip(self.nodes.drain(..)).collect::<Vec<_>>();
		keyed.sort_by_key(|(layer, node)| (*layer, node.sort_order));
		let nodes = keyed.into_iter().map(|(_, node)| node).collect();

		Ok(Pipeline::new(nodes, self.layers.clone(), injector))
	}

	/// [PipelineBuilder::build] followed by [Pipeline::init].
	pub fn build_and_init(&mut self, world: &mut World) -> Result<Pipeline, EcsError> {
		let mut pipeline = self.build()?;
		pipeline.init(world)?;
		Ok(pipeline)
	}
}

impl Default for PipelineBuilder {
	fn default() -> Self {
		Self::new()
	}
}
