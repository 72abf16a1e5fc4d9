use crate::systems::{AnySystem, Phase, System};
use crate::pipeline::{LayerList, ProcessRunner};
use crate::error::PipelineError;
use crate::injection::Injector;
use std::any::TypeId;
use crate::world::World;

/// One registered system together with its placement hints.
pub struct PipelineNode {
	pub(crate) system: Box<dyn AnySystem>,
	pub(crate) layer: String,
	pub(crate) sort_order: i32,
	pub(crate) sequence: u64,
	pub(crate) unique: bool,
}

impl PipelineNode {
	/// Type name of the system.
	pub fn name(&self) -> &'static str {
		self.system.name()
	}

	pub fn layer(&self) -> &str {
		&self.layer
	}

	pub fn sort_order(&self) -> i32 {
		self.sort_order
	}

	/// Position in which the system was added to the builder.
	pub fn sequence(&self) -> u64 {
		self.sequence
	}

	pub fn is_unique(&self) -> bool {
		self.unique
	}

	pub fn supports(&self, phase: Phase) -> bool {
		self.system.supports(phase)
	}

	/// Type names the system subscribed to for injection.
	pub fn subscriptions(&self) -> Vec<&'static str> {
		self.system.subscription_types()
	}

	pub fn system_type(&self) -> TypeId {
		self.system.system_type()
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
	Built,
	Initialized,
	Faulted,
	Destroyed,
}

/// The resolved, ordered collection of systems plus one dispatch sequence per phase.
///
/// A pipeline never owns the [World] it runs over; every phase borrows it.
pub struct Pipeline {
	state: State,
	nodes: Vec<PipelineNode>,
	layers: LayerList,
	injector: Injector,
	runners: [ProcessRunner; Phase::COUNT],
	injection_complete: Vec<usize>,
}

impl Pipeline {
	pub(crate) fn new(nodes: Vec<PipelineNode>, layers: LayerList, mut injector: Injector) -> Self {
		let systems = nodes.iter().map(|n| n.system.as_ref()).collect::<Vec<_>>();
		injector.resolve(&systems);

		let runners = Phase::ALL.map(|phase| ProcessRunner::new(phase, &nodes));
		let injection_complete = nodes
			.iter()
			.enumerate()
			.filter(|(_, n)| n.system.wants_injection_complete())
			.map(|(i, _)| i)
			.collect();

		log::debug!("pipeline layers: {:?}", layers.iter().collect::<Vec<_>>());
		for (i, node) in nodes.iter().enumerate() {
			log::debug!("pipeline[{}] {} (layer {}, sort order {})", i, node.name(), node.layer, node.sort_order);
		}

		Self {
			state: State::Built,
			nodes,
			layers,
			injector,
			runners,
			injection_complete,
		}
	}

	/// Delivers injected values, then runs the pre-init and init phases.
	///
	/// Injections reach each system before any of its callbacks run, in pipeline order,
	/// followed by a single [InjectionComplete](crate::systems::InjectionComplete) notification.
	/// If a callback fails the pipeline is faulted: it can no longer run, but can still be destroyed.
	pub fn init(&mut self, world: &mut World) -> Result<(), PipelineError> {
		match self.state {
			State::Built => {},
			State::Initialized | State::Faulted => return Err(PipelineError::AlreadyInitialized),
			State::Destroyed => return Err(PipelineError::Destroyed),
		}
		self.state = State::Faulted;

		for (node, subscription, value, form) in self.injector.deliveries() {
			let system = &mut self.nodes[node].system;
			if system.deliver(subscription, value) {
				log::trace!("injected {} into {}", form, system.name());
			} else {
				log::warn!("could not inject {} into {}", form, system.name());
			}
		}

		for &index in self.injection_complete.iter() {
			self.nodes[index].system.injection_complete();
		}

		self.runners[Phase::PreInit as usize].execute(&mut self.nodes, world)?;
		self.runners[Phase::Init as usize].execute(&mut self.nodes, world)?;

		self.state = State::Initialized;
		Ok(())
	}

	/// Runs one tick: every run-phase system in order, then reclaims the entities
	/// that ended the tick without components.
	///
	/// Reclamation happens even when a system failed, since the tick is over either way.
	pub fn run(&mut self, world: &mut World) -> Result<(), PipelineError> {
		match self.state {
			State::Initialized => {},
			State::Built | State::Faulted => return Err(PipelineError::NotInitialized),
			State::Destroyed => return Err(PipelineError::Destroyed),
		}

		let result = self.runners[Phase::Run as usize].execute(&mut self.nodes, world);
		world.flush_destroyed();
		result
	}

	/// Runs the destroy phase in pipeline order. One-shot: the pipeline is unusable afterwards,
	/// even if a destroy callback fails.
	pub fn destroy(&mut self, world: &mut World) -> Result<(), PipelineError> {
		match self.state {
			State::Initialized | State::Faulted => {},
			State::Built => return Err(PipelineError::NotInitialized),
			State::Destroyed => return Err(PipelineError::Destroyed),
		}
		self.state = State::Destroyed;

		self.runners[Phase::Destroy as usize].execute(&mut self.nodes, world)
	}

	/// All nodes in resolved order.
	pub fn nodes(&self) -> &[PipelineNode] {
		&self.nodes
	}

	/// Nodes taking part in `phase`, in resolved order.
	pub fn phase_nodes(&self, phase: Phase) -> impl Iterator<Item = &PipelineNode> + '_ {
		self.runner(phase).nodes().iter().map(move |&i| &self.nodes[i])
	}

	pub fn layers(&self) -> &LayerList {
		&self.layers
	}

	/// The frozen injection graph this pipeline was built with.
	pub fn injector(&self) -> &Injector {
		&self.injector
	}

	/// The first system of type `S`, in pipeline order.
	pub fn get_system<S: System>(&self) -> Option<&S> {
		self.nodes.iter().find_map(|n| n.system.as_any().downcast_ref::<S>())
	}

	pub fn get_system_mut<S: System>(&mut self) -> Option<&mut S> {
		self.nodes.iter_mut().find_map(|n| n.system.as_any_mut().downcast_mut::<S>())
	}

	/// Every system of type `S`, in pipeline order.
	pub fn get_systems<S: System>(&self) -> impl Iterator<Item = &S> + '_ {
		self.nodes.iter().filter_map(|n| n.system.as_any().downcast_ref::<S>())
	}

	pub fn is_initialized(&self) -> bool {
		self.state == State::Initialized
	}

	pub fn is_destroyed(&self) -> bool {
		self.state == State::Destroyed
	}

	fn runner(&self, phase: Phase) -> &ProcessRunner {
		&self.runners[phase as usize]
	}
}
