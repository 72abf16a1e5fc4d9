use crate::injection::{Ancestors, Injectable, InjectionForm};
use std::any::{type_name, Any, TypeId};
use crate::systems::AnySystem;
use crate::error::ConfigError;
use std::collections::HashMap;

/// One registered type of the injection graph.
pub struct InjectionNode {
	type_id: TypeId,
	type_name: &'static str,
	subscribers: Vec<usize>,
	children: Vec<&'static str>,
}

impl InjectionNode {
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Pipeline positions of the systems subscribed to this type, in pipeline order.
	/// Empty until the pipeline is built.
	pub fn subscribers(&self) -> &[usize] {
		&self.subscribers
	}

	/// Injected value types that are routed to this node as an ancestor.
	/// Empty until the pipeline is built.
	pub fn children(&self) -> &[&'static str] {
		&self.children
	}
}

pub(crate) struct InjectedValue {
	type_name: &'static str,
	forms: Vec<InjectionForm>,
}

struct Delivery {
	node: usize,
	subscription: usize,
	value: usize,
	form: usize,
}

/// The injection graph: registered types, injected values and their resolved deliveries.
///
/// Owned by the [PipelineBuilder](crate::pipeline::PipelineBuilder) until the pipeline is built,
/// after which it is frozen and moves into the [Pipeline](crate::pipeline::Pipeline).
#[derive(Default)]
pub struct Injector {
	frozen: bool,
	nodes: Vec<InjectionNode>,
	index: HashMap<TypeId, usize>,
	values: Vec<InjectedValue>,
	deliveries: Vec<Delivery>,
}

impl Injector {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// An empty injector that rejects every registration.
	pub(crate) fn frozen() -> Self {
		Self {
			frozen: true,
			..Self::default()
		}
	}

	/// Stores `value` for delivery to every system subscribed to its type,
	/// or to one of its registered ancestors.
	///
	/// Fails with [ConfigError::InjectionAfterBuild] once the pipeline has been built.
	pub fn inject<T: Injectable>(&mut self, value: T) -> Result<&mut Self, ConfigError> {
		self.check_open::<T>()?;

		let mut ancestors = Ancestors::new(value);
		T::ancestors(&mut ancestors);

		self.register(TypeId::of::<T>(), type_name::<T>());
		self.values.push(InjectedValue {
			type_name: type_name::<T>(),
			forms: ancestors.forms,
		});
		Ok(self)
	}

	/// Registers `T` as a node of the graph, so that injected values declaring `T`
	/// as an ancestor also reach systems subscribed to `T`.
	pub fn add_node<T: ?Sized + 'static>(&mut self) -> Result<&mut Self, ConfigError> {
		self.check_open::<T>()?;
		self.register(TypeId::of::<T>(), type_name::<T>());
		Ok(self)
	}

	/// Whether `T` is a node of the graph.
	pub fn contains<T: ?Sized + 'static>(&self) -> bool {
		self.index.contains_key(&TypeId::of::<T>())
	}

	pub fn node<T: ?Sized + 'static>(&self) -> Option<&InjectionNode> {
		let index = *self.index.get(&TypeId::of::<T>())?;
		Some(&self.nodes[index])
	}

	/// All nodes, in registration order.
	pub fn nodes(&self) -> &[InjectionNode] {
		&self.nodes
	}

	/// Number of injected values.
	pub fn value_count(&self) -> usize {
		self.values.len()
	}

	/// Number of resolved (system, value) deliveries.
	pub fn delivery_count(&self) -> usize {
		self.deliveries.len()
	}

	pub fn is_frozen(&self) -> bool {
		self.frozen
	}

	fn check_open<T: ?Sized>(&self) -> Result<(), ConfigError> {
		match self.frozen {
			true => Err(ConfigError::InjectionAfterBuild {
				type_name: type_name::<T>(),
			}),
			false => Ok(()),
		}
	}

	fn register(&mut self, type_id: TypeId, type_name: &'static str) {
		if !self.index.contains_key(&type_id) {
			self.index.insert(type_id, self.nodes.len());
			self.nodes.push(InjectionNode {
				type_id,
				type_name,
				subscribers: Vec::new(),
				children: Vec::new(),
			});
		}
	}

	/// Freezes the graph and computes every delivery against the final system order.
	///
	/// Each system receives each matching value once, through the most specific form
	/// it subscribed to: the value's own type first, then its ancestors in declaration order.
	pub(crate) fn resolve(&mut self, systems: &[&dyn AnySystem]) {
		self.frozen = true;

		for node in self.nodes.iter_mut() {
			node.subscribers = systems
				.iter()
				.enumerate()
				.filter(|(_, system)| system.subscription(node.type_id).is_some())
				.map(|(i, _)| i)
				.collect();
			node.children.clear();
		}

		for value in self.values.iter() {
			for form in value.forms.iter().skip(1) {
				if let Some(&index) = self.index.get(&form.type_id) {
					let node = &mut self.nodes[index];
					if !node.children.contains(&value.type_name) {
						node.children.push(value.type_name);
					}
				}
			}
		}

		self.deliveries.clear();
		for (node, system) in systems.iter().enumerate() {
			for (value_index, value) in self.values.iter().enumerate() {
				let target = value
					.forms
					.iter()
					.enumerate()
					.filter(|(_, form)| self.index.contains_key(&form.type_id))
					.find_map(|(form, f)| system.subscription(f.type_id).map(|s| (form, s)));

				if let Some((form, subscription)) = target {
					self.deliveries.push(Delivery {
						node,
						subscription,
						value: value_index,
						form,
					});
				}
			}
		}

		log::debug!(
			"resolved {} injection deliveries for {} values over {} nodes",
			self.deliveries.len(),
			self.values.len(),
			self.nodes.len()
		);
	}

	/// Resolved deliveries in pipeline order: `(node, subscription, value, form name)`.
	pub(crate) fn deliveries(&self) -> impl Iterator<Item = (usize, usize, &dyn Any, &'static str)> + '_ {
		self.deliveries.iter().map(move |d| {
			let form = &self.values[d.value].forms[d.form];
			(d.node, d.subscription, &*form.value, form.type_name)
		})
	}
}
