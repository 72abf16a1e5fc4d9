use crate::systems::{Capabilities, Phase, System};
use crate::error::ProcessResult;
use std::any::{type_name, Any, TypeId};
use crate::world::World;

/// Type-erased system record stored in pipeline nodes.
pub(crate) trait AnySystem {
	fn name(&self) -> &'static str;
	fn system_type(&self) -> TypeId;
	fn supports(&self, phase: Phase) -> bool;
	fn wants_injection_complete(&self) -> bool;
	fn call(&mut self, phase: Phase, world: &mut World) -> ProcessResult;
	fn injection_complete(&mut self);
	fn subscription(&self, type_id: TypeId) -> Option<usize>;
	fn subscription_types(&self) -> Vec<&'static str>;
	fn deliver(&mut self, subscription: usize, value: &dyn Any) -> bool;
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub(crate) struct SystemCell<S> {
	system: S,
	caps: Capabilities<S>,
}

impl<S: System> SystemCell<S> {
	pub fn new(system: S) -> Self {
		let mut caps = Capabilities::default();
		S::capabilities(&mut caps);
		Self { system, caps }
	}
}

impl<S: System> AnySystem for SystemCell<S> {
	fn name(&self) -> &'static str {
		type_name::<S>()
	}

	fn system_type(&self) -> TypeId {
		TypeId::of::<S>()
	}

	fn supports(&self, phase: Phase) -> bool {
		self.caps.supports(phase)
	}

	fn wants_injection_complete(&self) -> bool {
		self.caps.injection_complete.is_some()
	}

	fn call(&mut self, phase: Phase, world: &mut World) -> ProcessResult {
		match self.caps.phases[phase as usize] {
			Some(callback) => callback(&mut self.system, world),
			None => Ok(()),
		}
	}

	fn injection_complete(&mut self) {
		if let Some(callback) = self.caps.injection_complete {
			callback(&mut self.system);
		}
	}

	fn subscription(&self, type_id: TypeId) -> Option<usize> {
		self.caps.subscriptions.iter().position(|s| s.type_id == type_id)
	}

	fn subscription_types(&self) -> Vec<&'static str> {
		self.caps.subscriptions.iter().map(|s| s.type_name).collect()
	}

	fn deliver(&mut self, subscription: usize, value: &dyn Any) -> bool {
		match self.caps.subscriptions.get(subscription) {
			Some(s) => (s.deliver)(&mut self.system, value),
			None => false,
		}
	}

	fn as_any(&self) -> &dyn Any {
		&self.system
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		&mut self.system
	}
}
