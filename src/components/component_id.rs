//! A unique runtime identifier tied to a [Component] type.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! They are handed out the first time a type's id is requested and are shared by every
//! [World](crate::world::World) in the process.

use crate::components::Component;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::any::type_name;
use std::hash::Hash;

lazy_static! {
	static ref ID_TO_NAME: RwLock<Vec<&'static str>> = RwLock::new(Vec::new());
}

/// A globally unique identifier for a type implementing the [`Component`] trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentId {
	value: usize,
}

impl ComponentId {
	/// Get the [ComponentId] of the type `T`.
	#[inline(always)]
	pub fn of<T: Component>() -> ComponentId {
		T::component_id()
	}

	/// Allocates a new id for `T`. **Should not be called from user code.**
	///
	/// Called once per type from the code generated by `#[derive(Component)]`.
	#[doc(hidden)]
	pub fn register<T: 'static>() -> ComponentId {
		let mut names = ID_TO_NAME.write();
		let value = names.len();
		debug_assert!(
			value <= u32::MAX as usize,
			"This is an insane number of components. Please seek help."
		);

		names.push(type_name::<T>());
		ComponentId { value }
	}

	/// The type name the id was registered for.
	pub fn name(&self) -> &'static str {
		ID_TO_NAME.read().get(self.value).copied().unwrap_or("<unknown component>")
	}

	#[inline(always)]
	pub const fn value(&self) -> usize {
		self.value
	}
}

impl nohash_hasher::IsEnabled for ComponentId {}
