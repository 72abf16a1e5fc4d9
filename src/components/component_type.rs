use crate::components::ComponentId;
use crate::entities::Entity;

/// A plain data block that can be attached to an [Entity].
///
/// Implemented through `#[derive(Component)]`, which also decides the storage:
/// [DataPool](crate::components::DataPool) for types with fields,
/// [TagPool](crate::components::TagPool) for field-less marker types.
pub trait Component
where
	Self: Clone + 'static,
{
	/// The pool kind this component is stored in.
	type Storage: Storage<Self>;

	/// The process-wide id of this component type.
	fn component_id() -> ComponentId;
}

/// Read access shared by every pool kind.
///
/// Structural changes (adding or removing members) go through the
/// [World](crate::world::World) so entity component counts stay in sync.
pub trait Storage<T>: sealed::StorageMut<T> + Default + 'static {
	/// Whether `entity` is a member of this pool. O(1).
	fn contains(&self, entity: Entity) -> bool;

	/// Members in dense storage order.
	///
	/// This is not creation order, and it changes when members are removed.
	fn entities(&self) -> &[Entity];

	fn len(&self) -> usize {
		self.entities().len()
	}

	fn is_empty(&self) -> bool {
		self.entities().is_empty()
	}
}

pub(crate) mod sealed {
	use crate::entities::Entity;

	pub trait StorageMut<T> {
		fn with_capacity(capacity: usize) -> Self;

		/// Returns *false* if `entity` is already a member.
		fn insert(&mut self, entity: Entity, value: T) -> bool;

		/// Returns *false* if `entity` is not a member.
		fn remove(&mut self, entity: Entity) -> bool;

		/// Copies `src`'s entry onto `dst`, overwriting it if present.
		/// Returns `None` when `src` is not a member, `Some(true)` when `dst` became a member.
		fn copy(&mut self, src: Entity, dst: Entity) -> Option<bool>;
	}
}
