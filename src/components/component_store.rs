use crate::components::{Component, ComponentId, Storage, StorageMut};
use nohash_hasher::BuildNoHashHasher;
use std::collections::HashMap;
use crate::entities::Entity;
use std::any::Any;

type Hasher = BuildNoHashHasher<ComponentId>;

/// Type-erased view of a pool, used for whole-entity operations.
pub(crate) trait AnyPool: Any {
	fn component_id(&self) -> ComponentId;
	fn contains(&self, entity: Entity) -> bool;
	fn remove(&mut self, entity: Entity) -> bool;
	fn copy(&mut self, src: Entity, dst: Entity) -> Option<bool>;
	fn len(&self) -> usize;
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct PoolCell<T: Component> {
	storage: T::Storage,
}

impl<T: Component> AnyPool for PoolCell<T> {
	fn component_id(&self) -> ComponentId {
		T::component_id()
	}

	fn contains(&self, entity: Entity) -> bool {
		self.storage.contains(entity)
	}

	fn remove(&mut self, entity: Entity) -> bool {
		<T::Storage as StorageMut<T>>::remove(&mut self.storage, entity)
	}

	fn copy(&mut self, src: Entity, dst: Entity) -> Option<bool> {
		<T::Storage as StorageMut<T>>::copy(&mut self.storage, src, dst)
	}

	fn len(&self) -> usize {
		self.storage.len()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// All component pools of a [World](crate::world::World), one per component type.
///
/// Pools are created the first time a component type is used and keep their
/// registration order for whole-entity operations.
pub struct ComponentStore {
	pool_capacity: usize,
	pools: Vec<Box<dyn AnyPool>>,
	index: HashMap<ComponentId, usize, Hasher>,
}

impl ComponentStore {
	pub(crate) fn new(pool_capacity: usize) -> Self {
		Self {
			pool_capacity,
			pools: Vec::new(),
			index: HashMap::default(),
		}
	}

	/// Registers the pool for `T` if it doesn't exist yet.
	pub fn register<T: Component>(&mut self) -> ComponentId {
		let id = T::component_id();
		if !self.index.contains_key(&id) {
			let storage = <T::Storage as StorageMut<T>>::with_capacity(self.pool_capacity);
			self.index.insert(id, self.pools.len());
			self.pools.push(Box::new(PoolCell::<T> { storage }));
			log::trace!("registered component pool for {}", id.name());
		}
		id
	}

	/// Whether a pool for `T` has been registered.
	pub fn is_registered<T: Component>(&self) -> bool {
		self.index.contains_key(&T::component_id())
	}

	/// Gets the pool for `T`, if registered.
	pub fn pool<T: Component>(&self) -> Option<&T::Storage> {
		let index = *self.index.get(&T::component_id())?;
		let cell = self.pools[index].as_any().downcast_ref::<PoolCell<T>>()?;
		Some(&cell.storage)
	}

	/// Gets the pool for `T`, registering it first if needed.
	pub(crate) fn pool_mut<T: Component>(&mut self) -> &mut T::Storage {
		let id = self.register::<T>();
		let index = self.index[&id];
		match self.pools[index].as_any_mut().downcast_mut::<PoolCell<T>>() {
			Some(cell) => &mut cell.storage,
			None => unreachable!("pool registered under a foreign component id"),
		}
	}

	/// Gets the pool for `T` without registering it.
	pub(crate) fn try_pool_mut<T: Component>(&mut self) -> Option<&mut T::Storage> {
		let index = *self.index.get(&T::component_id())?;
		let cell = self.pools[index].as_any_mut().downcast_mut::<PoolCell<T>>()?;
		Some(&mut cell.storage)
	}

	/// Number of registered pools.
	pub fn pool_count(&self) -> usize {
		self.pools.len()
	}

	/// Ids of every component attached to `entity`, in registration order.
	pub fn components_of(&self, entity: Entity) -> Vec<ComponentId> {
		self.pools.iter().filter(|p| p.contains(entity)).map(|p| p.component_id()).collect()
	}

	/// Number of members per registered pool, in registration order.
	pub fn pool_sizes(&self) -> impl Iterator<Item = (ComponentId, usize)> + '_ {
		self.pools.iter().map(|p| (p.component_id(), p.len()))
	}

	/// Removes `entity` from every pool. Returns the number of pools it was removed from.
	pub(crate) fn remove_all(&mut self, entity: Entity) -> usize {
		let mut removed = 0;
		for pool in self.pools.iter_mut() {
			if pool.remove(entity) {
				removed += 1;
			}
		}
		removed
	}

	/// Copies every entry of `src` onto `dst`. Returns the number of pools `dst` newly joined.
	pub(crate) fn copy_all(&mut self, src: Entity, dst: Entity) -> usize {
		let mut joined = 0;
		for pool in self.pools.iter_mut() {
			if pool.copy(src, dst) == Some(true) {
				joined += 1;
			}
		}
		joined
	}
}
