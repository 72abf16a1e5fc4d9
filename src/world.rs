use crate::components::{Component, ComponentStore, DataPool, Storage, StorageMut};
use crate::entities::{Entity, EntityHandle, EntityRegistry};
use crate::error::StorageError;
use crate::config::WorldConfig;
use std::ops::Deref;

/// A container for [`entities`](Entity) and their [`components`](Component).
///
/// A [World] is owned by the caller; a [Pipeline](crate::pipeline::Pipeline) only borrows
/// it for the duration of each phase.
/// Entities are destroyed lazily: removing the last component of an entity (or calling
/// [World::del_entity]) only queues it, and [World::flush_destroyed] reclaims the slot.
/// [Pipeline::run](crate::pipeline::Pipeline::run) flushes at the end of every tick.
pub struct World {
	entities: EntityRegistry,
	components: ComponentStore,
}

impl World {
	pub fn new() -> Self {
		Self::with_config(WorldConfig::default())
	}

	pub fn with_config(config: WorldConfig) -> Self {
		Self {
			entities: EntityRegistry::with_capacity(config.entity_capacity),
			components: ComponentStore::new(config.pool_capacity),
		}
	}

	/// The entity registry, for liveness and handle queries.
	pub fn entities(&self) -> &EntityRegistry {
		&self.entities
	}

	/// All component pools of this world.
	pub fn components(&self) -> &ComponentStore {
		&self.components
	}

	/// Creates a single [`entity`](Entity) with no [`components`](Component) attached.
	///
	/// An entity that still has no components at the end of the tick is destroyed.
	pub fn new_entity(&mut self) -> Entity {
		self.entities.create()
	}

	/// Removes every component from `entity` and queues it for destruction.
	pub fn del_entity(&mut self, entity: Entity) -> Result<(), StorageError> {
		self.entities.check_alive(entity)?;
		self.components.remove_all(entity);
		self.entities.clear(entity);
		Ok(())
	}

	/// Copies every component of `src` onto `dst`, overwriting the ones `dst` already has.
	/// Components `src` doesn't have are left untouched on `dst`.
	pub fn copy_entity(&mut self, src: Entity, dst: Entity) -> Result<(), StorageError> {
		self.entities.check_alive(src)?;
		self.entities.check_alive(dst)?;
		if src == dst {
			return Ok(());
		}

		for _ in 0..self.components.copy_all(src, dst) {
			self.entities.increment(dst);
		}
		Ok(())
	}

	/// Creates a new entity carrying a copy of every component of `src`.
	pub fn clone_entity(&mut self, src: Entity) -> Result<Entity, StorageError> {
		self.entities.check_alive(src)?;
		let dst = self.entities.create();
		self.copy_entity(src, dst)?;
		Ok(dst)
	}

	/// Returns a long-lived handle for `entity`'s current generation.
	pub fn get_entity_long(&self, entity: Entity) -> EntityHandle {
		self.entities.handle(entity)
	}

	/// Resolves a long-lived handle, failing with [StorageError::StaleEntity]
	/// if the entity has been destroyed since.
	pub fn try_get_id(&self, handle: EntityHandle) -> Result<Entity, StorageError> {
		self.entities.resolve(handle)
	}

	/// Attaches `value` to `entity`.
	/// Fails with [StorageError::DuplicateComponent] if a `T` is already attached.
	pub fn add<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), StorageError> {
		self.entities.check_alive(entity)?;
		match <T::Storage as StorageMut<T>>::insert(self.components.pool_mut::<T>(), entity, value) {
			true => {
				self.entities.increment(entity);
				Ok(())
			},
			false => Err(StorageError::DuplicateComponent {
				entity,
				component: T::component_id().name(),
			}),
		}
	}

	/// Detaches `T` from `entity`.
	/// Fails with [StorageError::MissingComponent] if no `T` is attached.
	///
	/// If this was the entity's last component, the entity is queued for destruction.
	pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<(), StorageError> {
		let removed = match self.components.try_pool_mut::<T>() {
			Some(pool) => <T::Storage as StorageMut<T>>::remove(pool, entity),
			None => false,
		};

		match removed {
			true => {
				self.entities.decrement(entity);
				Ok(())
			},
			false => Err(StorageError::MissingComponent {
				entity,
				component: T::component_id().name(),
			}),
		}
	}

	/// Whether `entity` has a `T` attached.
	pub fn has<T: Component>(&self, entity: Entity) -> bool {
		self.components.pool::<T>().map_or(false, |pool| pool.contains(entity))
	}

	/// Gets a reference to the `T` bound to `entity`.
	pub fn get<T: Component<Storage = DataPool<T>>>(&self, entity: Entity) -> Option<&T> {
		self.components.pool::<T>()?.get(entity)
	}

	/// Gets a mutable reference to the `T` bound to `entity`.
	pub fn get_mut<T: Component<Storage = DataPool<T>>>(&mut self, entity: Entity) -> Option<&mut T> {
		self.components.try_pool_mut::<T>()?.get_mut(entity)
	}

	/// Gets the pool of `T`, if any `T` was ever added.
	pub fn pool<T: Component>(&self) -> Option<&T::Storage> {
		self.components.pool::<T>()
	}

	/// Gets the pool of `T` for in-place mutation, registering it if needed.
	///
	/// Only values can be changed through it; membership changes go through
	/// [World::add] and [World::remove].
	pub fn pool_mut<T: Component>(&mut self) -> &mut T::Storage {
		self.components.pool_mut::<T>()
	}

	/// Members of `T`'s pool in dense order, copied out so the world can be
	/// mutated while walking them.
	pub fn collect<T: Component>(&self) -> Vec<Entity> {
		self.pool::<T>().map(|pool| pool.entities().to_vec()).unwrap_or_default()
	}

	/// Reclaims every entity queued for destruction that is still componentless.
	///
	/// Bumps the generation of each destroyed slot, so outstanding handles stop resolving.
	/// Returns the number of destroyed entities.
	pub fn flush_destroyed(&mut self) -> usize {
		let destroyed = self.entities.flush();
		if destroyed > 0 {
			log::trace!("reclaimed {} entities", destroyed);
		}
		destroyed
	}
}

impl Default for World {
	fn default() -> Self {
		Self::new()
	}
}

impl Deref for World {
	type Target = EntityRegistry;

	#[inline(always)]
	fn deref(&self) -> &Self::Target {
		&self.entities
	}
}
