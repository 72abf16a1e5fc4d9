use crate::entities::{Entity, EntityHandle};
use crate::data_structures::BitField;
use crate::error::StorageError;

/// Owns entity slot allocation, generation counters and per-slot component counts.
///
/// Destruction is deferred: an entity whose component count drops to zero is only
/// queued, and the slot is reclaimed by [EntityRegistry::flush] at the end of the tick.
/// Until then the entity stays alive and its handles keep resolving.
#[derive(Default)]
pub struct EntityRegistry {
	generations: Vec<u32>,
	component_counts: Vec<u32>,
	alive: BitField,
	alive_count: usize,
	free: Vec<u32>,
	pending: Vec<u32>,
	pending_mask: BitField,
}

impl EntityRegistry {
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self {
			generations: Vec::with_capacity(capacity),
			component_counts: Vec::with_capacity(capacity),
			alive: BitField::with_capacity(capacity),
			pending_mask: BitField::with_capacity(capacity),
			..Self::default()
		}
	}

	/// Allocates an [entity](Entity) with no components.
	///
	/// Freed slots are reused before the registry grows. The new entity is queued for
	/// destruction right away, so it is reclaimed at the end of the tick unless a
	/// component is attached to it first.
	pub(crate) fn create(&mut self) -> Entity {
		let slot = match self.free.pop() {
			Some(slot) => slot,
			None => {
				let slot = self.generations.len() as u32;
				self.generations.push(1);
				self.component_counts.push(0);
				slot
			},
		};

		let entity = Entity(slot);
		self.alive.set(entity.index(), true);
		self.alive_count += 1;
		self.component_counts[entity.index()] = 0;
		self.enqueue(entity);

		log::trace!("created entity {}", self.handle(entity));
		entity
	}

	/// Whether the slot is currently allocated, including entities pending destruction.
	#[inline(always)]
	pub fn is_alive(&self, entity: Entity) -> bool {
		self.alive.get(entity.index())
	}

	pub(crate) fn check_alive(&self, entity: Entity) -> Result<(), StorageError> {
		match self.is_alive(entity) {
			true => Ok(()),
			false => Err(StorageError::DeadEntity { entity }),
		}
	}

	/// Returns the long-lived handle for the slot's current generation.
	pub fn handle(&self, entity: Entity) -> EntityHandle {
		let generation = self.generations.get(entity.index()).copied().unwrap_or(0);
		EntityHandle::new(entity.slot(), generation)
	}

	/// Resolves a handle back into a bare [Entity].
	///
	/// Fails with [StorageError::StaleEntity] when the slot has been destroyed since
	/// the handle was obtained.
	pub fn resolve(&self, handle: EntityHandle) -> Result<Entity, StorageError> {
		let entity = Entity(handle.slot());
		match self.generations.get(entity.index()) {
			Some(&generation) if generation == handle.generation() && self.is_alive(entity) => Ok(entity),
			_ => Err(StorageError::StaleEntity { handle }),
		}
	}

	/// Number of components currently attached to the entity.
	pub fn component_count(&self, entity: Entity) -> u32 {
		self.component_counts.get(entity.index()).copied().unwrap_or(0)
	}

	/// Number of allocated entities, including those pending destruction.
	pub fn len(&self) -> usize {
		self.alive_count
	}

	pub fn is_empty(&self) -> bool {
		self.alive_count == 0
	}

	/// Number of slots ever allocated.
	pub fn capacity(&self) -> usize {
		self.generations.len()
	}

	/// Iterates over all allocated entities in slot order.
	pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
		self.alive.iter_ones().map(|i| Entity(i as u32))
	}

	/// Whether the entity is queued for destruction at the end of the tick.
	pub fn is_pending_destruction(&self, entity: Entity) -> bool {
		self.pending_mask.get(entity.index()) && self.component_count(entity) == 0
	}

	pub(crate) fn increment(&mut self, entity: Entity) {
		self.component_counts[entity.index()] += 1;
	}

	pub(crate) fn decrement(&mut self, entity: Entity) {
		let count = &mut self.component_counts[entity.index()];
		debug_assert!(*count > 0, "component count underflow for entity {}", entity);
		*count = count.saturating_sub(1);

		if *count == 0 {
			self.enqueue(entity);
		}
	}

	/// Drops the component count to zero and queues the entity for destruction.
	pub(crate) fn clear(&mut self, entity: Entity) {
		self.component_counts[entity.index()] = 0;
		self.enqueue(entity);
	}

	fn enqueue(&mut self, entity: Entity) {
		if !self.pending_mask.get(entity.index()) {
			self.pending_mask.set(entity.index(), true);
			self.pending.push(entity.slot());
		}
	}

	/// Destroys every queued entity that is still componentless.
	///
	/// Destroyed slots get their generation bumped and return to the free list.
	/// Returns the number of destroyed entities.
	pub(crate) fn flush(&mut self) -> usize {
		let mut destroyed = 0;

		for slot in std::mem::take(&mut self.pending) {
			let entity = Entity(slot);
			self.pending_mask.set(entity.index(), false);

			if !self.is_alive(entity) || self.component_counts[entity.index()] != 0 {
				continue;
			}

			let generation = &mut self.generations[entity.index()];
			*generation = match generation.wrapping_add(1) {
				0 => 1,
				next => next,
			};

			self.alive.set(entity.index(), false);
			self.alive_count -= 1;
			self.free.push(slot);
			destroyed += 1;

			log::trace!("destroyed entity #{}", slot);
		}

		destroyed
	}
}
