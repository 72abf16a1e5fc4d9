use crate::components::{Storage, StorageMut};
use crate::data_structures::BitField;
use std::marker::PhantomData;
use crate::entities::Entity;

const EMPTY: u32 = u32::MAX;

/// Membership-only storage for field-less marker components.
///
/// Membership checks hit a [BitField]; a dense member list with a sparse index
/// keeps iteration contiguous and removal O(1).
pub struct TagPool<T> {
	bits: BitField,
	entities: Vec<Entity>,
	sparse: Vec<u32>,
	marker: PhantomData<fn() -> T>,
}

impl<T> TagPool<T> {
	/// Iterates over members in dense order.
	pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
		self.entities.iter().copied()
	}

	fn insert_member(&mut self, entity: Entity) -> bool {
		if self.bits.get(entity.index()) {
			return false;
		}

		if self.sparse.len() <= entity.index() {
			self.sparse.resize(entity.index() + 1, EMPTY);
		}

		self.bits.set(entity.index(), true);
		self.sparse[entity.index()] = self.entities.len() as u32;
		self.entities.push(entity);
		true
	}
}

impl<T> Default for TagPool<T> {
	fn default() -> Self {
		Self {
			bits: BitField::new(),
			entities: Vec::new(),
			sparse: Vec::new(),
			marker: PhantomData,
		}
	}
}

impl<T: Clone + 'static> Storage<T> for TagPool<T> {
	#[inline(always)]
	fn contains(&self, entity: Entity) -> bool {
		self.bits.get(entity.index())
	}

	fn entities(&self) -> &[Entity] {
		&self.entities
	}
}

impl<T> StorageMut<T> for TagPool<T> {
	fn with_capacity(capacity: usize) -> Self {
		Self {
			bits: BitField::with_capacity(capacity),
			entities: Vec::with_capacity(capacity),
			sparse: Vec::with_capacity(capacity),
			marker: PhantomData,
		}
	}

	fn insert(&mut self, entity: Entity, _: T) -> bool {
		self.insert_member(entity)
	}

	fn remove(&mut self, entity: Entity) -> bool {
		if !self.bits.get(entity.index()) {
			return false;
		}

		let index = self.sparse[entity.index()] as usize;
		self.entities.swap_remove(index);
		if let Some(&moved) = self.entities.get(index) {
			self.sparse[moved.index()] = index as u32;
		}

		self.sparse[entity.index()] = EMPTY;
		self.bits.set(entity.index(), false);
		true
	}

	fn copy(&mut self, src: Entity, dst: Entity) -> Option<bool> {
		match self.bits.get(src.index()) {
			true => Some(self.insert_member(dst)),
			false => None,
		}
	}
}

