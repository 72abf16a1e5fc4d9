use crate::components::{Storage, StorageMut};
use crate::entities::Entity;

const EMPTY: u32 = u32::MAX;

/// Dense storage for components carrying data.
///
/// Values live contiguously in `dense`, with a sparse `slot -> dense index` map on the side.
/// Removal swaps the last value into the hole, so iteration order is not stable across removals.
pub struct DataPool<T> {
	dense: Vec<T>,
	entities: Vec<Entity>,
	sparse: Vec<u32>,
}

impl<T> DataPool<T> {
	#[inline(always)]
	fn dense_index(&self, entity: Entity) -> Option<usize> {
		match self.sparse.get(entity.index()) {
			Some(&index) if index != EMPTY => Some(index as usize),
			_ => None,
		}
	}

	/// Gets a reference to the value bound to `entity`.
	pub fn get(&self, entity: Entity) -> Option<&T> {
		let index = self.dense_index(entity)?;
		Some(&self.dense[index])
	}

	/// Gets a mutable reference to the value bound to `entity`.
	pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
		let index = self.dense_index(entity)?;
		Some(&mut self.dense[index])
	}

	/// Iterates over members and their values in dense order.
	pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
		self.entities.iter().copied().zip(self.dense.iter())
	}

	/// Iterates over members and mutable references to their values in dense order.
	pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
		self.entities.iter().copied().zip(self.dense.iter_mut())
	}

	/// All values as one contiguous slice.
	pub fn values(&self) -> &[T] {
		&self.dense
	}

	pub fn values_mut(&mut self) -> &mut [T] {
		&mut self.dense
	}

	/// Removes `entity` and hands back its value.
	pub(crate) fn take(&mut self, entity: Entity) -> Option<T> {
		let index = self.dense_index(entity)?;
		let last = self.dense.len() - 1;

		let value = self.dense.swap_remove(index);
		self.entities.swap_remove(index);
		if index != last {
			let moved = self.entities[index];
			self.sparse[moved.index()] = index as u32;
		}

		self.sparse[entity.index()] = EMPTY;
		Some(value)
	}
}

#[cfg(feature = "parallel")]
mod parallel {
	use rayon::prelude::{IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator};
	use crate::components::DataPool;
	use crate::entities::Entity;

	impl<T: Send + Sync> DataPool<T> {
		/// Iterates over members and their values in parallel.
		pub fn par_iter(&self) -> impl ParallelIterator<Item = (Entity, &T)> + '_ {
			self.entities.par_iter().copied().zip(self.dense.par_iter())
		}

		/// Iterates over members and mutable references to their values in parallel.
		pub fn par_iter_mut(&mut self) -> impl ParallelIterator<Item = (Entity, &mut T)> + '_ {
			self.entities.par_iter().copied().zip(self.dense.par_iter_mut())
		}
	}
}

impl<T> Default for DataPool<T> {
	fn default() -> Self {
		Self {
			dense: Vec::new(),
			entities: Vec::new(),
			sparse: Vec::new(),
		}
	}
}

impl<T: Clone + 'static> Storage<T> for DataPool<T> {
	#[inline(always)]
	fn contains(&self, entity: Entity) -> bool {
		self.dense_index(entity).is_some()
	}

	fn entities(&self) -> &[Entity] {
		&self.entities
	}
}

impl<T: Clone> StorageMut<T> for DataPool<T> {
	fn with_capacity(capacity: usize) -> Self {
		Self {
			dense: Vec::with_capacity(capacity),
			entities: Vec::with_capacity(capacity),
			sparse: Vec::with_capacity(capacity),
		}
	}

	fn insert(&mut self, entity: Entity, value: T) -> bool {
		if self.dense_index(entity).is_some() {
			return false;
		}

		if self.sparse.len() <= entity.index() {
			self.sparse.resize(entity.index() + 1, EMPTY);
		}

		self.sparse[entity.index()] = self.dense.len() as u32;
		self.dense.push(value);
		self.entities.push(entity);
		true
	}

	fn remove(&mut self, entity: Entity) -> bool {
		self.take(entity).is_some()
	}

	fn copy(&mut self, src: Entity, dst: Entity) -> Option<bool> {
		let value = self.get(src)?.clone();
		match self.get_mut(dst) {
			Some(slot) => {
				*slot = value;
				Some(false)
			},
			None => Some(self.insert(dst, value)),
		}
	}
}
