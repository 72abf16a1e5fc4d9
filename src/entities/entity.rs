use std::fmt::{Display, Formatter};

/// A bare entity slot.
///
/// Slots are recycled once an entity is destroyed, so an [Entity] must not be
/// kept past the tick it was obtained in. Use an [EntityHandle] for that.
#[derive(Default, Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Entity(pub(crate) u32);

impl Entity {
	/// The slot index of this entity.
	#[inline(always)]
	pub const fn slot(self) -> u32 {
		self.0
	}

	#[inline(always)]
	pub(crate) const fn index(self) -> usize {
		self.0 as usize
	}
}

impl Display for Entity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A generation-tagged reference to an [Entity], safe to hold across ticks.
///
/// A handle is valid as long as the generation stored in the registry for its slot
/// matches the handle's generation. Generations start at 1, so [EntityHandle::NULL]
/// never resolves.
#[derive(Default, Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct EntityHandle {
	slot: u32,
	generation: u32,
}

impl EntityHandle {
	/// A handle that never refers to a live entity.
	pub const NULL: EntityHandle = EntityHandle { slot: 0, generation: 0 };

	pub(crate) const fn new(slot: u32, generation: u32) -> Self {
		Self { slot, generation }
	}

	#[inline(always)]
	pub const fn slot(&self) -> u32 {
		self.slot
	}

	#[inline(always)]
	pub const fn generation(&self) -> u32 {
		self.generation
	}

	pub const fn is_null(&self) -> bool {
		self.generation == 0
	}

	/// Packs the handle into a single `u64`, generation in the high half.
	pub const fn to_bits(self) -> u64 {
		((self.generation as u64) << 32) | self.slot as u64
	}

	/// Unpacks a handle produced by [EntityHandle::to_bits].
	pub const fn from_bits(bits: u64) -> Self {
		Self {
			slot: bits as u32,
			generation: (bits >> 32) as u32,
		}
	}
}

impl From<EntityHandle> for u64 {
	fn from(handle: EntityHandle) -> Self {
		handle.to_bits()
	}
}

impl From<u64> for EntityHandle {
	fn from(bits: u64) -> Self {
		Self::from_bits(bits)
	}
}

impl Display for EntityHandle {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}v{}", self.slot, self.generation)
	}
}
