/// Sizing options for a [World](crate::world::World).
///
/// Capacities are only pre-allocation hints; every structure still grows on demand.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorldConfig {
	/// Number of entity slots reserved up front.
	pub entity_capacity: usize,
	/// Number of members reserved by every newly registered component pool.
	pub pool_capacity: usize,
}

impl WorldConfig {
	pub const DEFAULT_ENTITY_CAPACITY: usize = 512;
	pub const DEFAULT_POOL_CAPACITY: usize = 128;

	pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
		self.entity_capacity = capacity;
		self
	}

	pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
		self.pool_capacity = capacity;
		self
	}
}

impl Default for WorldConfig {
	fn default() -> Self {
		Self {
			entity_capacity: Self::DEFAULT_ENTITY_CAPACITY,
			pool_capacity: Self::DEFAULT_POOL_CAPACITY,
		}
	}
}
