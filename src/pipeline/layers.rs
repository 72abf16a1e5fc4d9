use crate::error::ConfigError;

pub const PRE_BEGIN: &str = "PRE_BEGIN";
pub const BEGIN: &str = "BEGIN";
pub const BASIC: &str = "BASIC";
pub const END: &str = "END";
pub const POST_END: &str = "POST_END";

/// Where a new layer goes relative to its anchor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LayerPosition {
	Before,
	After,
}

/// The ordered list of named layers.
///
/// Starts as `PRE_BEGIN < BEGIN < BASIC < END < POST_END`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LayerList {
	layers: Vec<String>,
}

impl LayerList {
	pub fn new() -> Self {
		Self {
			layers: [PRE_BEGIN, BEGIN, BASIC, END, POST_END].iter().map(|l| l.to_string()).collect(),
		}
	}

	/// Inserts `name` right before or after `anchor`.
	///
	/// Fails with [ConfigError::UnknownLayer] if `anchor` doesn't exist and with
	/// [ConfigError::DuplicateLayer] if `name` already does.
	pub fn insert(
		&mut self, anchor: &str, name: impl Into<String>, position: LayerPosition,
	) -> Result<&mut Self, ConfigError> {
		let name = name.into();
		let anchor_index = self.index_of(anchor).ok_or_else(|| ConfigError::UnknownLayer {
			layer: anchor.to_string(),
		})?;

		if self.contains(&name) {
			return Err(ConfigError::DuplicateLayer { layer: name });
		}

		let index = match position {
			LayerPosition::Before => anchor_index,
			LayerPosition::After => anchor_index + 1,
		};

		log::trace!("inserting layer {} {:?} {}", name, position, anchor);
		self.layers.insert(index, name);
		Ok(self)
	}

	pub fn insert_before(&mut self, anchor: &str, name: impl Into<String>) -> Result<&mut Self, ConfigError> {
		self.insert(anchor, name, LayerPosition::Before)
	}

	pub fn insert_after(&mut self, anchor: &str, name: impl Into<String>) -> Result<&mut Self, ConfigError> {
		self.insert(anchor, name, LayerPosition::After)
	}

	pub fn contains(&self, layer: &str) -> bool {
		self.index_of(layer).is_some()
	}

	/// Position of `layer` in the resolved order.
	pub fn index_of(&self, layer: &str) -> Option<usize> {
		self.layers.iter().position(|l| l == layer)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
		self.layers.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.layers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}
}

impl Default for LayerList {
	fn default() -> Self {
		Self::new()
	}
}
