use crate::pipeline::PipelineBuilder;

/// A reusable bundle of systems.
///
/// Importing a module is nothing more than running its [Module::import] against the builder;
/// the systems it adds land in the flat node list in the order they are added.
pub trait Module {
	fn import(self, builder: &mut PipelineBuilder);
}

impl<F: FnOnce(&mut PipelineBuilder)> Module for F {
	fn import(self, builder: &mut PipelineBuilder) {
		self(builder)
	}
}
