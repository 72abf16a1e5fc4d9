use crate::pipeline::PipelineNode;
use crate::error::PipelineError;
use crate::systems::Phase;
use crate::world::World;

/// The ordered subset of pipeline nodes taking part in one phase.
pub(crate) struct ProcessRunner {
	phase: Phase,
	nodes: Vec<usize>,
}

impl ProcessRunner {
	pub fn new(phase: Phase, nodes: &[PipelineNode]) -> Self {
		Self {
			phase,
			nodes: nodes.iter().enumerate().filter(|(_, n)| n.supports(phase)).map(|(i, _)| i).collect(),
		}
	}

	pub fn nodes(&self) -> &[usize] {
		&self.nodes
	}

	/// Calls every node in order. The first failing callback aborts the phase.
	pub fn execute(&self, nodes: &mut [PipelineNode], world: &mut World) -> Result<(), PipelineError> {
		for &index in self.nodes.iter() {
			let node = &mut nodes[index];
			if let Err(source) = node.system.call(self.phase, world) {
				log::error!("system {} failed during {}: {}", node.name(), self.phase, source);
				return Err(PipelineError::Process {
					system: node.name(),
					phase: self.phase,
					source,
				});
			}
		}
		Ok(())
	}
}
