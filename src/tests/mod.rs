mod layer_tests;
mod injection_tests;

use crate::systems::{DestroyProcess, InitProcess, Phase, PreInitProcess, RunProcess, System};
use crate::components::Component;
use crate::error::ProcessResult;
use std::cell::RefCell;
use crate::world::World;
use std::rc::Rc;

pub(crate) fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq, Component)]
pub(crate) struct Position(pub f32, pub f32);

#[derive(Clone, Debug, PartialEq, Component)]
pub(crate) struct Health {
	pub value: i32,
}

#[derive(Clone, Debug, PartialEq, Component)]
pub(crate) struct Name(pub String);

#[derive(Clone, Debug, Component)]
pub(crate) struct Frozen;

#[derive(Clone, Debug, Component)]
pub(crate) struct Selected {}

/// Shared call log used to observe execution order.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
	pub fn push(&self, entry: impl Into<String>) {
		self.0.borrow_mut().push(entry.into());
	}

	pub fn entries(&self) -> Vec<String> {
		self.0.borrow().clone()
	}

	/// Names recorded for `phase`, in call order.
	pub fn phase(&self, phase: Phase) -> Vec<String> {
		let suffix = format!(":{}", phase);
		self.0
			.borrow()
			.iter()
			.filter_map(|e| e.strip_suffix(suffix.as_str()).map(str::to_string))
			.collect()
	}

	pub fn clear(&self) {
		self.0.borrow_mut().clear();
	}
}

/// Records `name:phase` into a [CallLog] for every phase it is called in.
#[derive(System)]
#[system(pre_init, init, run, destroy)]
pub(crate) struct Probe {
	name: &'static str,
	log: CallLog,
}

impl Probe {
	pub fn new(name: &'static str, log: &CallLog) -> Self {
		Self { name, log: log.clone() }
	}

	fn record(&self, phase: Phase) -> ProcessResult {
		self.log.push(format!("{}:{}", self.name, phase));
		Ok(())
	}
}

impl PreInitProcess for Probe {
	fn pre_init(&mut self, _: &mut World) -> ProcessResult {
		self.record(Phase::PreInit)
	}
}

impl InitProcess for Probe {
	fn init(&mut self, _: &mut World) -> ProcessResult {
		self.record(Phase::Init)
	}
}

impl RunProcess for Probe {
	fn run(&mut self, _: &mut World) -> ProcessResult {
		self.record(Phase::Run)
	}
}

impl DestroyProcess for Probe {
	fn destroy(&mut self, _: &mut World) -> ProcessResult {
		self.record(Phase::Destroy)
	}
}
