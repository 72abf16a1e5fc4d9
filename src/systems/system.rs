use crate::systems::Capabilities;
use crate::error::ProcessResult;
use std::fmt::{Display, Formatter};
use crate::world::World;
use std::rc::Rc;

/// A stateless unit of behaviour driven by a [Pipeline](crate::pipeline::Pipeline).
///
/// ```ignore
/// #[derive(System)]
/// #[system(init, run, inject(Settings))]
/// struct Movement {
///     settings: Option<Rc<Settings>>,
/// }
/// ```
pub trait System: Sized + 'static {
	/// Declares which phases and injected types this system takes part in.
	fn capabilities(caps: &mut Capabilities<Self>);
}

/// Called once before [InitProcess::init], after all injections were delivered.
pub trait PreInitProcess {
	fn pre_init(&mut self, world: &mut World) -> ProcessResult;
}

pub trait InitProcess {
	fn init(&mut self, world: &mut World) -> ProcessResult;
}

/// Called once per tick.
pub trait RunProcess {
	fn run(&mut self, world: &mut World) -> ProcessResult;
}

pub trait DestroyProcess {
	fn destroy(&mut self, world: &mut World) -> ProcessResult;
}

/// Receives injected values of type `T`, or of any type registered as extending `T`.
pub trait Inject<T: ?Sized + 'static> {
	fn inject(&mut self, value: Rc<T>);
}

/// Notified once after every injection of the build has been delivered.
pub trait InjectionComplete {
	fn on_injection_complete(&mut self);
}

/// A lifecycle phase driven by the pipeline.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Phase {
	PreInit,
	Init,
	Run,
	Destroy,
}

impl Phase {
	pub const COUNT: usize = 4;
	pub const ALL: [Phase; Phase::COUNT] = [Phase::PreInit, Phase::Init, Phase::Run, Phase::Destroy];
}

impl Display for Phase {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Phase::PreInit => "pre-init",
			Phase::Init => "init",
			Phase::Run => "run",
			Phase::Destroy => "destroy",
		};
		f.write_str(name)
	}
}
