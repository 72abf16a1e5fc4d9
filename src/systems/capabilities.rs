use crate::systems::{
	DestroyProcess, Inject, InitProcess, InjectionComplete, Phase, PreInitProcess, RunProcess,
};
use crate::error::ProcessResult;
use std::any::{type_name, Any, TypeId};
use crate::world::World;
use paste::paste;
use std::rc::Rc;

pub(crate) type PhaseFn<S> = fn(&mut S, &mut World) -> ProcessResult;
pub(crate) type DeliverFn<S> = fn(&mut S, &dyn Any) -> bool;

pub(crate) struct Subscription<S> {
	pub type_id: TypeId,
	pub type_name: &'static str,
	pub deliver: DeliverFn<S>,
}

/// The capability set of a system: one callback slot per phase plus its injection subscriptions.
///
/// Each registration method is only available when the system implements the matching trait.
pub struct Capabilities<S> {
	pub(crate) phases: [Option<PhaseFn<S>>; Phase::COUNT],
	pub(crate) injection_complete: Option<fn(&mut S)>,
	pub(crate) subscriptions: Vec<Subscription<S>>,
}

impl<S> Default for Capabilities<S> {
	fn default() -> Self {
		Self {
			phases: [None; Phase::COUNT],
			injection_complete: None,
			subscriptions: Vec::new(),
		}
	}
}

macro_rules! phase_capabilities {
	($($method: ident: $process: ident),* $(,)?) => {
		paste! {
			impl<S: 'static> Capabilities<S> {
				$(
					#[doc = concat!("Declares the [`", stringify!($process), "`] capability.")]
					pub fn $method(&mut self) -> &mut Self
					where
						S: $process,
					{
						self.phases[Phase::[<$method:camel>] as usize] = Some(<S as $process>::$method);
						self
					}
				)*
			}
		}
	};
}

phase_capabilities!(
	pre_init: PreInitProcess,
	init: InitProcess,
	run: RunProcess,
	destroy: DestroyProcess,
);

impl<S: 'static> Capabilities<S> {
	/// Declares the [`InjectionComplete`] capability.
	pub fn injection_complete(&mut self) -> &mut Self
	where
		S: InjectionComplete,
	{
		self.injection_complete = Some(<S as InjectionComplete>::on_injection_complete);
		self
	}

	/// Subscribes to injected values of type `T`.
	/// Subscribing to the same type twice has no effect.
	pub fn inject<T: ?Sized + 'static>(&mut self) -> &mut Self
	where
		S: Inject<T>,
	{
		let type_id = TypeId::of::<T>();
		if !self.subscriptions.iter().any(|s| s.type_id == type_id) {
			self.subscriptions.push(Subscription {
				type_id,
				type_name: type_name::<T>(),
				deliver: deliver::<S, T>,
			});
		}
		self
	}

	/// Whether the phase's callback slot is filled.
	pub fn supports(&self, phase: Phase) -> bool {
		self.phases[phase as usize].is_some()
	}

	/// Whether the system subscribed to `T`.
	pub fn subscribes_to<T: ?Sized + 'static>(&self) -> bool {
		self.subscriptions.iter().any(|s| s.type_id == TypeId::of::<T>())
	}
}

fn deliver<S: Inject<T>, T: ?Sized + 'static>(system: &mut S, value: &dyn Any) -> bool {
	match value.downcast_ref::<Rc<T>>() {
		Some(value) => {
			system.inject(Rc::clone(value));
			true
		},
		None => false,
	}
}
