use crate::systems::{Capabilities, Inject, InitProcess, InjectionComplete, PreInitProcess, System};
use crate::pipeline::{PipelineBuilder, BEGIN};
use crate::injection::{Ancestors, Injectable};
use crate::error::{ConfigError, ProcessResult};
use crate::tests::{init_logger, CallLog};
use crate::world::World;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
struct Settings {
	speed: f32,
}

impl Injectable for Settings {}

trait Force {
	fn strength(&self) -> f32;
}

struct Gravity(f32);

impl Force for Gravity {
	fn strength(&self) -> f32 {
		self.0
	}
}

impl Injectable for Gravity {
	fn ancestors(ancestors: &mut Ancestors<Self>) {
		ancestors.add::<dyn Force>(|gravity| gravity as Rc<dyn Force>);
	}
}

struct Wind(f32);

impl Force for Wind {
	fn strength(&self) -> f32 {
		self.0
	}
}

impl Injectable for Wind {
	fn ancestors(ancestors: &mut Ancestors<Self>) {
		ancestors.add::<dyn Force>(|wind| wind as Rc<dyn Force>);
	}
}

/// Fails its init if the settings never arrived.
#[derive(System, Default)]
#[system(init, inject(Settings))]
struct Movement {
	settings: Option<Rc<Settings>>,
	received: u32,
}

impl Inject<Settings> for Movement {
	fn inject(&mut self, value: Rc<Settings>) {
		self.settings = Some(value);
		self.received += 1;
	}
}

impl InitProcess for Movement {
	fn init(&mut self, _: &mut World) -> ProcessResult {
		match &self.settings {
			Some(_) => Ok(()),
			None => Err("settings were not injected".into()),
		}
	}
}

/// Collects every force it is given through the trait object.
#[derive(Default)]
struct ForceSink {
	forces: Vec<Rc<dyn Force>>,
}

impl System for ForceSink {
	fn capabilities(caps: &mut Capabilities<Self>) {
		caps.inject::<dyn Force>();
	}
}

impl Inject<dyn Force> for ForceSink {
	fn inject(&mut self, value: Rc<dyn Force>) {
		self.forces.push(value);
	}
}

/// Subscribes to both the concrete type and its trait object.
#[derive(Default)]
struct GravityWatcher {
	concrete: u32,
	general: u32,
}

impl System for GravityWatcher {
	fn capabilities(caps: &mut Capabilities<Self>) {
		caps.inject::<dyn Force>().inject::<Gravity>().inject::<Gravity>();
	}
}

impl Inject<dyn Force> for GravityWatcher {
	fn inject(&mut self, _: Rc<dyn Force>) {
		self.general += 1;
	}
}

impl Inject<Gravity> for GravityWatcher {
	fn inject(&mut self, _: Rc<Gravity>) {
		self.concrete += 1;
	}
}

/// Logs injection, completion and callbacks to check their relative order.
#[derive(System)]
#[system(pre_init, init, injection_complete, inject(Settings))]
struct Tracer {
	name: &'static str,
	log: CallLog,
}

impl Inject<Settings> for Tracer {
	fn inject(&mut self, _: Rc<Settings>) {
		self.log.push(format!("{}:inject", self.name));
	}
}

impl InjectionComplete for Tracer {
	fn on_injection_complete(&mut self) {
		self.log.push(format!("{}:complete", self.name));
	}
}

impl PreInitProcess for Tracer {
	fn pre_init(&mut self, _: &mut World) -> ProcessResult {
		self.log.push(format!("{}:pre-init", self.name));
		Ok(())
	}
}

impl InitProcess for Tracer {
	fn init(&mut self, _: &mut World) -> ProcessResult {
		self.log.push(format!("{}:init", self.name));
		Ok(())
	}
}

#[test]
pub fn values_reach_subscribers_before_init() {
	init_logger();
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder.add(Movement::default()).add(Movement::default());
	builder.inject(Settings { speed: 2.5 }).unwrap();

	let pipeline = builder.build_and_init(&mut world).unwrap();
	for movement in pipeline.get_systems::<Movement>() {
		assert_eq!(movement.received, 1, "Every subscriber must receive the value exactly once");
		assert_eq!(movement.settings.as_deref(), Some(&Settings { speed: 2.5 }));
	}

	let shared = pipeline.get_systems::<Movement>().filter_map(|m| m.settings.clone()).collect::<Vec<_>>();
	assert!(Rc::ptr_eq(&shared[0], &shared[1]), "Subscribers must share the injected value");
}

#[test]
pub fn missing_injection_surfaces_in_init() {
	let mut world = World::new();
	let mut builder = PipelineBuilder::new();
	builder.add(Movement::default());

	let mut pipeline = builder.build().unwrap();
	assert!(pipeline.init(&mut world).is_err());
	assert_eq!(pipeline.get_system::<Movement>().map(|m| m.received), Some(0));
}

#[test]
pub fn ancestors_require_a_registered_node() {
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder.add(ForceSink::default());
	builder.inject(Gravity(9.8)).unwrap();

	let pipeline = builder.build_and_init(&mut world).unwrap();
	assert!(
		pipeline.get_system::<ForceSink>().unwrap().forces.is_empty(),
		"Ancestor forms are only routed when the ancestor is a node of the graph"
	);
	assert_eq!(pipeline.injector().delivery_count(), 0);
}

#[test]
pub fn values_are_delivered_through_trait_objects() {
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder.add(ForceSink::default());
	builder.inject(Gravity(9.8)).unwrap().inject(Wind(1.5)).unwrap();
	builder.injector().add_node::<dyn Force>().unwrap();

	let pipeline = builder.build_and_init(&mut world).unwrap();
	let strengths = pipeline
		.get_system::<ForceSink>()
		.unwrap()
		.forces
		.iter()
		.map(|f| f.strength())
		.collect::<Vec<_>>();
	assert_eq!(strengths, vec![9.8, 1.5], "Values must arrive in injection order");

	let node = pipeline.injector().node::<dyn Force>().unwrap();
	assert_eq!(node.subscribers(), &[0]);
	assert_eq!(node.children().len(), 2);
	assert!(node.children()[0].ends_with("Gravity"));
	assert!(node.children()[1].ends_with("Wind"));
}

#[test]
pub fn most_specific_subscription_wins() {
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder.injector().add_node::<dyn Force>().unwrap();
	builder.add(GravityWatcher::default());
	builder.inject(Gravity(9.8)).unwrap().inject(Wind(3.0)).unwrap();

	let pipeline = builder.build_and_init(&mut world).unwrap();
	let watcher = pipeline.get_system::<GravityWatcher>().unwrap();
	assert_eq!(watcher.concrete, 1, "Gravity must arrive once, as itself");
	assert_eq!(watcher.general, 1, "Only wind should arrive through the trait object");
	assert_eq!(pipeline.nodes()[0].subscriptions().len(), 2, "Repeated subscriptions collapse");
}

#[test]
pub fn injection_completes_before_callbacks() {
	let log = CallLog::default();
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder
		.add(Tracer {
			name: "late",
			log: log.clone(),
		})
		.add_to_layer(
			Tracer {
				name: "early",
				log: log.clone(),
			},
			BEGIN,
			0,
		);
	builder.inject(Settings { speed: 1.0 }).unwrap();

	builder.build_and_init(&mut world).unwrap();
	assert_eq!(
		log.entries(),
		vec![
			"early:inject",
			"late:inject",
			"early:complete",
			"late:complete",
			"early:pre-init",
			"late:pre-init",
			"early:init",
			"late:init",
		]
	);
}

#[test]
pub fn injection_complete_fires_without_values() {
	let log = CallLog::default();
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder.add(Tracer {
		name: "lonely",
		log: log.clone(),
	});

	builder.build_and_init(&mut world).unwrap();
	assert_eq!(log.entries(), vec!["lonely:complete", "lonely:pre-init", "lonely:init"]);
}

#[test]
pub fn injector_freezes_after_build() {
	let mut builder = PipelineBuilder::new();
	builder.add(Movement::default());
	builder.inject(Settings { speed: 0.0 }).unwrap();

	let pipeline = builder.build().unwrap();
	assert!(pipeline.injector().is_frozen());
	assert_eq!(pipeline.injector().value_count(), 1);
	assert_eq!(pipeline.injector().delivery_count(), 1);
	assert!(pipeline.injector().contains::<Settings>());

	assert!(matches!(
		builder.inject(Settings { speed: 1.0 }),
		Err(ConfigError::InjectionAfterBuild { .. })
	));
	match builder.injector().add_node::<dyn Force>() {
		Err(ConfigError::InjectionAfterBuild { type_name }) => assert!(type_name.contains("Force")),
		other => panic!("Expected the injector to be frozen, got {:?}", other.map(|_| ())),
	}
}
