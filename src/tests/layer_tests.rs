use crate::pipeline::{LayerList, LayerPosition, PipelineBuilder, BASIC, BEGIN, END, POST_END, PRE_BEGIN};
use crate::tests::{init_logger, CallLog, Probe};
use crate::error::ConfigError;
use crate::systems::Phase;
use crate::world::World;

#[test]
pub fn default_layer_order() {
	let layers = LayerList::new();
	assert_eq!(layers.iter().collect::<Vec<_>>(), vec![PRE_BEGIN, BEGIN, BASIC, END, POST_END]);
	assert_eq!(layers.len(), 5);
	assert!(layers.index_of(BEGIN) < layers.index_of(END));
}

#[test]
pub fn layers_order_systems() {
	init_logger();
	let log = CallLog::default();
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder
		.add_to_layer(Probe::new("A", &log), END, 0)
		.add_to_layer(Probe::new("B", &log), BASIC, 0)
		.add_to_layer(Probe::new("C", &log), BEGIN, 0);

	let mut pipeline = builder.build_and_init(&mut world).unwrap();
	pipeline.run(&mut world).unwrap();

	assert_eq!(log.phase(Phase::Run), vec!["C", "B", "A"]);
	assert_eq!(log.phase(Phase::Init), vec!["C", "B", "A"], "Every phase must follow the same order");
}

#[test]
pub fn sort_order_applies_within_a_layer() {
	let log = CallLog::default();
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder
		.add_to_layer(Probe::new("A", &log), BASIC, 0)
		.add_to_layer(Probe::new("B", &log), BASIC, -5)
		.add_to_layer(Probe::new("C", &log), BEGIN, 0);

	let mut pipeline = builder.build_and_init(&mut world).unwrap();
	pipeline.run(&mut world).unwrap();
	assert_eq!(log.phase(Phase::Run), vec!["C", "B", "A"]);
}

#[test]
pub fn sort_order_and_insertion_break_ties() {
	let log = CallLog::default();
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder
		.add_to_layer(Probe::new("late", &log), BASIC, 10)
		.add(Probe::new("first", &log))
		.add_to_layer(Probe::new("early", &log), BASIC, -5)
		.add(Probe::new("second", &log))
		.add_to_layer(Probe::new("post", &log), POST_END, -100)
		.add_to_layer(Probe::new("pre", &log), PRE_BEGIN, 100);

	let mut pipeline = builder.build_and_init(&mut world).unwrap();
	pipeline.run(&mut world).unwrap();

	assert_eq!(log.phase(Phase::Run), vec!["pre", "early", "first", "second", "late", "post"]);

	let nodes = pipeline.nodes();
	assert_eq!(nodes[2].sequence(), 1, "Insertion order must be recorded");
	assert_eq!(nodes[4].sort_order(), 10);
	assert_eq!(nodes[5].layer(), POST_END);
}

#[test]
pub fn equivalent_builders_resolve_identically() {
	let log = CallLog::default();
	let setup = |builder: &mut PipelineBuilder| {
		builder.layers().insert_before(END, "LATE").unwrap();
		builder
			.add_to_layer(Probe::new("x", &log), "LATE", 0)
			.add(Probe::new("y", &log))
			.add_to_layer(Probe::new("z", &log), BEGIN, 3);
	};

	let mut first = PipelineBuilder::new();
	setup(&mut first);
	let mut second = PipelineBuilder::new();
	setup(&mut second);

	let mut world = World::new();
	let mut a = first.build_and_init(&mut world).unwrap();
	let mut b = second.build_and_init(&mut world).unwrap();
	log.clear();

	a.run(&mut world).unwrap();
	let first_order = log.phase(Phase::Run);
	log.clear();
	b.run(&mut world).unwrap();

	assert_eq!(first_order, log.phase(Phase::Run));
	assert_eq!(first_order, vec!["z", "y", "x"]);
}

#[test]
pub fn custom_layers_are_placed_relative_to_anchors() {
	let mut layers = LayerList::new();
	layers
		.insert_after(BASIC, "PHYSICS")
		.unwrap()
		.insert_before("PHYSICS", "ANIMATION")
		.unwrap()
		.insert(PRE_BEGIN, "EARLIEST", LayerPosition::Before)
		.unwrap();

	assert_eq!(
		layers.iter().collect::<Vec<_>>(),
		vec!["EARLIEST", PRE_BEGIN, BEGIN, BASIC, "ANIMATION", "PHYSICS", END, POST_END]
	);
	assert!(layers.contains("PHYSICS"));
}

#[test]
pub fn layer_insertion_errors() {
	let mut layers = LayerList::new();

	assert_eq!(
		layers.insert_after("MISSING", "PHYSICS").err(),
		Some(ConfigError::UnknownLayer {
			layer: "MISSING".to_string()
		})
	);
	assert_eq!(
		layers.insert_before(END, BASIC).err(),
		Some(ConfigError::DuplicateLayer {
			layer: BASIC.to_string()
		})
	);
	assert_eq!(layers, LayerList::new(), "Failed insertions must leave the list untouched");
}

#[test]
pub fn unknown_layer_fails_build_without_consuming_builder() {
	let log = CallLog::default();
	let mut world = World::new();

	let mut builder = PipelineBuilder::new();
	builder.add(Probe::new("basic", &log)).add_to_layer(Probe::new("physics", &log), "PHYSICS", 0);

	match builder.build() {
		Err(ConfigError::UnknownLayer { layer }) => assert_eq!(layer, "PHYSICS"),
		Err(other) => panic!("Expected an unknown layer error, got {:?}", other),
		Ok(_) => panic!("Building with an unknown layer must fail"),
	}
	assert_eq!(builder.len(), 2, "A failed build must not consume the builder");

	builder.layers().insert_after(BASIC, "PHYSICS").unwrap();
	let mut pipeline = builder.build_and_init(&mut world).unwrap();
	pipeline.run(&mut world).unwrap();
	assert_eq!(log.phase(Phase::Run), vec!["basic", "physics"]);
}

#[test]
pub fn pipeline_reports_resolved_layers() {
	let mut builder = PipelineBuilder::new();
	builder.layers().insert_after(BEGIN, "INPUT").unwrap();
	builder.add(Probe::new("only", &CallLog::default()));

	let pipeline = builder.build().unwrap();
	assert_eq!(pipeline.layers().index_of("INPUT"), Some(2));
	assert_eq!(pipeline.nodes()[0].layer(), BASIC);

	let empty = PipelineBuilder::new().build().unwrap();
	assert!(empty.nodes().is_empty(), "An empty builder resolves to an empty pipeline");
}
