//! Delivery of externally supplied values to the systems that asked for them.
//!
//! Values are registered on the [Injector] while the pipeline is being built, and routed
//! to every system that declared [`Inject<T>`](crate::systems::Inject) for the value's type.
//! A value can also be delivered as one of its declared [ancestors](Injectable::ancestors),
//! provided that ancestor type was registered with [Injector::add_node].
//! Routing is resolved once, when the pipeline is built, and applied during
//! [Pipeline::init](crate::pipeline::Pipeline::init).

mod injectable;
mod injector;

pub use injectable::*;
pub use injector::*;
