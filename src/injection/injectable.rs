use std::any::{type_name, Any, TypeId};
use std::rc::Rc;

/// A value that can be injected into systems.
///
/// Override [Injectable::ancestors] to let the value also reach systems subscribed to a
/// more general type, such as a trait object it implements:
///
/// ```ignore
/// impl Injectable for Gravity {
///     fn ancestors(ancestors: &mut Ancestors<Self>) {
///         ancestors.add::<dyn Force>(|gravity| gravity as Rc<dyn Force>);
///     }
/// }
/// ```
///
/// Ancestor lists are not transitive; list every type the value should be reachable as.
pub trait Injectable: Sized + 'static {
	fn ancestors(_ancestors: &mut Ancestors<Self>) {}
}

/// A value prepared for delivery as one specific type.
pub(crate) struct InjectionForm {
	pub type_id: TypeId,
	pub type_name: &'static str,
	pub value: Box<dyn Any>,
}

impl InjectionForm {
	pub fn new<T: ?Sized + 'static>(value: Rc<T>) -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			type_name: type_name::<T>(),
			value: Box::new(value),
		}
	}
}

/// Collects the ancestor forms of an injected value.
pub struct Ancestors<T> {
	value: Rc<T>,
	pub(crate) forms: Vec<InjectionForm>,
}

impl<T: 'static> Ancestors<T> {
	pub(crate) fn new(value: T) -> Self {
		let value = Rc::new(value);
		let forms = vec![InjectionForm::new::<T>(Rc::clone(&value))];
		Self { value, forms }
	}

	/// Declares that the value may also be delivered as an `A`.
	pub fn add<A: ?Sized + 'static>(&mut self, upcast: fn(Rc<T>) -> Rc<A>) -> &mut Self {
		let type_id = TypeId::of::<A>();
		if !self.forms.iter().any(|f| f.type_id == type_id) {
			let value = upcast(Rc::clone(&self.value));
			self.forms.push(InjectionForm::new::<A>(value));
		}
		self
	}
}
