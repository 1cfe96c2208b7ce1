//! The declarative input shape: [`Descriptor`]s and the [`Child`] values nested inside them.

use crate::value::{number_to_text, Props, Value};
use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;

/// Anything that can be rendered into a parent node.
///
/// `N` is the host document's node handle type.
pub enum Child<N> {
	/// Replaces the parent's content when rendered.
	Text(String),
	/// An already-constructed node, appended as-is.
	Node(N),
	/// Rendered element by element, in order.
	List(Vec<Child<N>>),
	/// Invoked at render time. The result is rendered in its place.
	Thunk(Rc<dyn Fn() -> Child<N>>),
	/// Only the descriptor's children are rendered.
	Descriptor(Box<Descriptor<N>>),
}

impl<N> Child<N> {
	/// A child that renders nothing.
	#[must_use]
	pub fn empty() -> Self {
		Child::List(Vec::new())
	}

	pub fn thunk(f: impl Fn() -> Child<N> + 'static) -> Self {
		Child::Thunk(Rc::new(f))
	}

	/// Collects `children` into a [`Child::List`].
	pub fn list<C: Into<Child<N>>>(children: impl IntoIterator<Item = C>) -> Self {
		Child::List(children.into_iter().map(Into::into).collect())
	}
}

impl<N: Clone> Clone for Child<N> {
	fn clone(&self) -> Self {
		match self {
			Child::Text(text) => Child::Text(text.clone()),
			Child::Node(node) => Child::Node(node.clone()),
			Child::List(list) => Child::List(list.clone()),
			Child::Thunk(thunk) => Child::Thunk(Rc::clone(thunk)),
			Child::Descriptor(descriptor) => Child::Descriptor(descriptor.clone()),
		}
	}
}

impl<N: Debug> Debug for Child<N> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Child::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Child::Node(node) => f.debug_tuple("Node").field(node).finish(),
			Child::List(list) => f.debug_tuple("List").field(list).finish(),
			Child::Thunk(thunk) => write!(f, "Thunk({:p})", Rc::as_ptr(thunk).cast::<()>()),
			Child::Descriptor(descriptor) => f.debug_tuple("Descriptor").field(descriptor).finish(),
		}
	}
}

impl<N> From<&str> for Child<N> {
	fn from(text: &str) -> Self {
		Child::Text(text.to_owned())
	}
}

impl<N> From<String> for Child<N> {
	fn from(text: String) -> Self {
		Child::Text(text)
	}
}

impl<N> From<f64> for Child<N> {
	fn from(n: f64) -> Self {
		Child::Text(number_to_text(n))
	}
}

impl<N> From<i32> for Child<N> {
	fn from(n: i32) -> Self {
		Child::Text(n.to_string())
	}
}

impl<N> From<bool> for Child<N> {
	fn from(b: bool) -> Self {
		Child::Text(b.to_string())
	}
}

impl<N> From<Vec<Child<N>>> for Child<N> {
	fn from(list: Vec<Child<N>>) -> Self {
		Child::List(list)
	}
}

impl<N> From<Descriptor<N>> for Child<N> {
	fn from(descriptor: Descriptor<N>) -> Self {
		Child::Descriptor(Box::new(descriptor))
	}
}

/// `None` renders nothing.
impl<N, T: Into<Child<N>>> From<Option<T>> for Child<N> {
	fn from(child: Option<T>) -> Self {
		child.map_or_else(Child::empty, Into::into)
	}
}

/// Declarative description of one element, minus its tag name.
///
/// The tag comes from the [`Tag`](`crate::Tag`) that builds it.
/// An `id` property that is a string or number makes the descriptor *identified*,
/// which registers it for later [`flush`](`crate::HotDom::flush`)es.
///
/// Its `children` are kept apart from the properties and are never written onto the built node.
/// The registered copy keeps them, see [`HotDom::registered`](`crate::HotDom::registered`).
pub struct Descriptor<N> {
	pub props: Props,
	pub children: Child<N>,
}

impl<N> Default for Descriptor<N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<N> Descriptor<N> {
	#[must_use]
	pub fn new() -> Self {
		Self { props: Props::new(), children: Child::empty() }
	}

	/// Sets the `id` property.
	#[must_use]
	pub fn id(self, id: impl Into<String>) -> Self {
		self.prop("id", id.into())
	}

	/// Sets a property, replacing any previous value under `key`.
	#[must_use]
	pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props.insert(key.into(), value.into());
		self
	}

	/// Sets a property to a closure.
	///
	/// Under `className` and `style` it is evaluated on every (re)build.
	/// Under any other key the closure itself is assigned (which is how event handlers are bound).
	#[must_use]
	pub fn computed(self, key: impl Into<String>, f: impl Fn() -> Value + 'static) -> Self {
		self.prop(key, Value::computed(f))
	}

	#[must_use]
	pub fn children(mut self, children: impl Into<Child<N>>) -> Self {
		self.children = children.into();
		self
	}

	/// The registry key of this descriptor, if it is identified.
	#[must_use]
	pub fn identifier(&self) -> Option<String> {
		match self.props.get("id")? {
			Value::String(id) => Some(id.clone()),
			Value::Number(n) => Some(number_to_text(*n)),
			_ => None,
		}
	}
}

impl<N: Clone> Clone for Descriptor<N> {
	fn clone(&self) -> Self {
		Self {
			props: self.props.clone(),
			children: self.children.clone(),
		}
	}
}

impl<N: Debug> Debug for Descriptor<N> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Descriptor").field("props", &self.props).field("children", &self.children).finish()
	}
}
