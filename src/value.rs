//! Property values as they appear on [`Descriptor`](`crate::Descriptor`)s and constructed nodes.

use core::fmt::{self, Debug, Display, Formatter};
use indexmap::IndexMap;
use std::rc::Rc;

/// An insertion-ordered attribute-bag.
///
/// This is both what a [`Descriptor`](`crate::Descriptor`) carries and what the [merge engine](`crate::merge`) writes into.
pub type Props = IndexMap<String, Value>;

/// A property value.
///
/// [`Value::Bag`] is the only variant that is merged recursively.
/// [`Value::List`] counts as a scalar for merging purposes and is always assigned as a whole.
#[derive(Clone)]
pub enum Value {
	Null,
	Bool(bool),
	Number(f64),
	String(String),
	Bag(Props),
	List(Vec<Value>),
	/// Evaluated at construction time for the `className` and `style` keys, assigned as-is everywhere else.
	Computed(Computed),
}

/// A zero-argument closure producing a [`Value`].
///
/// Equality is identity: two [`Computed`]s are equal only if they share the same closure.
#[derive(Clone)]
pub struct Computed(Rc<dyn Fn() -> Value>);

impl Computed {
	pub fn new(f: impl Fn() -> Value + 'static) -> Self {
		Self(Rc::new(f))
	}

	/// Invokes the closure.
	#[must_use]
	pub fn call(&self) -> Value {
		(self.0)()
	}

	/// Identifies the shared closure, stable for as long as any clone is alive.
	pub(crate) fn key(&self) -> *const () {
		Rc::as_ptr(&self.0).cast::<()>()
	}
}

impl PartialEq for Computed {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl Debug for Computed {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "Computed({:p})", self.key())
	}
}

impl Value {
	/// Wraps `f` as [`Value::Computed`].
	pub fn computed(f: impl Fn() -> Value + 'static) -> Self {
		Self::Computed(Computed::new(f))
	}

	/// JavaScript truthiness.
	///
	/// Bags, lists and closures are always truthy, even when empty.
	#[must_use]
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Null => false,
			Value::Bool(b) => *b,
			Value::Number(n) => *n != 0.0 && !n.is_nan(),
			Value::String(s) => !s.is_empty(),
			Value::Bag(_) | Value::List(_) | Value::Computed(_) => true,
		}
	}

	#[must_use]
	pub fn as_bag(&self) -> Option<&Props> {
		match self {
			Value::Bag(bag) => Some(bag),
			_ => None,
		}
	}

	/// The string a value stringifies to when written into a document, if it has a scalar representation.
	#[must_use]
	pub fn to_text(&self) -> Option<String> {
		match self {
			Value::Null => Some("null".to_owned()),
			Value::Bool(b) => Some(b.to_string()),
			Value::Number(n) => Some(number_to_text(*n)),
			Value::String(s) => Some(s.clone()),
			Value::Bag(_) | Value::List(_) | Value::Computed(_) => None,
		}
	}
}

/// Formats `n` the way a script engine would print it in a template string.
pub(crate) fn number_to_text(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_owned()
	} else if n.is_infinite() {
		let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
		text.to_owned()
	} else if n == 0.0 {
		// Covers `-0.0`.
		"0".to_owned()
	} else if n.abs() >= 1e21 || n.abs() < 1e-6 {
		// Shortest round-trip digits either way, but scripts always sign the exponent.
		let text = format!("{:e}", n);
		match text.split_once('e') {
			Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
			_ => text,
		}
	} else {
		n.to_string()
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Bag(a), Value::Bag(b)) => a == b,
			(Value::List(a), Value::List(b)) => a == b,
			(Value::Computed(a), Value::Computed(b)) => a == b,
			_ => false,
		}
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(b) => Debug::fmt(b, f),
			Value::Number(n) => f.write_str(&number_to_text(*n)),
			Value::String(s) => Debug::fmt(s, f),
			Value::Bag(bag) => f.debug_map().entries(bag.iter()).finish(),
			Value::List(list) => f.debug_list().entries(list.iter()).finish(),
			Value::Computed(computed) => Debug::fmt(computed, f),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.to_text() {
			Some(text) => f.write_str(&text),
			None => Debug::fmt(self, f),
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Value::Number(n)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Value::Number(n.into())
	}
}

impl From<u32> for Value {
	fn from(n: u32) -> Self {
		Value::Number(n.into())
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_owned())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}

impl From<Props> for Value {
	fn from(bag: Props) -> Self {
		Value::Bag(bag)
	}
}

impl From<Vec<Value>> for Value {
	fn from(list: Vec<Value>) -> Self {
		Value::List(list)
	}
}

impl From<Computed> for Value {
	fn from(computed: Computed) -> Self {
		Value::Computed(computed)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

/// Builds a [`Props`] bag from `key => value` pairs. Values go through [`Into<Value>`].
///
/// ```
/// use hot_dom::{props, Value};
///
/// let style = props! { "color" => "red", "width" => 3 };
/// assert_eq!(style["width"], Value::Number(3.0));
/// ```
#[macro_export]
macro_rules! props {
	($($key:expr => $value:expr),* $(,)?) => {{
		#[allow(unused_mut)]
		let mut props = $crate::Props::new();
		$(props.insert(::std::string::String::from($key), $crate::Value::from($value));)*
		props
	}};
}

#[cfg(test)]
mod tests {
	use super::number_to_text;

	#[test]
	fn plain_range() {
		assert_eq!(number_to_text(1.5), "1.5");
		assert_eq!(number_to_text(-2.0), "-2");
		assert_eq!(number_to_text(0.000_001), "0.000001");
		assert_eq!(number_to_text(123_456_789_012_345_680_000.0), "123456789012345680000");
	}

	#[test]
	fn exponent_range() {
		assert_eq!(number_to_text(1e21), "1e+21");
		assert_eq!(number_to_text(-2.5e30), "-2.5e+30");
		assert_eq!(number_to_text(1e-7), "1e-7");
		assert_eq!(number_to_text(1.25e-10), "1.25e-10");
	}

	#[test]
	fn special_values() {
		assert_eq!(number_to_text(f64::NAN), "NaN");
		assert_eq!(number_to_text(f64::NEG_INFINITY), "-Infinity");
		assert_eq!(number_to_text(-0.0), "0");
	}
}
