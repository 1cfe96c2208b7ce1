//! [`Document`] implementation for browser DOMs through [`web_sys`].
//!
//! Only functional on `wasm32` targets with a JavaScript host.

use crate::{
	child::Child,
	document::Document,
	merge::{merge, CLASS_NAME, STYLE},
	value::{Computed, Props, Value},
};
use core::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
};
use hashbrown::HashMap;
use js_sys::{Array, Object, Reflect};
use tracing::{error, instrument, trace, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

impl From<web_sys::Element> for Child<web_sys::Element> {
	fn from(element: web_sys::Element) -> Self {
		Child::Node(element)
	}
}

/// Wraps a [`web_sys::Document`].
///
/// Properties are assigned onto elements the way script property assignment would.
/// [`STYLE`] entries are assigned onto the element's [`web_sys::CssStyleDeclaration`] one by one,
/// so both `fontSize` and `font-size` work, and [`CLASS_NAME`] is set as a string.
///
/// # Closures
///
/// [`Value::Computed`]s under keys other than [`CLASS_NAME`] and [`STYLE`] are assigned as JavaScript functions
/// (which is how `onclick` etc. work). There is one [`Closure`] per distinct [`Computed`], so rebuilding from the same
/// descriptor reuses it. Closures are retained by the [`WebDocument`] and only freed when it's dropped,
/// after which calling them throws.
pub struct WebDocument {
	document: web_sys::Document,
	closures: RefCell<HashMap<*const (), Closure<dyn Fn() -> JsValue>>>,
}

impl Debug for WebDocument {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("WebDocument")
			.field("document", &self.document)
			.field("closures", &self.closures.borrow().len())
			.finish()
	}
}

impl WebDocument {
	#[must_use]
	pub fn new(document: web_sys::Document) -> Self {
		Self { document, closures: RefCell::default() }
	}

	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}

	/// How many closures are being kept alive.
	#[must_use]
	pub fn closure_count(&self) -> usize {
		self.closures.borrow().len()
	}

	fn publish(&self, computed: &Computed) -> JsValue {
		// Each closure owns a clone of its `Computed`, so keys can't be reused while the entry exists.
		let mut closures = self.closures.borrow_mut();
		let closure = closures.entry(computed.key()).or_insert_with(|| {
			let computed = computed.clone();
			trace!("Created Closure.");
			Closure::wrap(Box::new(move || to_js(&computed.call())) as Box<dyn Fn() -> JsValue>)
		});
		closure.as_ref().clone()
	}

	fn assign(&self, target: &JsValue, key: &str, value: &Value) {
		let js_value = match value {
			Value::Computed(computed) => self.publish(computed),
			Value::Bag(bag) => {
				let existing = Reflect::get(target, &key.into()).unwrap_or(JsValue::UNDEFINED);
				let nested = if existing.is_object() {
					existing
				} else {
					let created: JsValue = Object::new().into();
					if let Err(error) = Reflect::set(target, &key.into(), &created) {
						return error!("Could not create nested object {:?}: {:?}", key, error);
					}
					created
				};
				for (nested_key, nested_value) in bag {
					self.assign(&nested, nested_key, nested_value);
				}
				return;
			}
			value => to_js(value),
		};
		match Reflect::set(target, &key.into(), &js_value) {
			Ok(true) => (),
			Ok(false) => warn!("Property {:?} could not be assigned.", key),
			Err(error) => error!("Could not assign property {:?}: {:?}", key, error),
		}
	}

	/// Writes the merged `props` onto `element`.
	fn apply(&self, element: &web_sys::Element, props: &Props) {
		for (key, value) in props {
			match (key.as_str(), value) {
				(STYLE, Value::Bag(style)) => match element.dyn_ref::<web_sys::HtmlElement>() {
					Some(html_element) => {
						let declaration: JsValue = html_element.style().into();
						for (property, value) in style {
							let text = match value.to_text() {
								Some(text) => text,
								None => {
									warn!("Skipped style property {:?} without scalar value.", property);
									continue;
								}
							};
							match Reflect::set(&declaration, &JsValue::from_str(property), &JsValue::from_str(&text)) {
								Ok(true) => (),
								Ok(false) => warn!("Style property {:?} could not be assigned.", property),
								Err(error) => error!("Could not set style property {:?}: {:?}", property, error),
							}
						}
					}
					None => self.assign(element.as_ref(), key, value),
				},
				(CLASS_NAME, value) => match value.to_text() {
					Some(class_name) => element.set_class_name(&class_name),
					None => self.assign(element.as_ref(), key, value),
				},
				(key, value) => self.assign(element.as_ref(), key, value),
			}
		}
	}
}

fn to_js(value: &Value) -> JsValue {
	match value {
		Value::Null => JsValue::NULL,
		Value::Bool(b) => JsValue::from_bool(*b),
		Value::Number(n) => JsValue::from_f64(*n),
		Value::String(s) => JsValue::from_str(s),
		Value::List(list) => list.iter().map(to_js).collect::<Array>().into(),
		Value::Bag(bag) => {
			let object = Object::new();
			for (key, value) in bag {
				if let Err(error) = Reflect::set(&object, &key.into(), &to_js(value)) {
					error!("Could not assign property {:?}: {:?}", key, error);
				}
			}
			object.into()
		}
		// Only reached for closures inside lists, which are evaluated eagerly.
		Value::Computed(computed) => to_js(&computed.call()),
	}
}

impl Document for WebDocument {
	type Node = web_sys::Element;
	type Error = JsValue;

	#[instrument(skip(self))]
	fn create_element(&self, tag: &str) -> Result<web_sys::Element, JsValue> {
		self.document.create_element(tag)
	}

	fn merge_properties(&self, node: &web_sys::Element, sources: &[&Props]) {
		// Merged into a scratch bag first so that computed values are evaluated exactly once.
		// Nested objects on the element are then extended key by key.
		let mut props = Props::new();
		merge(&mut props, sources);
		self.apply(node, &props);
	}

	fn append_child(&self, parent: &web_sys::Element, child: &web_sys::Element) -> Result<(), JsValue> {
		let parent: &web_sys::Node = parent.as_ref();
		parent.append_child(child.as_ref()).map(drop)
	}

	fn set_text_content(&self, node: &web_sys::Element, text: &str) {
		let node: &web_sys::Node = node.as_ref();
		node.set_text_content(Some(text));
	}

	fn get_element_by_id(&self, root: Option<&web_sys::Element>, id: &str) -> Option<web_sys::Element> {
		match root {
			None => self.document.get_element_by_id(id),
			Some(root) => {
				let selector = format!("[id=\"{}\"]", id.replace('\\', "\\\\").replace('"', "\\\""));
				match root.query_selector(&selector) {
					Ok(found) => found,
					Err(error) => {
						error!("Invalid id selector {:?}: {:?}", selector, error);
						None
					}
				}
			}
		}
	}

	#[instrument(skip(self))]
	fn replace_with(&self, old: &web_sys::Element, new: &web_sys::Element) -> Result<(), JsValue> {
		let old_node: &web_sys::Node = old.as_ref();
		if old_node.parent_node().is_none() {
			return Err(JsValue::from_str("The replaced element has no parent."));
		}
		old.replace_with_with_node_1(new.as_ref())
	}
}
