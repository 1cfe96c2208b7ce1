use thiserror::Error;

/// Errors raised by [`HotDom`](`crate::HotDom`) construction and flushes.
///
/// Host errors are carried as their [`Debug`] representation, since host error types
/// (like [`JsValue`](`wasm_bindgen::JsValue`)) aren't generally [`std::error::Error`]s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// A flush named an identifier that no descriptor was ever built with.
	#[error("no descriptor registered for identifier {id:?}")]
	UnregisteredIdentifier { id: String },

	/// A registered identifier has no live node in the document (anymore).
	#[error("no live node with identifier {id:?} found in the document")]
	LiveNodeNotFound { id: String },

	/// The host document refused to create an element.
	#[error("could not create <{tag}>: {details}")]
	CreateElement { tag: String, details: String },

	/// The host document refused to swap in the rebuilt node.
	#[error("could not replace live node {id:?}: {details}")]
	Replace { id: String, details: String },
}
