use crate::value::Props;
use core::fmt::Debug;

/// The host document model a [`HotDom`](`crate::HotDom`) constructs into.
///
/// Implemented by [`MemoryDocument`](`crate::memory::MemoryDocument`) and [`WebDocument`](`crate::web::WebDocument`).
pub trait Document {
	/// A handle to a node. Cloning a handle doesn't clone the node.
	type Node: Clone + Debug;
	type Error: Debug;

	/// Creates a new detached element.
	///
	/// # Errors
	///
	/// Iff the host can't construct an element with this tag name.
	fn create_element(&self, tag: &str) -> Result<Self::Node, Self::Error>;

	/// Deep-merges `sources` into the properties of `node`, as [`merge`](`crate::merge::merge`) does.
	fn merge_properties(&self, node: &Self::Node, sources: &[&Props]);

	/// Appends `child` as last child of `parent`, first detaching it from wherever it currently is.
	///
	/// # Errors
	///
	/// Iff the insertion would create a cycle or `parent` can't have children.
	fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

	/// Replaces all content of `node` with `text`.
	fn set_text_content(&self, node: &Self::Node, text: &str);

	/// Finds the live element with the given `id` property below `root`, or anywhere in the document if `root` is [`None`].
	fn get_element_by_id(&self, root: Option<&Self::Node>, id: &str) -> Option<Self::Node>;

	/// Puts `new` in place of `old` among `old`'s siblings and detaches `old`.
	///
	/// # Errors
	///
	/// Iff `old` has no parent or the swap would create a cycle.
	fn replace_with(&self, old: &Self::Node, new: &Self::Node) -> Result<(), Self::Error>;
}
