//! An in-process [`Document`] for native use and tests.

use crate::{
	child::Child,
	document::Document,
	merge::{merge, CLASS_NAME, STYLE},
	value::{Props, Value},
};
use core::{
	cell::RefCell,
	fmt::{self, Display, Formatter, Write as _},
};
use thiserror::Error;
use tracing::{instrument, trace};

/// Handle to a node in a [`MemoryDocument`]. Only meaningful for the document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl Display for NodeId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

impl From<NodeId> for Child<NodeId> {
	fn from(node: NodeId) -> Self {
		Child::Node(node)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
	#[error("invalid tag name {0:?}")]
	InvalidTagName(String),
	#[error("{child} can't be inserted into {parent}, which is itself or one of its descendants")]
	Cycle { parent: NodeId, child: NodeId },
	#[error("{0} can't have children")]
	NotAParent(NodeId),
	#[error("{0} has no parent")]
	Orphan(NodeId),
}

#[derive(Debug)]
enum Kind {
	Document,
	Element { tag: String, props: Props },
	Text(String),
}

#[derive(Debug)]
struct NodeData {
	kind: Kind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

/// Arena-backed document tree.
///
/// Nodes are never freed; detached nodes simply stop being reachable from [`MemoryDocument::root`].
/// Only nodes below the root are *live* and can be found by [`Document::get_element_by_id`] with a `None` root.
#[derive(Debug)]
pub struct MemoryDocument {
	nodes: RefCell<Vec<NodeData>>,
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDocument {
	#[must_use]
	pub fn new() -> Self {
		Self {
			nodes: RefCell::new(vec![NodeData {
				kind: Kind::Document,
				parent: None,
				children: Vec::new(),
			}]),
		}
	}

	/// The document node itself. Append elements here to make them live.
	#[must_use]
	pub fn root(&self) -> NodeId {
		NodeId(0)
	}

	/// The element's tag name, or [`None`] for text and document nodes.
	#[must_use]
	pub fn tag_name(&self, node: NodeId) -> Option<String> {
		match &self.nodes.borrow()[node.0].kind {
			Kind::Element { tag, .. } => Some(tag.clone()),
			Kind::Document | Kind::Text(_) => None,
		}
	}

	/// A copy of the element's properties. Empty for non-elements.
	#[must_use]
	pub fn properties(&self, node: NodeId) -> Props {
		match &self.nodes.borrow()[node.0].kind {
			Kind::Element { props, .. } => props.clone(),
			Kind::Document | Kind::Text(_) => Props::new(),
		}
	}

	/// The property under `key`, if any.
	#[must_use]
	pub fn property(&self, node: NodeId, key: &str) -> Option<Value> {
		match &self.nodes.borrow()[node.0].kind {
			Kind::Element { props, .. } => props.get(key).cloned(),
			Kind::Document | Kind::Text(_) => None,
		}
	}

	#[must_use]
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.nodes.borrow()[node.0].parent
	}

	#[must_use]
	pub fn children(&self, node: NodeId) -> Vec<NodeId> {
		self.nodes.borrow()[node.0].children.clone()
	}

	/// Whether `node` is reachable from [`MemoryDocument::root`].
	#[must_use]
	pub fn is_live(&self, node: NodeId) -> bool {
		self.is_inclusive_ancestor(self.root(), node)
	}

	/// Concatenated text of all descendant text nodes.
	#[must_use]
	pub fn text_content(&self, node: NodeId) -> String {
		let nodes = self.nodes.borrow();
		let mut text = String::new();
		collect_text(&nodes, node, &mut text);
		text
	}

	/// Serializes `node` and its descendants.
	///
	/// Scalar properties become attributes (`className` as `class`), the `style` bag becomes a declaration list
	/// and other bags, lists and closures are left out. Text isn't escaped.
	#[must_use]
	pub fn outer_html(&self, node: NodeId) -> String {
		let nodes = self.nodes.borrow();
		let mut html = String::new();
		write_html(&nodes, node, &mut html);
		html
	}

	fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
		let nodes = self.nodes.borrow();
		loop {
			if node == ancestor {
				return true;
			}
			match nodes[node.0].parent {
				Some(parent) => node = parent,
				None => return false,
			}
		}
	}

	fn push(&self, kind: Kind) -> NodeId {
		let mut nodes = self.nodes.borrow_mut();
		nodes.push(NodeData { kind, parent: None, children: Vec::new() });
		NodeId(nodes.len() - 1)
	}

	fn detach(nodes: &mut [NodeData], node: NodeId) {
		if let Some(parent) = nodes[node.0].parent.take() {
			nodes[parent.0].children.retain(|&child| child != node);
		}
	}

	fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<(), MemoryError> {
		if let Kind::Text(_) = self.nodes.borrow()[parent.0].kind {
			return Err(MemoryError::NotAParent(parent));
		}
		if self.is_inclusive_ancestor(child, parent) {
			return Err(MemoryError::Cycle { parent, child });
		}
		Ok(())
	}
}

fn collect_text(nodes: &[NodeData], node: NodeId, text: &mut String) {
	match &nodes[node.0].kind {
		Kind::Text(data) => text.push_str(data),
		Kind::Document | Kind::Element { .. } => {
			for &child in &nodes[node.0].children {
				collect_text(nodes, child, text);
			}
		}
	}
}

fn write_html(nodes: &[NodeData], node: NodeId, html: &mut String) {
	let data = &nodes[node.0];
	match &data.kind {
		Kind::Text(text) => html.push_str(text),
		Kind::Document => {
			for &child in &data.children {
				write_html(nodes, child, html);
			}
		}
		Kind::Element { tag, props } => {
			html.push('<');
			html.push_str(tag);
			for (key, value) in props {
				let rendered = match (key.as_str(), value) {
					(STYLE, Value::Bag(style)) => Some(
						style
							.iter()
							.filter_map(|(property, value)| Some(format!("{}: {};", property, value.to_text()?)))
							.collect::<Vec<_>>()
							.join(" "),
					),
					(_, value) => value.to_text(),
				};
				if let Some(rendered) = rendered {
					let name = if key == CLASS_NAME { "class" } else { key.as_str() };
					// Writing into a `String` can't fail.
					let _ = write!(html, " {}=\"{}\"", name, rendered.replace('"', "&quot;"));
				}
			}
			html.push('>');
			for &child in &data.children {
				write_html(nodes, child, html);
			}
			html.push_str("</");
			html.push_str(tag);
			html.push('>');
		}
	}
}

impl Document for MemoryDocument {
	type Node = NodeId;
	type Error = MemoryError;

	#[instrument(skip(self))]
	fn create_element(&self, tag: &str) -> Result<NodeId, MemoryError> {
		if tag.is_empty() || tag.chars().any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '"' | '\'' | '=')) {
			return Err(MemoryError::InvalidTagName(tag.to_owned()));
		}
		Ok(self.push(Kind::Element {
			tag: tag.to_owned(),
			props: Props::new(),
		}))
	}

	fn merge_properties(&self, node: &NodeId, sources: &[&Props]) {
		// Merging evaluates closures, which mustn't observe the arena mid-borrow.
		let mut props = match &mut self.nodes.borrow_mut()[node.0].kind {
			Kind::Element { props, .. } => core::mem::take(props),
			Kind::Document | Kind::Text(_) => return trace!(%node, "Skipped merging into a non-element."),
		};
		merge(&mut props, sources);
		if let Kind::Element { props: slot, .. } = &mut self.nodes.borrow_mut()[node.0].kind {
			*slot = props;
		}
	}

	fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
		self.check_insertion(*parent, *child)?;
		let mut nodes = self.nodes.borrow_mut();
		Self::detach(&mut nodes, *child);
		nodes[parent.0].children.push(*child);
		nodes[child.0].parent = Some(*parent);
		Ok(())
	}

	fn set_text_content(&self, node: &NodeId, text: &str) {
		let text_node = if text.is_empty() { None } else { Some(self.push(Kind::Text(text.to_owned()))) };
		let mut nodes = self.nodes.borrow_mut();
		if let Kind::Text(data) = &mut nodes[node.0].kind {
			*data = text.to_owned();
			return;
		}
		for child in core::mem::take(&mut nodes[node.0].children) {
			nodes[child.0].parent = None;
		}
		if let Some(text_node) = text_node {
			nodes[node.0].children.push(text_node);
			nodes[text_node.0].parent = Some(*node);
		}
	}

	fn get_element_by_id(&self, root: Option<&NodeId>, id: &str) -> Option<NodeId> {
		fn find(nodes: &[NodeData], node: NodeId, id: &str) -> Option<NodeId> {
			nodes[node.0].children.iter().find_map(|&child| {
				let matches = match &nodes[child.0].kind {
					Kind::Element { props, .. } => props.get("id").and_then(Value::to_text).map_or(false, |own| own == id),
					Kind::Document | Kind::Text(_) => false,
				};
				if matches {
					Some(child)
				} else {
					find(nodes, child, id)
				}
			})
		}

		let root = root.copied().unwrap_or_else(|| self.root());
		find(&self.nodes.borrow(), root, id)
	}

	#[instrument(skip(self))]
	fn replace_with(&self, old: &NodeId, new: &NodeId) -> Result<(), MemoryError> {
		if old == new {
			return Ok(());
		}
		let parent = self.parent(*old).ok_or(MemoryError::Orphan(*old))?;
		self.check_insertion(parent, *new)?;

		let mut nodes = self.nodes.borrow_mut();
		Self::detach(&mut nodes, *new);
		let position = nodes[parent.0]
			.children
			.iter()
			.position(|&child| child == *old)
			.ok_or(MemoryError::Orphan(*old))?;
		nodes[parent.0].children[position] = *new;
		nodes[new.0].parent = Some(parent);
		nodes[old.0].parent = None;
		Ok(())
	}
}
