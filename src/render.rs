//! Attaching [`Child`] values to a parent node.

use crate::{child::Child, document::Document};
use tracing::{error, trace_span};

/// Renders `child` into `parent`.
///
/// Nodes are appended and lists rendered in order, but text *replaces* the parent's content,
/// including nodes appended by earlier siblings. Of `["a", "b", "c"]`, only `"c"` remains.
///
/// Failed attachments are logged and skipped, as is anything nested deeper than `depth_limit`.
pub fn render<D: Document>(document: &D, child: &Child<D::Node>, parent: &D::Node, depth_limit: usize) {
	if depth_limit == 0 {
		return error!("Depth limit reached");
	}

	match child {
		Child::Thunk(thunk) => {
			let span = trace_span!("Rendering thunk");
			let _enter = span.enter();
			render(document, &thunk(), parent, depth_limit - 1);
		}

		Child::List(list) => {
			let span = trace_span!("Rendering list", len = list.len());
			let _enter = span.enter();
			for child in list {
				render(document, child, parent, depth_limit - 1);
			}
		}

		Child::Node(node) => {
			let span = trace_span!("Appending node", ?node);
			let _enter = span.enter();
			if let Err(error) = document.append_child(parent, node) {
				error!("Failed to append node: {:?}", error);
			}
		}

		Child::Descriptor(descriptor) => {
			let span = trace_span!("Rendering descriptor children");
			let _enter = span.enter();
			render(document, &descriptor.children, parent, depth_limit - 1);
		}

		Child::Text(text) => {
			#[cfg(feature = "dangerous-logging")]
			let span = trace_span!("Setting text content", text = text.as_str());
			#[cfg(not(feature = "dangerous-logging"))]
			let span = trace_span!("Setting text content", len = text.len());
			let _enter = span.enter();
			document.set_text_content(parent, text);
		}
	}
}
