//! Declarative element construction for DOM-like documents.
//!
//! Elements are described as [`Descriptor`]s (properties plus nested [`Child`] content) and built through a [`HotDom`].
//! Descriptors with an `id` property are remembered, so that [`HotDom::flush`] can later rebuild exactly those elements
//! and swap them in for their live counterparts.
//!
//! There is no diffing: a flushed element is always rebuilt in full, including all of its content.

#![doc(html_root_url = "https://docs.rs/hot-dom/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod child;
mod document;
mod error;
mod hot;
pub mod memory;
pub mod merge;
pub mod registry;
pub mod render;
mod value;
pub mod web;

pub use child::{Child, Descriptor};
pub use document::Document;
pub use error::Error;
pub use hot::{HotDom, Tag, DEFAULT_DEPTH_LIMIT};
pub use value::{Computed, Props, Value};
