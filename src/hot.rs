use crate::{
	child::{Child, Descriptor},
	document::Document,
	error::Error,
	registry::{Registry, RegistryEntry},
	render::render,
};
use core::{cell::RefCell, fmt::Debug};
use hashbrown::HashSet;
use std::rc::Rc;
use tracing::{instrument, trace, trace_span};

/// Default bound on [`Child`] nesting during rendering.
pub const DEFAULT_DEPTH_LIMIT: usize = 1024;

/// Construction context for one document session.
///
/// Owns the host [`Document`], the [`Registry`] of identified descriptors and the lazily populated set of tag names
/// [`Tag`] handles were requested for. Dropping it discards all registrations.
///
/// All methods take `&self`, so thunks rendered during a build may capture an [`Rc<HotDom>`] and build nested elements.
pub struct HotDom<D: Document> {
	document: D,
	root: Option<D::Node>,
	registry: RefCell<Registry<D::Node>>,
	tags: RefCell<HashSet<Rc<str>>>,
	depth_limit: usize,
}

impl<D: Document> HotDom<D> {
	#[must_use]
	pub fn new(document: D) -> Self {
		Self {
			document,
			root: None,
			registry: RefCell::default(),
			tags: RefCell::default(),
			depth_limit: DEFAULT_DEPTH_LIMIT,
		}
	}

	/// Restricts live node lookups during [`flush`](`HotDom::flush`) to descendants of `root`.
	#[must_use]
	pub fn with_root(mut self, root: D::Node) -> Self {
		self.root = Some(root);
		self
	}

	/// Bounds how deeply nested [`Child`] values are followed while rendering.
	#[must_use]
	pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
		self.depth_limit = depth_limit;
		self
	}

	pub fn document(&self) -> &D {
		&self.document
	}

	/// A constructor for elements named `name`.
	///
	/// Any tag name is accepted. Names are interned on first use.
	pub fn tag(&self, name: &str) -> Tag<'_, D> {
		let mut tags = self.tags.borrow_mut();
		let name = match tags.get(name) {
			Some(interned) => Rc::clone(interned),
			None => {
				trace!(name, "New tag name.");
				let interned: Rc<str> = name.into();
				tags.insert(Rc::clone(&interned));
				interned
			}
		};
		Tag { hot: self, name }
	}

	/// Shorthand for `self.tag(tag).build(child)`.
	///
	/// # Errors
	///
	/// See [`Tag::build`].
	pub fn build(&self, tag: &str, child: impl Into<Child<D::Node>>) -> Result<D::Node, Error> {
		self.tag(tag).build(child)
	}

	/// Rebuilds the nodes registered under each of `ids` from their descriptors and swaps them in for the live nodes with those ids.
	///
	/// Identifiers are processed in order. Processing stops at the first error,
	/// with nodes for earlier identifiers already swapped.
	///
	/// # Errors
	///
	/// - [`Error::UnregisteredIdentifier`] if an identifier was never built with,
	/// - [`Error::LiveNodeNotFound`] if no live node with the identifier is in the document,
	/// - [`Error::CreateElement`] or [`Error::Replace`] if the host refuses the rebuild or swap.
	#[instrument(skip_all)]
	pub fn flush<I>(&self, ids: I) -> Result<(), Error>
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		for id in ids {
			let id = id.as_ref();
			let span = trace_span!("Flushing", id);
			let _enter = span.enter();

			// Cloned so that the registry isn't borrowed while thunks run.
			let RegistryEntry { tag, descriptor } = self
				.registry
				.borrow()
				.get(id)
				.cloned()
				.ok_or_else(|| Error::UnregisteredIdentifier { id: id.to_owned() })?;

			let fresh = Tag { hot: self, name: tag }.build_descriptor(descriptor)?;

			let live = self
				.document
				.get_element_by_id(self.root.as_ref(), id)
				.ok_or_else(|| Error::LiveNodeNotFound { id: id.to_owned() })?;

			self.document.replace_with(&live, &fresh).map_err(|error| Error::Replace {
				id: id.to_owned(),
				details: format!("{:?}", error),
			})?;
			trace!("Swapped.");
		}
		Ok(())
	}

	/// The entry a flush of `id` would rebuild from.
	#[must_use]
	pub fn registered(&self, id: &str) -> Option<RegistryEntry<D::Node>> {
		self.registry.borrow().get(id).cloned()
	}

	#[must_use]
	pub fn registry_len(&self) -> usize {
		self.registry.borrow().len()
	}

	/// Identifiers currently registered, in no particular order.
	#[must_use]
	pub fn registered_ids(&self) -> Vec<String> {
		self.registry.borrow().ids().map(ToOwned::to_owned).collect()
	}
}

impl<D: Document + Debug> Debug for HotDom<D> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("HotDom")
			.field("document", &self.document)
			.field("root", &self.root)
			.field("registered", &self.registry.borrow().len())
			.field("depth_limit", &self.depth_limit)
			.finish()
	}
}

/// Constructor for one tag name, obtained from [`HotDom::tag`].
pub struct Tag<'a, D: Document> {
	hot: &'a HotDom<D>,
	name: Rc<str>,
}

impl<'a, D: Document> Tag<'a, D> {
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Creates a new element and renders `child` into it.
	///
	/// If `child` is a [`Child::Descriptor`], its properties are merged onto the element first,
	/// and it's registered under its identifier if it has one.
	/// Anything else is only rendered, so e.g. a string becomes the element's text.
	///
	/// The element isn't attached anywhere.
	///
	/// # Errors
	///
	/// [`Error::CreateElement`] iff the host refuses the tag name.
	pub fn build(&self, child: impl Into<Child<D::Node>>) -> Result<D::Node, Error> {
		match child.into() {
			Child::Descriptor(descriptor) => self.build_descriptor(*descriptor),
			child => {
				let element = self.create()?;
				render(&self.hot.document, &child, &element, self.hot.depth_limit);
				Ok(element)
			}
		}
	}

	/// An element without properties or content.
	///
	/// # Errors
	///
	/// [`Error::CreateElement`] iff the host refuses the tag name.
	pub fn empty(&self) -> Result<D::Node, Error> {
		self.create()
	}

	#[instrument(skip(self), fields(tag = &*self.name))]
	fn create(&self) -> Result<D::Node, Error> {
		self.hot.document.create_element(&self.name).map_err(|error| Error::CreateElement {
			tag: self.name.to_string(),
			details: format!("{:?}", error),
		})
	}

	fn build_descriptor(&self, descriptor: Descriptor<D::Node>) -> Result<D::Node, Error> {
		let element = self.create()?;
		let span = trace_span!("Building descriptor", tag = &*self.name, id = tracing::field::Empty);
		let _enter = span.enter();

		if let Some(id) = descriptor.identifier() {
			span.record("id", &id.as_str());
			self.hot.registry.borrow_mut().register(id, Rc::clone(&self.name), descriptor.clone());
		}

		self.hot.document.merge_properties(&element, &[&descriptor.props]);
		render(&self.hot.document, &descriptor.children, &element, self.hot.depth_limit);
		Ok(element)
	}
}

macro_rules! tag_shorthands {
	($($name:ident),* $(,)?) => {
		/// Shorthands for common HTML tags. Any other tag is available through [`HotDom::tag`].
		impl<D: Document> HotDom<D> {
			$(
				#[doc = concat!("Builds a `<", stringify!($name), ">`. See [`Tag::build`].")]
				///
				/// # Errors
				///
				/// See [`Tag::build`].
				pub fn $name(&self, child: impl Into<Child<D::Node>>) -> Result<D::Node, Error> {
					self.tag(stringify!($name)).build(child)
				}
			)*
		}
	};
}

tag_shorthands!(a, button, div, h1, h2, h3, img, input, label, li, ol, p, section, span, table, td, th, tr, ul);
