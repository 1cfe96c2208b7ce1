//! Identifier-keyed store of the descriptors identified nodes were built from.

use crate::child::Descriptor;
use core::fmt::{self, Debug, Formatter};
use hashbrown::{hash_map::Entry, HashMap};
use std::rc::Rc;
use tracing::{trace, warn};

/// What a [`flush`](`crate::HotDom::flush`) rebuilds an identified node from.
pub struct RegistryEntry<N> {
	pub tag: Rc<str>,
	pub descriptor: Descriptor<N>,
}

impl<N: Clone> Clone for RegistryEntry<N> {
	fn clone(&self) -> Self {
		Self {
			tag: Rc::clone(&self.tag),
			descriptor: self.descriptor.clone(),
		}
	}
}

impl<N: Debug> Debug for RegistryEntry<N> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegistryEntry").field("tag", &self.tag).field("descriptor", &self.descriptor).finish()
	}
}

/// Entries are only ever inserted or overwritten, never removed.
/// A registration outlives the removal of its node from the document.
pub struct Registry<N>(HashMap<String, RegistryEntry<N>>);

impl<N> Default for Registry<N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<N> Registry<N> {
	#[must_use]
	pub fn new() -> Self {
		Self(HashMap::new())
	}

	/// Records `descriptor` under `id`, superseding any earlier entry.
	pub fn register(&mut self, id: String, tag: Rc<str>, descriptor: Descriptor<N>) {
		match self.0.entry(id) {
			Entry::Occupied(mut occupied) => {
				let previous = occupied.get();
				if previous.tag != tag {
					warn!(id = occupied.key().as_str(), from = &*previous.tag, to = &*tag, "Identifier re-registered with a different tag.");
				} else {
					trace!(id = occupied.key().as_str(), tag = &*tag, "Superseded registration.");
				}
				occupied.insert(RegistryEntry { tag, descriptor });
			}
			Entry::Vacant(vacant) => {
				trace!(id = vacant.key().as_str(), tag = &*tag, "Registered.");
				vacant.insert(RegistryEntry { tag, descriptor });
			}
		}
	}

	#[must_use]
	pub fn get(&self, id: &str) -> Option<&RegistryEntry<N>> {
		self.0.get(id)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}
}
