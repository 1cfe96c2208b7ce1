//! Deep-merging descriptor properties onto a node's attribute-bag.

use crate::value::{Props, Value};
use tracing::{instrument, trace};

/// Evaluated and assigned, never stored as a closure.
pub const CLASS_NAME: &str = "className";

/// Evaluated and then merged key-by-key.
pub const STYLE: &str = "style";

/// Merges each of `sources` into `target`, left to right, and returns `target`.
///
/// - A [`Value::Computed`] under [`CLASS_NAME`] is invoked and its result assigned.
/// - A [`Value::Computed`] under [`STYLE`] is invoked and its result merged into the target's style bag.
/// - A [`Value::Bag`] is merged into the bag already present under that key, which is created if the
///   existing value is missing or falsy. A truthy non-bag value there absorbs the merge without change.
/// - Everything else (including other closures) is assigned, with the last source winning.
#[instrument(skip_all, fields(sources = sources.len()))]
pub fn merge<'a>(target: &'a mut Props, sources: &[&Props]) -> &'a mut Props {
	for source in sources {
		merge_one(target, source);
	}
	target
}

fn merge_one(target: &mut Props, source: &Props) {
	for (key, value) in source {
		match value {
			Value::Computed(computed) if key == STYLE => {
				let evaluated = computed.call();
				trace!(key = key.as_str(), "Evaluated computed style.");
				merge_nested(target, key, &evaluated);
			}
			Value::Computed(computed) if key == CLASS_NAME => {
				let evaluated = computed.call();
				#[cfg(feature = "dangerous-logging")]
				trace!(key = key.as_str(), value = ?evaluated, "Evaluated computed class name.");
				target.insert(key.clone(), evaluated);
			}
			Value::Bag(_) => merge_nested(target, key, value),
			_ => {
				target.insert(key.clone(), value.clone());
			}
		}
	}
}

/// Recurses into the bag under `key`, which is created first if missing or falsy.
/// `source` values that aren't bags contribute nothing beyond that.
fn merge_nested(target: &mut Props, key: &str, source: &Value) {
	let slot = target.entry(key.to_owned()).or_insert(Value::Null);
	if !slot.is_truthy() {
		*slot = Value::Bag(Props::new());
	}

	let source = match source.as_bag() {
		Some(source) => source,
		None => return trace!(key, "Skipped merging a non-bag value."),
	};
	match slot {
		Value::Bag(nested) => merge_one(nested, source),
		_ => trace!(key, "Skipped merging into a non-bag value."),
	}
}
