use graft_value::{Ancestors, PropertyKey, Value};

use crate::error::MergeResult;
use crate::merger::Merger;

/// Shape-specific merge logic.
///
/// The [`Merger`] asks each registered strategy, most recently added first,
/// whether it [`matches`](Strategy::matches) a source value, and hands the
/// value to the first one that does.
///
/// The trait is object-safe and `Send + Sync` so strategies can be stored in
/// a `Vec<Box<dyn Strategy>>`.
pub trait Strategy: Send + Sync {
    /// Human-readable name of this strategy (e.g., "array").
    fn name(&self) -> &str;

    /// Returns `true` if this strategy knows how to merge `value`.
    fn matches(&self, value: &Value) -> bool;

    /// Merge `property` into `target`.
    ///
    /// - With no `key` this is a top-level merge: `property` is the whole
    ///   source and `target` the whole target.
    /// - With a `key`, `property` is merged into `target[key]`. The caller
    ///   guarantees `target` exists; `target[key]` may be anything.
    ///
    /// `ancestors` holds the source containers on the current path. It is
    /// owned by this call; extend it before handing it to nested merges.
    fn merge(
        &self,
        target: &Value,
        property: &Value,
        key: Option<&PropertyKey>,
        ancestors: Ancestors,
        merger: &Merger,
    ) -> MergeResult<()>;
}
