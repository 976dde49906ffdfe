use graft_value::Value;

/// Decides whether a target array element and a source array element stand
/// for the same entity.
///
/// When any registered matcher accepts a pair, the source element is merged
/// into that target element instead of being appended.
pub trait Matcher: Send + Sync {
    /// Human-readable name of this matcher (e.g., "identity").
    fn name(&self) -> &str;

    /// Returns `true` if `target` and `source` correspond.
    fn matches(&self, target: &Value, source: &Value) -> bool;
}
