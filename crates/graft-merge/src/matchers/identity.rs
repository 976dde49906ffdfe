use graft_value::Value;

use crate::matcher::Matcher;

/// Strict equality: scalars by value, containers by identity.
///
/// Registered on every [`Merger`](crate::Merger). Since a distinct but
/// structurally equal container never matches, unmatched container elements
/// are appended rather than merged.
pub struct IdentityMatcher;

impl Matcher for IdentityMatcher {
    fn name(&self) -> &str {
        "identity"
    }

    fn matches(&self, target: &Value, source: &Value) -> bool {
        target.strict_equals(source)
    }
}
