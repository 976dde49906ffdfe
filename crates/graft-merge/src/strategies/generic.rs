use std::mem;

use graft_value::{Ancestors, PropertyKey, Value};
use tracing::trace;

use crate::error::MergeResult;
use crate::merger::Merger;
use crate::strategy::Strategy;

/// Property-by-property merge for keyed containers.
///
/// Matches every container and is also the engine's fallback, so it must
/// cope with any shape: containers without enumerable own properties (sets,
/// maps) simply contribute nothing.
pub struct GenericObjectStrategy;

impl Strategy for GenericObjectStrategy {
    fn name(&self) -> &str {
        "generic-object"
    }

    fn matches(&self, value: &Value) -> bool {
        value.is_container()
    }

    fn merge(
        &self,
        target: &Value,
        property: &Value,
        key: Option<&PropertyKey>,
        mut ancestors: Ancestors,
        merger: &Merger,
    ) -> MergeResult<()> {
        if property.is_non_data() || ancestors.contains(property) {
            return Ok(());
        }

        match key {
            Some(key) => {
                let next = ancestors.extended(property);
                if next.contains(target) {
                    return Ok(());
                }
                let current = target.property(key);
                if next.contains(&current) {
                    trace!(key = %key, "target value is an ancestor; left as-is");
                    return Ok(());
                }
                merge_source_properties(&current, property, &next, merger)
            }
            None => {
                if target.same_ref(property) {
                    return Ok(());
                }
                ancestors.push(property.clone());
                merge_source_properties(target, property, &ancestors, merger)
            }
        }
    }
}

/// Merge every enumerable own property of `source` into the same-named
/// property of `target`. Both sit at the same depth of their graphs.
pub(crate) fn merge_source_properties(
    target: &Value,
    source: &Value,
    ancestors: &Ancestors,
    merger: &Merger,
) -> MergeResult<()> {
    for (key, source_value) in source.own_entries() {
        merge_property(target, &key, &source_value, ancestors, merger)?;
    }
    Ok(())
}

/// Fold one source value into `target[key]`.
///
/// `ancestors` must already contain the container `source_value` was read
/// from.
pub(crate) fn merge_property(
    target: &Value,
    key: &PropertyKey,
    source_value: &Value,
    ancestors: &Ancestors,
    merger: &Merger,
) -> MergeResult<()> {
    let absent = if merger.config().skip_falsy_values {
        source_value.is_falsy()
    } else {
        matches!(source_value, Value::Undefined)
    };
    if absent {
        return Ok(());
    }
    if source_value.is_non_data() {
        trace!(key = %key, kind = source_value.type_name(), "non-data value skipped");
        return Ok(());
    }

    if source_value.is_container() {
        if ancestors.contains(source_value) {
            trace!(key = %key, "cyclic source value assigned by reference");
            assign(target, key, source_value.clone());
            return Ok(());
        }
        let current = target.property(key);
        if ancestors.contains(&current) {
            trace!(key = %key, "target value is an ancestor; left as-is");
            return Ok(());
        }
        // A slot of another shape cannot address the source's keys.
        if mem::discriminant(&current) != mem::discriminant(source_value) {
            trace!(key = %key, found = current.type_name(), "target slot replaced");
            assign(target, key, source_value.empty_like());
        }
        let strategy = merger.select_strategy(source_value);
        return strategy.merge(target, source_value, Some(key), ancestors.clone(), merger);
    }

    match source_value {
        // Big integers get a fresh value, never a shared one.
        Value::BigInt(n) => assign(target, key, Value::BigInt(*n)),
        other => assign(target, key, other.clone()),
    }
    Ok(())
}

pub(crate) fn assign(target: &Value, key: &PropertyKey, value: Value) {
    if !target.set_property(key, value) {
        trace!(key = %key, container = target.type_name(), "property write ignored");
    }
}
