use graft_value::{Ancestors, PropertyKey, Value};

use crate::error::{MergeError, MergeResult};
use crate::merger::Merger;
use crate::strategies::generic::{assign, merge_property};
use crate::strategy::Strategy;

/// Entry-wise merge of maps.
///
/// Each source entry is folded into the destination entry with a strictly
/// equal key, following the same rules as object properties: falsy values
/// are skipped, cyclic values are assigned by reference, and container
/// values recurse through the [`Merger`].
pub struct MapStrategy;

impl Strategy for MapStrategy {
    fn name(&self) -> &str {
        "map"
    }

    fn matches(&self, value: &Value) -> bool {
        matches!(value, Value::Map(_))
    }

    fn merge(
        &self,
        target: &Value,
        property: &Value,
        key: Option<&PropertyKey>,
        ancestors: Ancestors,
        merger: &Merger,
    ) -> MergeResult<()> {
        if !matches!(property, Value::Map(_)) {
            return Err(MergeError::invalid_argument(format!(
                "map strategy cannot merge a {}",
                property.type_name()
            )));
        }
        if ancestors.contains(property) || ancestors.contains(target) {
            return Ok(());
        }

        let destination = match key {
            None => match target {
                Value::Map(_) => target.clone(),
                _ => {
                    return Err(MergeError::invalid_argument(
                        "cannot merge a top-level map into a non-map target",
                    ))
                }
            },
            Some(key) => {
                let current = target.property(key);
                match current {
                    Value::Map(_) if ancestors.contains(&current) => return Ok(()),
                    Value::Map(_) => current,
                    _ => {
                        let fresh = Value::new_map();
                        assign(target, key, fresh.clone());
                        fresh
                    }
                }
            }
        };

        let next = ancestors.extended(property);
        for (entry_key, entry_value) in property.map_entries() {
            merge_property(
                &destination,
                &PropertyKey::Entry(entry_key),
                &entry_value,
                &next,
                merger,
            )?;
        }
        Ok(())
    }
}
