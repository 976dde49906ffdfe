use graft_value::{Ancestors, PropertyKey, Value};
use tracing::trace;

use crate::error::{MergeError, MergeResult};
use crate::merger::Merger;
use crate::strategies::generic::assign;
use crate::strategy::Strategy;

/// Element-wise merge for ordered sequences.
///
/// A source array made only of scalars replaces the destination's contents.
/// Otherwise each source element is folded in: containers merge into the
/// first destination element the [`Merger`]'s matchers correlate with them
/// (or are appended by reference), scalars are appended unless already
/// present.
pub struct ArrayStrategy;

impl Strategy for ArrayStrategy {
    fn name(&self) -> &str {
        "array"
    }

    fn matches(&self, value: &Value) -> bool {
        matches!(value, Value::Array(_))
    }

    fn merge(
        &self,
        target: &Value,
        property: &Value,
        key: Option<&PropertyKey>,
        ancestors: Ancestors,
        merger: &Merger,
    ) -> MergeResult<()> {
        if !matches!(property, Value::Array(_)) {
            return Err(MergeError::invalid_argument(format!(
                "array strategy cannot merge a {}",
                property.type_name()
            )));
        }
        // Never mutate a container that is itself an ancestor.
        if ancestors.contains(property) || ancestors.contains(target) {
            return Ok(());
        }

        let destination = match key {
            None => match target {
                Value::Array(_) => target.clone(),
                _ => {
                    return Err(MergeError::invalid_argument(
                        "cannot merge a top-level sequence into a non-sequence target",
                    ))
                }
            },
            Some(key) => {
                let current = target.property(key);
                match current {
                    Value::Array(_) if ancestors.contains(&current) => {
                        trace!(key = %key, "destination array is an ancestor; left as-is");
                        return Ok(());
                    }
                    Value::Array(_) => current,
                    _ => {
                        let fresh = Value::new_array();
                        assign(target, key, fresh.clone());
                        fresh
                    }
                }
            }
        };

        let elements = property.elements();
        if merger.config().replace_primitive_arrays && elements.iter().all(Value::is_scalar) {
            if let Value::Array(items) = &destination {
                *items.borrow_mut() = elements;
            }
            return Ok(());
        }

        let next = ancestors.extended(property);
        for element in elements {
            if element.is_nullish() || next.contains(&element) || element.is_non_data() {
                continue;
            }

            if element.is_container() {
                let slot = destination
                    .elements()
                    .iter()
                    .position(|existing| merger.elements_correspond(existing, &element));
                match slot {
                    Some(index) => {
                        let strategy = merger.select_strategy(&element);
                        strategy.merge(
                            &destination,
                            &element,
                            Some(&PropertyKey::Index(index)),
                            next.clone(),
                            merger,
                        )?;
                    }
                    None => {
                        destination.push(element);
                    }
                }
            } else if !destination.includes(&element) {
                destination.push(element);
            }
        }
        Ok(())
    }
}
