use graft_value::{Ancestors, PropertyKey, Value};

use crate::error::{MergeError, MergeResult};
use crate::merger::Merger;
use crate::strategies::generic::assign;
use crate::strategy::Strategy;

/// Union of sets.
///
/// Source members are added to the destination set unless strictly equal to
/// an existing member. Container members are added by reference.
pub struct SetStrategy;

impl Strategy for SetStrategy {
    fn name(&self) -> &str {
        "set"
    }

    fn matches(&self, value: &Value) -> bool {
        matches!(value, Value::Set(_))
    }

    fn merge(
        &self,
        target: &Value,
        property: &Value,
        key: Option<&PropertyKey>,
        ancestors: Ancestors,
        _merger: &Merger,
    ) -> MergeResult<()> {
        if !matches!(property, Value::Set(_)) {
            return Err(MergeError::invalid_argument(format!(
                "set strategy cannot merge a {}",
                property.type_name()
            )));
        }
        if ancestors.contains(property) || ancestors.contains(target) {
            return Ok(());
        }

        let destination = match key {
            None => match target {
                Value::Set(_) => target.clone(),
                _ => {
                    return Err(MergeError::invalid_argument(
                        "cannot merge a top-level set into a non-set target",
                    ))
                }
            },
            Some(key) => {
                let current = target.property(key);
                match current {
                    Value::Set(_) if ancestors.contains(&current) => return Ok(()),
                    Value::Set(_) => current,
                    _ => {
                        let fresh = Value::new_set();
                        assign(target, key, fresh.clone());
                        fresh
                    }
                }
            }
        };

        let next = ancestors.extended(property);
        for member in property.elements() {
            if member.is_non_data() || next.contains(&member) {
                continue;
            }
            destination.add(member);
        }
        Ok(())
    }
}
