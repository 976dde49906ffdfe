use graft_value::{Ancestors, Value};
use tracing::debug;

use crate::config::MergeConfig;
use crate::error::{MergeError, MergeResult};
use crate::matcher::Matcher;
use crate::matchers::IdentityMatcher;
use crate::strategies::{ArrayStrategy, GenericObjectStrategy};
use crate::strategy::Strategy;

// ---------------------------------------------------------------------------
// Merger
// ---------------------------------------------------------------------------

/// The merge engine: ordered strategy and matcher registries plus the
/// top-level [`merge`](Self::merge) entry point.
///
/// Registries are prepend-only. A strategy or matcher added later takes
/// priority over everything added before it, built-ins included. A merger is
/// meant to be built once and reused; `merge` never changes its state.
pub struct Merger {
    strategies: Vec<Box<dyn Strategy>>,
    matchers: Vec<Box<dyn Matcher>>,
    fallback: GenericObjectStrategy,
    config: MergeConfig,
}

impl Merger {
    /// Create a merger with the default configuration and the built-in
    /// generic-object and array strategies and identity matcher.
    pub fn new() -> Self {
        Self::with_config(MergeConfig::default())
    }

    /// Create a merger with the built-ins and an explicit configuration.
    pub fn with_config(config: MergeConfig) -> Self {
        let mut merger = Self {
            strategies: Vec::new(),
            matchers: Vec::new(),
            fallback: GenericObjectStrategy,
            config,
        };
        merger.add_strategy(Box::new(GenericObjectStrategy));
        merger.add_strategy(Box::new(ArrayStrategy));
        merger.add_matcher(Box::new(IdentityMatcher));
        merger
    }

    /// Register a strategy ahead of every strategy registered so far.
    pub fn add_strategy(&mut self, strategy: Box<dyn Strategy>) {
        debug!(strategy = strategy.name(), "strategy registered");
        self.strategies.insert(0, strategy);
    }

    /// Register a matcher ahead of every matcher registered so far.
    pub fn add_matcher(&mut self, matcher: Box<dyn Matcher>) {
        debug!(matcher = matcher.name(), "matcher registered");
        self.matchers.insert(0, matcher);
    }

    /// The active configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Number of registered strategies, built-ins included.
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Number of registered matchers, built-ins included.
    pub fn matcher_count(&self) -> usize {
        self.matchers.len()
    }

    /// Strategy names in priority order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// The highest-priority strategy that matches `value`, or the
    /// generic-object strategy when none does.
    pub fn select_strategy(&self, value: &Value) -> &dyn Strategy {
        self.strategies
            .iter()
            .find(|strategy| strategy.matches(value))
            .map(|strategy| &**strategy)
            .unwrap_or(&self.fallback)
    }

    /// Returns `true` if any registered matcher correlates `target` with
    /// `source`.
    pub fn elements_correspond(&self, target: &Value, source: &Value) -> bool {
        self.matchers
            .iter()
            .any(|matcher| matcher.matches(target, source))
    }

    /// Deep-merge `source` into `target` in place and return `target`.
    ///
    /// Returns `target` untouched when it is strictly equal to `source`.
    /// Fails with [`MergeError::InvalidArgument`] when either side is not a
    /// container, or when a top-level array is merged into a non-array.
    /// There is no rollback: on error, changes already made stay.
    pub fn merge(&self, target: &Value, source: &Value) -> MergeResult<Value> {
        if target.strict_equals(source) {
            return Ok(target.clone());
        }
        if !source.is_container() {
            return Err(MergeError::invalid_argument(format!(
                "source must be a container, got {}",
                source.type_name()
            )));
        }
        if !target.is_container() {
            return Err(MergeError::invalid_argument(format!(
                "target must be a container, got {}",
                target.type_name()
            )));
        }

        let strategy = self.select_strategy(source);
        debug!(
            strategy = strategy.name(),
            source_kind = source.type_name(),
            target_kind = target.type_name(),
            "merging"
        );
        strategy.merge(target, source, None, Ancestors::new(), self)?;
        Ok(target.clone())
    }

    /// Merge two JSON documents through the engine and return the merged
    /// document. `target` itself is not modified.
    pub fn merge_json(
        &self,
        target: &serde_json::Value,
        source: &serde_json::Value,
    ) -> MergeResult<serde_json::Value> {
        let merged = self.merge(&Value::from(target.clone()), &Value::from(source.clone()))?;
        Ok(merged.to_json()?)
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}
