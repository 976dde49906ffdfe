//! Merge engine for graft.
//!
//! Deep-merges a read-only `source` value graph into a mutable `target` graph
//! in place. The shape of each source value selects a [`Strategy`] from an
//! ordered registry; array elements are correlated through an ordered
//! registry of [`Matcher`]s. An identity-based ancestor chain threaded through
//! every recursive step keeps cyclic graphs finite.
//!
//! # Key Types
//!
//! - [`Merger`] -- The engine: registries plus the `merge` entry point
//! - [`MergeConfig`] -- Behaviour toggles (falsy skipping, primitive array replacement)
//! - [`Strategy`] / [`GenericObjectStrategy`] / [`ArrayStrategy`] -- Shape-specific merge logic
//! - [`SetStrategy`] / [`MapStrategy`] -- Opt-in strategies for sets and maps
//! - [`Matcher`] / [`IdentityMatcher`] / [`KeyMatcher`] -- Array element correlation
//!
//! # Aliasing
//!
//! The merged target may share containers with the source: values reached
//! again through a cycle are assigned by reference, and unmatched container
//! elements are appended to arrays by reference. Callers that need the two
//! graphs isolated afterwards must copy the source first.

pub mod config;
pub mod error;
pub mod matcher;
pub mod matchers;
pub mod merger;
pub mod strategies;
pub mod strategy;

pub use config::MergeConfig;
pub use error::{MergeError, MergeResult};
pub use matcher::Matcher;
pub use matchers::{IdentityMatcher, KeyMatcher};
pub use merger::Merger;
pub use strategies::{ArrayStrategy, GenericObjectStrategy, MapStrategy, SetStrategy};
pub use strategy::Strategy;

pub use graft_value::{Ancestors, PropertyKey, Value};
