//! Dynamic value graphs for graft.
//!
//! This crate provides the in-memory data model the merge engine operates on:
//! a tagged [`Value`] whose containers are shared, identity-compared handles.
//! Because cloning a [`Value`] clones the handle rather than the container,
//! graphs may alias subtrees and may contain cycles.
//!
//! # Key Types
//!
//! - [`Value`] -- A dynamically-shaped value (primitive, opaque token, or container)
//! - [`Handle`] -- Shared, interior-mutable container handle with identity semantics
//! - [`PropertyKey`] -- Address of one property inside a container
//! - [`Ancestors`] -- Identity-based path of containers, used for cycle detection
//! - [`ValueError`] -- Conversion failures

pub mod ancestors;
pub mod error;
pub mod handle;
pub mod json;
pub mod key;
pub mod value;

pub use ancestors::Ancestors;
pub use error::{ValueError, ValueResult};
pub use handle::{ArrayHandle, Handle, MapHandle, ObjectHandle, Opaque, SetHandle};
pub use key::PropertyKey;
pub use value::{Value, MAX_ARRAY_GAP};
