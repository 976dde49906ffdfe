//! Built-in merge strategies.
//!
//! [`GenericObjectStrategy`] and [`ArrayStrategy`] are registered on every
//! [`Merger`](crate::Merger). [`SetStrategy`] and [`MapStrategy`] are opt-in.

pub mod array;
pub mod generic;
pub mod map;
pub mod set;

pub use array::ArrayStrategy;
pub use generic::GenericObjectStrategy;
pub use map::MapStrategy;
pub use set::SetStrategy;
