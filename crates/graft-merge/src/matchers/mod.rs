//! Built-in element matchers.

pub mod identity;
pub mod key;

pub use identity::IdentityMatcher;
pub use key::KeyMatcher;
