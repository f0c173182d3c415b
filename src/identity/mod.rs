//! Mapping switch accounts to human identities.
//!
//! - [`index`] - the two lookup maps built from the identity table
//! - [`resolver`] - the ordered fallback chain applied to each account

pub mod index;
pub mod resolver;

pub use index::IdentityIndex;
pub use resolver::{resolve, Resolution, ResolutionSource};
