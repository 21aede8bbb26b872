//! Request extractors.

mod claims;

pub use claims::*;
