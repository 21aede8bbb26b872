//! Result type aliases for Rolodex.

use crate::RolodexError;

/// A specialized `Result` type for Rolodex operations.
pub type RolodexResult<T> = Result<T, RolodexError>;
