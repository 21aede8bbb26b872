//! Domain model: the `User` entity and its value objects.

pub mod email;
pub mod user;

pub use email::*;
pub use user::*;
