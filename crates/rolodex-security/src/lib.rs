//! # Rolodex Security
//!
//! Security module for Rolodex providing JWT authentication and
//! password hashing.

pub mod jwt;
pub mod password;

pub use jwt::*;
pub use password::*;
