//! # Rolodex Service
//!
//! Business logic for the user directory: request validation, the
//! batch-create pipeline, and CRUD orchestration over the repository.

pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use r#impl::UserServiceImpl;
pub use user_service::UserService;
