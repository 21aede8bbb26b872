//! # Rolodex Server Library
//!
//! Startup utilities for the Rolodex server binary.

pub mod startup;
