//! Infrastructure adapters. Implement ports.
//!
//! Generation collaborator (HTTP and mock) and the terminal UI. Map errors to DomainError.

pub mod ai;
pub mod ui;
