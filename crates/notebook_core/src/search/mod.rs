//! Search entry points.
//!
//! # Responsibility
//! - Provide substring search over note titles and bodies.
//!
//! # Invariants
//! - Search results use the same ordering as full note lists.

pub mod substring;
