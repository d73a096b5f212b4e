//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and the draft used before persistence.
//! - Provide validation and presentation helpers shared by store callers.
//!
//! # Invariants
//! - A persisted note is identified by a positive `NoteId`.
//! - `updated_at` is never earlier than `created_at`.

pub mod display;
pub mod note;
pub mod time;
