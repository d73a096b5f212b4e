//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the notes store API.
//! - Keep UI/controller callers decoupled from storage details.

pub mod note_service;
pub mod notes_store;
