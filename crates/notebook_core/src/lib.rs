//! Data layer for the NoteBook notes application.
//! Owns the note model, the SQLite-backed store and its logging.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{DbError, StoreConfig, StoreLocation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::display::{format_date, format_relative_date, preview, DEFAULT_PREVIEW_LENGTH};
pub use model::note::{NewNote, Note, NoteId, NoteValidationError};
pub use model::time::Timestamp;
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, StoreError, StoreResult};
pub use service::notes_store::NotesStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
