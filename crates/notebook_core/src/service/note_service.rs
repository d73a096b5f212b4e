//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/get/list/search/count/clear APIs.
//! - Normalize user input (trimmed title and body) before persistence.
//! - Classify failures and log every operation at the store boundary.
//!
//! # Invariants
//! - Blank titles are rejected before storage is touched.
//! - A blank search term returns exactly what `list_notes` returns.
//! - Log lines carry ids, counts and durations, never note text.

use crate::db::DbError;
use crate::model::note::{NewNote, Note, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::search::substring::is_blank_query;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome classification for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input was rejected before touching storage.
    Validation(NoteValidationError),
    /// Target note does not exist.
    NotFound(NoteId),
    /// The database failed or returned unreadable data.
    Storage(RepoError),
}

impl StoreError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound(_) => "note_not_found",
            Self::Storage(_) => "storage_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Storage(other),
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Storage(RepoError::Db(value))
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note from trimmed title and body.
    pub fn create_note(&self, title: &str, body: &str) -> StoreResult<Note> {
        let started_at = Instant::now();
        let draft = NewNote::new(title.trim(), body.trim());
        let result = self.repo.create_note(&draft).map_err(StoreError::from);
        log_outcome("note_create", started_at, &result, |note| {
            format!("note_id={}", note.id)
        });
        result
    }

    /// Replaces title and body of an existing note and refreshes `updated_at`.
    pub fn update_note(&self, id: NoteId, title: &str, body: &str) -> StoreResult<Note> {
        let started_at = Instant::now();
        let result = self
            .repo
            .update_note(id, title.trim(), body.trim())
            .map_err(StoreError::from);
        log_outcome("note_update", started_at, &result, |note| {
            format!("note_id={}", note.id)
        });
        result
    }

    /// Deletes one note by id.
    pub fn delete_note(&self, id: NoteId) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_note(id).map_err(StoreError::from);
        log_outcome("note_delete", started_at, &result, |_| format!("note_id={id}"));
        result
    }

    /// Gets one note by id; a missing note is `Ok(None)`.
    pub fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let started_at = Instant::now();
        let result = self.repo.get_note(id).map_err(StoreError::from);
        log_outcome("note_get", started_at, &result, |found| {
            format!("note_id={id} found={}", found.is_some())
        });
        result
    }

    /// Lists all notes, most recently updated first.
    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let started_at = Instant::now();
        let result = self.repo.list_notes().map_err(StoreError::from);
        log_outcome("note_list", started_at, &result, |notes| {
            format!("count={}", notes.len())
        });
        result
    }

    /// Lists notes whose title or body contains `term`.
    ///
    /// A blank term behaves exactly like [`NoteService::list_notes`].
    pub fn search_notes(&self, term: &str) -> StoreResult<Vec<Note>> {
        if is_blank_query(term) {
            return self.list_notes();
        }

        let started_at = Instant::now();
        let result = self.repo.search_notes(term).map_err(StoreError::from);
        log_outcome("note_search", started_at, &result, |notes| {
            format!("term_chars={} count={}", term.chars().count(), notes.len())
        });
        result
    }

    /// Returns the number of stored notes.
    pub fn count_notes(&self) -> StoreResult<u64> {
        let started_at = Instant::now();
        let result = self.repo.count_notes().map_err(StoreError::from);
        log_outcome("note_count", started_at, &result, |count| {
            format!("count={count}")
        });
        result
    }

    /// Removes every note and returns how many were removed.
    pub fn clear_notes(&self) -> StoreResult<u64> {
        let started_at = Instant::now();
        let result = self.repo.clear_notes().map_err(StoreError::from);
        log_outcome("note_clear", started_at, &result, |removed| {
            format!("removed={removed}")
        });
        result
    }
}

fn log_outcome<T>(
    event: &str,
    started_at: Instant,
    result: &StoreResult<T>,
    details: impl FnOnce(&T) -> String,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(value) => debug!(
            "event={event} module=store status=ok duration_ms={duration_ms} {}",
            details(value)
        ),
        Err(err @ StoreError::Storage(_)) => error!(
            "event={event} module=store status=error duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
        Err(err @ StoreError::NotFound(_)) => info!(
            "event={event} module=store status=error duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
        Err(err @ StoreError::Validation(_)) => warn!(
            "event={event} module=store status=error duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
}
