//! Note record, draft factory and validation.
//!
//! # Responsibility
//! - Build drafts for new notes with consistent creation timestamps.
//! - Apply in-place edits that keep `updated_at` monotonic.
//! - Validate note shape before writes and after reads.
//!
//! # Invariants
//! - `NewNote::new` sets `created_at == updated_at`.
//! - `Note::apply_update` always moves `updated_at` strictly forward.
//! - Titles are never blank once a note is persisted.

use crate::model::time::{self, Timestamp};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned note identifier (SQLite `AUTOINCREMENT` rowid).
pub type NoteId = i64;

/// Validation failure for note drafts and records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty or whitespace-only.
    BlankTitle,
    /// Identifier is not a positive integer.
    InvalidId(NoteId),
    /// `updated_at` is earlier than `created_at`.
    TimestampOrder,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "note title is required"),
            Self::InvalidId(id) => write!(f, "invalid note id: {id}"),
            Self::TimestampOrder => write!(f, "note updated_at is earlier than created_at"),
        }
    }
}

impl Error for NoteValidationError {}

/// Persisted note as returned to callers.
///
/// Serialized with camelCase names (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Note content that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NewNote {
    /// Creates a draft stamped with the current time.
    ///
    /// Does not validate the title; write paths call [`NewNote::validate`].
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let stamp = time::now();
        Self {
            title: title.into(),
            body: body.into(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    /// Checks draft invariants before persistence.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_title(&self.title)?;
        validate_timestamps(&self.created_at, &self.updated_at)
    }

    /// Attaches the store-assigned id.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Note {
    /// Replaces title and body and refreshes `updated_at`.
    pub fn apply_update(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> &mut Self {
        self.title = title.into();
        self.body = body.into();
        self.updated_at = time::next_after(self.updated_at);
        self
    }

    /// Checks record invariants.
    ///
    /// # Errors
    /// - `InvalidId` when `id <= 0`.
    /// - `BlankTitle` when the title trims to empty.
    /// - `TimestampOrder` when `updated_at < created_at`.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id <= 0 {
            return Err(NoteValidationError::InvalidId(self.id));
        }
        validate_title(&self.title)?;
        validate_timestamps(&self.created_at, &self.updated_at)
    }
}

/// Rejects empty or whitespace-only titles.
pub fn validate_title(title: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() {
        return Err(NoteValidationError::BlankTitle);
    }
    Ok(())
}

fn validate_timestamps(
    created_at: &Timestamp,
    updated_at: &Timestamp,
) -> Result<(), NoteValidationError> {
    if updated_at < created_at {
        return Err(NoteValidationError::TimestampOrder);
    }
    Ok(())
}
