//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, search and bulk APIs over the `notes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every write runs in exactly one transaction.
//! - Lists are ordered by `updated_at DESC, id DESC`.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::note::{validate_title, NewNote, Note, NoteId, NoteValidationError};
use crate::model::time::{parse_timestamp, to_storage_text, Timestamp};
use crate::search::substring::search_note_rows;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    body,
    created_at,
    updated_at
FROM notes";

pub(crate) const NOTE_ORDER_SQL: &str = "ORDER BY updated_at DESC, id DESC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(NoteValidationError),
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Persists a draft and returns it with its assigned id.
    fn create_note(&self, draft: &NewNote) -> RepoResult<Note>;
    /// Replaces title and body of an existing note.
    fn update_note(&self, id: NoteId, title: &str, body: &str) -> RepoResult<Note>;
    /// Removes one note.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists every note, most recently updated first.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Lists notes whose title or body contains `term`.
    fn search_notes(&self, term: &str) -> RepoResult<Vec<Note>>;
    /// Counts stored notes.
    fn count_notes(&self) -> RepoResult<u64>;
    /// Removes every note and returns how many were removed.
    fn clear_notes(&self) -> RepoResult<u64>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, draft: &NewNote) -> RepoResult<Note> {
        draft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO notes (title, body, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.title.as_str(),
                draft.body.as_str(),
                to_storage_text(&draft.created_at),
                to_storage_text(&draft.updated_at),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(draft.clone().into_note(id))
    }

    fn update_note(&self, id: NoteId, title: &str, body: &str) -> RepoResult<Note> {
        validate_title(title)?;

        let tx = self.conn.unchecked_transaction()?;
        let Some(mut note) = select_note(&tx, id)? else {
            return Err(RepoError::NotFound(id));
        };
        note.apply_update(title, body);
        note.validate()?;

        let changed = tx.execute(
            "UPDATE notes
             SET
                title = ?2,
                body = ?3,
                updated_at = ?4
             WHERE id = ?1;",
            params![
                id,
                note.title.as_str(),
                note.body.as_str(),
                to_storage_text(&note.updated_at),
            ],
        )?;
        if changed != 1 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(note)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;
        Ok(())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        select_note(self.conn, id)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} {NOTE_ORDER_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn search_notes(&self, term: &str) -> RepoResult<Vec<Note>> {
        search_note_rows(self.conn, term)
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative note count `{count}`")))
    }

    fn clear_notes(&self) -> RepoResult<u64> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM notes;", [])?;
        tx.commit()?;
        Ok(removed as u64)
    }
}

/// Decodes one `notes` row selected with [`NOTE_SELECT_SQL`].
pub(crate) fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let note = Note {
        id: row.get("id")?,
        title: row.get("title")?,
        body: row.get("body")?,
        created_at: parse_timestamp_column(row, "created_at")?,
        updated_at: parse_timestamp_column(row, "updated_at")?,
    };
    note.validate()
        .map_err(|err| RepoError::InvalidData(format!("note {}: {err}", note.id)))?;
    Ok(note)
}

fn select_note(conn: &Connection, id: NoteId) -> RepoResult<Option<Note>> {
    let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_note_row(row)?));
    }

    Ok(None)
}

fn parse_timestamp_column(row: &Row<'_>, column: &str) -> RepoResult<Timestamp> {
    let text: String = row.get(column)?;
    parse_timestamp(&text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{text}` in notes.{column}"))
    })
}

