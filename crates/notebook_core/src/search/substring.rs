//! Substring search over note title and body.
//!
//! Matching uses SQLite `LIKE` with an escaped pattern, so the term is taken
//! literally. `LIKE` compares ASCII letters case-insensitively; other
//! characters match exactly.

use crate::model::note::Note;
use crate::repo::note_repo::{parse_note_row, RepoResult, NOTE_ORDER_SQL, NOTE_SELECT_SQL};
use rusqlite::Connection;

const LIKE_ESCAPE: char = '\\';

/// Returns whether `term` should be treated as "no filter".
pub fn is_blank_query(term: &str) -> bool {
    term.trim().is_empty()
}

/// Builds a `LIKE` pattern matching any text that contains `term`.
///
/// `%`, `_` and the escape character are escaped with `\`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Selects notes whose title or body contains `term`.
pub(crate) fn search_note_rows(conn: &Connection, term: &str) -> RepoResult<Vec<Note>> {
    let pattern = contains_pattern(term);
    let mut stmt = conn.prepare(&format!(
        "{NOTE_SELECT_SQL}
         WHERE title LIKE ?1 ESCAPE '\\'
            OR body LIKE ?1 ESCAPE '\\'
         {NOTE_ORDER_SQL};"
    ))?;

    let mut rows = stmt.query([pattern.as_str()])?;
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(parse_note_row(row)?);
    }

    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::{contains_pattern, is_blank_query};

    #[test]
    fn pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
        assert_eq!(contains_pattern("plain"), "%plain%");
    }

    #[test]
    fn blank_query_detection_trims() {
        assert!(is_blank_query(""));
        assert!(is_blank_query(" \t"));
        assert!(!is_blank_query(" a "));
    }
}
