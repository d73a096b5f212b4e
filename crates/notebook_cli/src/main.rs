//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a notes store (`notebook_cli [DB_DIR]`, in-memory when omitted).
//! - Print a short summary of the most recently updated notes.
//!
//! Set `NOTEBOOK_LOG_DIR` to an absolute path to enable file logging.

use chrono::{DateTime, Local};
use log::info;
use notebook_core::{
    core_version, default_log_level, format_relative_date, init_logging, preview, NotesStore,
    Note, StoreConfig, StoreResult,
};
use std::process::ExitCode;

const SUMMARY_LIMIT: usize = 5;
const SUMMARY_PREVIEW_LENGTH: usize = 40;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("NOTEBOOK_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config = match std::env::args().nth(1) {
        Some(dir) => StoreConfig::in_directory(dir),
        None => StoreConfig::in_memory(),
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("notebook_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: StoreConfig) -> StoreResult<()> {
    let store = NotesStore::open(config)?;
    let count = store.count_notes()?;
    info!("event=cli_summary module=cli status=ok count={count}");

    println!("notebook_core version={}", core_version());
    println!("notes={count}");
    let now = Local::now();
    for note in store.list_notes()?.iter().take(SUMMARY_LIMIT) {
        println!("{}", summary_line(note, &now));
    }
    Ok(())
}

fn summary_line(note: &Note, now: &DateTime<Local>) -> String {
    let when = format_relative_date(&note.updated_at.with_timezone(&Local), now);
    format!(
        "{:>6}  {:<8} {}  {}",
        note.id,
        when,
        note.title,
        preview(&note.body, SUMMARY_PREVIEW_LENGTH)
    )
}

#[cfg(test)]
mod tests {
    use super::summary_line;
    use chrono::{Duration, Local, TimeZone, Utc};
    use notebook_core::NewNote;

    #[test]
    fn summary_line_shows_local_time_and_preview() {
        let stamp = Utc.with_ymd_and_hms(2026, 3, 10, 9, 5, 0).unwrap();
        let note = NewNote {
            title: "Groceries".to_string(),
            body: "milk\neggs".to_string(),
            created_at: stamp,
            updated_at: stamp,
        }
        .into_note(7);
        let local = stamp.with_timezone(&Local);

        let line = summary_line(&note, &(local + Duration::hours(1)));
        assert!(line.contains(&local.format("%H:%M").to_string()), "{line}");
        assert!(line.contains("Groceries"));
        assert!(line.ends_with("milk"));
    }
}
