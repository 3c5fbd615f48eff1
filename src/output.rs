//! Output filename construction.
//!
//! Default names embed the instrument model and the capture timestamp.
//! When a note is supplied, the filename is derived from it instead, with a
//! numeric suffix chosen so existing files are never overwritten.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

/// Attempts at a free note-derived name before falling back to the
/// timestamped one.
const MAX_NOTE_CANDIDATES: u32 = 100;

/// Choose the output path for a capture.
///
/// Without a note: `<dir>/<MODEL>_<YYYY-MM-DD_HH.MM.SS>.<ext>`. With a
/// note: the note with spaces replaced by underscores, numbered `_2`,
/// `_3`, ... past existing files; if one hundred candidates are all taken,
/// the timestamped name is used instead.
#[must_use]
pub fn build_filename(
    dir: &Path,
    model: &str,
    timestamp: &NaiveDateTime,
    note: Option<&str>,
    extension: &str,
) -> PathBuf {
    let fallback = dir.join(format!(
        "{model}_{}.{extension}",
        timestamp.format("%Y-%m-%d_%H.%M.%S")
    ));

    let Some(note) = note else {
        return fallback;
    };

    let base = note.replace(' ', "_");
    for attempt in 0..MAX_NOTE_CANDIDATES {
        let suffix = if attempt == 0 { String::new() } else { format!("_{}", attempt + 1) };
        let candidate = dir.join(format!("{base}{suffix}.{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        debug!(candidate = %candidate.display(), "name taken, trying next");
    }
    fallback
}
