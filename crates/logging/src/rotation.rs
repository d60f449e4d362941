//! crates/logging/src/rotation.rs
//! Moves the previous session's log file into an archive directory.
//!
//! Archived files are named `<mtime>_<file name>` with the modification time
//! formatted as `YYYYMMDD_HHMMSS` in UTC, so a directory listing sorts
//! chronologically. When that name is taken a zero-padded counter is appended
//! (`<mtime>_<file name>.001`), which sorts after the unsuffixed archive and
//! in rotation order among the suffixed ones. The destination is reserved with
//! an exclusive create before the rename, so an existing archive is never
//! replaced. Rotation never fails startup: problems are reported on standard
//! error and the old file is left where it is.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Name of the archive directory created next to the log file.
pub const ARCHIVE_DIR_NAME: &str = "log";

const ARCHIVE_TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year][month][day]_[hour][minute][second]");

/// Collision suffixes stay sortable while they fit in three digits.
const MAX_ARCHIVE_ATTEMPTS: u32 = 999;

/// Directory that receives archived copies of `log_path`.
#[must_use]
pub fn archive_dir(log_path: &Path) -> PathBuf {
    log_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(ARCHIVE_DIR_NAME)
}

/// Archives the file at `log_path`, returning where it was moved.
///
/// Returns `None` without touching the filesystem when no file exists at
/// `log_path`, and `None` after printing a diagnostic when rotation fails.
pub fn rotate_log_file(log_path: &Path) -> Option<PathBuf> {
    match fs::metadata(log_path) {
        Ok(metadata) if metadata.is_file() => {}
        _ => return None,
    }

    match try_rotate(log_path) {
        Ok(archived) => Some(archived),
        Err(error) => {
            eprintln!(
                "Failed rotating the log file '{}': {error}",
                log_path.display()
            );
            None
        }
    }
}

fn try_rotate(log_path: &Path) -> io::Result<PathBuf> {
    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;

    let stamp = modification_stamp(log_path)?;
    let dir = archive_dir(log_path);
    fs::create_dir_all(&dir)?;

    let destination = reserve_archive_path(&dir, &stamp, file_name)?;
    if let Err(error) = fs::rename(log_path, &destination) {
        let _ = fs::remove_file(&destination);
        return Err(error);
    }
    Ok(destination)
}

fn modification_stamp(path: &Path) -> io::Result<String> {
    let modified = fs::metadata(path)?.modified()?;
    OffsetDateTime::from(modified)
        .format(ARCHIVE_TIMESTAMP_FORMAT)
        .map_err(io::Error::other)
}

/// Name of the `attempt`-th candidate: `<stamp>_<name>`, then
/// `<stamp>_<name>.001`, `<stamp>_<name>.002`, ...
fn archive_name(stamp: &str, file_name: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{stamp}_{file_name}")
    } else {
        format!("{stamp}_{file_name}.{attempt:03}")
    }
}

/// Creates the first free candidate as an empty placeholder and returns it.
///
/// The exclusive create makes the reservation atomic; the following rename
/// then only ever replaces the placeholder this process owns.
fn reserve_archive_path(dir: &Path, stamp: &str, file_name: &str) -> io::Result<PathBuf> {
    for attempt in 0..=MAX_ARCHIVE_ATTEMPTS {
        let candidate = dir.join(archive_name(stamp, file_name, attempt));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(_) => return Ok(candidate),
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {}
            Err(error) => return Err(error),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free archive name for '{stamp}_{file_name}'"),
    ))
}
