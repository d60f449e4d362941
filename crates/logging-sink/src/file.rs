//! crates/logging-sink/src/file.rs
//! File-backed [`LogSink`] implementation.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::repeat::{RepeatFilter, RepeatVerdict};
use crate::sink::{LogSink, Record};

struct FileTarget {
    path: PathBuf,
    writer: BufWriter<File>,
    min_level: i32,
    flush_level: i32,
}

impl FileTarget {
    fn admits(&self, level: i32) -> bool {
        level >= self.min_level
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }
}

/// Writes records to one or more log files.
///
/// Files are truncated when attached; preserving an earlier session's log is
/// the job of rotation, which runs before the file is attached.
#[derive(Default)]
pub struct FileSink {
    targets: Vec<FileTarget>,
    repeats: RepeatFilter,
    repeated_level: i32,
}

impl FileSink {
    /// Creates a sink with no files attached and repeat suppression disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the paths of the attached files in attachment order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.targets.iter().map(|target| target.path.as_path())
    }

    /// Returns the active repeat limit.
    #[must_use]
    pub const fn repeat_limit(&self) -> u32 {
        self.repeats.limit()
    }

    /// Flushes every attached file.
    pub fn flush(&mut self) -> io::Result<()> {
        for target in &mut self.targets {
            target.writer.flush()?;
        }
        Ok(())
    }
}

impl fmt::Debug for FileSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSink")
            .field("paths", &self.paths().collect::<Vec<_>>())
            .field("repeat_limit", &self.repeats.limit())
            .finish()
    }
}

impl LogSink for FileSink {
    fn add_log_file(&mut self, path: &Path, min_level: i32, flush_level: i32) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        self.targets.push(FileTarget {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            min_level,
            flush_level,
        });
        Ok(())
    }

    fn set_repeat_limit(&mut self, limit: u32) {
        self.repeats.set_limit(limit);
    }

    fn record(&mut self, record: &Record<'_>) -> io::Result<()> {
        // Records no file takes must not touch the repeat state.
        if !self.targets.iter().any(|target| target.admits(record.level)) {
            return Ok(());
        }

        let line = record.render();
        let suppressed = match self.repeats.check(&line) {
            RepeatVerdict::Suppress => {
                self.repeated_level = record.level;
                return Ok(());
            }
            RepeatVerdict::Emit { suppressed } => suppressed,
        };
        let repeated_level = std::mem::replace(&mut self.repeated_level, record.level);

        for target in &mut self.targets {
            if suppressed > 0 && target.admits(repeated_level) {
                target.write_line(&format!("Last message repeated {suppressed} times"))?;
            }
            if target.admits(record.level) {
                target.write_line(&line)?;
                if record.level >= target.flush_level {
                    target.writer.flush()?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).expect("log file readable")
    }

    #[test]
    fn records_below_floor_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("infolog.txt");
        let mut sink = FileSink::new();
        sink.add_log_file(&path, 30, 50).unwrap();

        sink.record(&Record::new(20, None, "debug noise")).unwrap();
        sink.record(&Record::new(40, None, "kept")).unwrap();
        sink.flush().unwrap();

        assert_eq!(read(&path), "kept\n");
    }

    #[test]
    fn records_at_flush_level_are_visible_without_explicit_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("infolog.txt");
        let mut sink = FileSink::new();
        sink.add_log_file(&path, 0, 50).unwrap();

        sink.record(&Record::new(50, Some("Net"), "socket closed")).unwrap();

        assert_eq!(read(&path), "[Net] socket closed\n");
    }

    #[test]
    fn attaching_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("infolog.txt");
        fs::write(&path, "previous session\n").unwrap();

        let mut sink = FileSink::new();
        sink.add_log_file(&path, 0, 0).unwrap();
        sink.record(&Record::new(30, None, "fresh")).unwrap();

        assert_eq!(read(&path), "fresh\n");
    }

    #[test]
    fn repeats_are_collapsed_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.txt");
        let second = dir.path().join("b.txt");
        let mut sink = FileSink::new();
        sink.add_log_file(&first, 0, 0).unwrap();
        sink.add_log_file(&second, 0, 0).unwrap();
        sink.set_repeat_limit(1);

        for _ in 0..4 {
            sink.record(&Record::new(30, None, "tick")).unwrap();
        }
        sink.record(&Record::new(30, None, "done")).unwrap();

        let expected = "tick\nLast message repeated 3 times\ndone\n";
        assert_eq!(read(&first), expected);
        assert_eq!(read(&second), expected);
    }

    #[test]
    fn repeat_count_survives_records_below_every_floor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("infolog.txt");
        let mut sink = FileSink::new();
        sink.add_log_file(&path, 30, 0).unwrap();
        sink.set_repeat_limit(1);

        for _ in 0..4 {
            sink.record(&Record::new(40, None, "tick")).unwrap();
        }
        sink.record(&Record::new(20, None, "debug")).unwrap();
        sink.record(&Record::new(40, None, "done")).unwrap();

        assert_eq!(read(&path), "tick\nLast message repeated 3 times\ndone\n");
    }

    #[test]
    fn repeat_count_goes_to_files_that_saw_the_message() {
        let dir = tempfile::tempdir().unwrap();
        let all = dir.path().join("all.txt");
        let errors = dir.path().join("errors.txt");
        let mut sink = FileSink::new();
        sink.add_log_file(&all, 0, 0).unwrap();
        sink.add_log_file(&errors, 50, 0).unwrap();
        sink.set_repeat_limit(1);

        for _ in 0..3 {
            sink.record(&Record::new(30, None, "tick")).unwrap();
        }
        sink.record(&Record::new(50, None, "failed")).unwrap();

        assert_eq!(read(&all), "tick\nLast message repeated 2 times\nfailed\n");
        assert_eq!(read(&errors), "failed\n");
    }

    #[test]
    fn debug_lists_attached_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("infolog.txt");
        let mut sink = FileSink::new();
        sink.add_log_file(&path, 0, 50).unwrap();

        let rendered = format!("{sink:?}");
        assert!(rendered.contains("infolog.txt"));
        assert_eq!(sink.paths().count(), 1);
    }
}
