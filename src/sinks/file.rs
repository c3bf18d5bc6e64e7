//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// How a [`FileSink`] opens its file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileSinkOptions {
    /// Start from an empty file instead of appending to existing content
    pub truncate: bool,

    /// Hold an exclusive advisory lock for the sink's lifetime, so two
    /// loggers cannot interleave lines in the same file
    pub lock: bool,
}

/// Appends each line to a file and flushes it before the next one.
///
/// The file is opened (and created if missing) when the sink is built; the
/// parent directory must already exist.
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
    locked: bool,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, FileSinkOptions::default())
    }

    pub fn with_options(path: impl AsRef<Path>, options: FileSinkOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut open_options = OpenOptions::new();
        open_options.create(true);
        if options.truncate {
            open_options.write(true).truncate(true);
        } else {
            open_options.append(true);
        }

        let file = open_options
            .open(&path)
            .map_err(|e| LoggerError::sink_open(path.display().to_string(), e))?;

        if options.lock {
            FileExt::try_lock_exclusive(&file)
                .map_err(|_| LoggerError::file_lock(path.display().to_string()))?;
        }

        Ok(Self {
            path,
            file: Some(file),
            locked: options.lock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn closed_error() -> LoggerError {
        LoggerError::sink_write(
            "file",
            io::Error::new(io::ErrorKind::BrokenPipe, "file sink closed"),
        )
    }
}

impl Sink for FileSink {
    fn write(&mut self, text: &str) -> Result<()> {
        let file = self.file.as_mut().ok_or_else(Self::closed_error)?;

        file.write_all(text.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| LoggerError::sink_write("file", e))
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush().map_err(|e| LoggerError::sink_write("file", e))?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };

        file.flush()
            .and_then(|_| file.sync_data())
            .map_err(|e| LoggerError::sink_write("file", e))?;
        if self.locked {
            FileExt::unlock(&file).map_err(|e| LoggerError::sink_write("file", e))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
