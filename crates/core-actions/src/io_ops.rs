//! File loading and saving.
//!
//! Synchronous and whole-file: a load reads every byte and splits it into
//! lines, a save serializes every line with a trailing `\n` and truncates the
//! target before writing.

use std::path::Path;

use core_state::EditorState;
use core_text::Buffer;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("no file name")]
    NoFileName,
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Read `path` into a fresh buffer. A missing file yields an empty buffer so
/// that the first save creates it.
pub fn open_file(path: &Path) -> Result<Buffer, IoError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let buffer = Buffer::from_bytes(&bytes);
            tracing::debug!(target: "io", path = %path.display(), bytes = bytes.len(), lines = buffer.line_count(), "file_open");
            Ok(buffer)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(target: "io", path = %path.display(), "file_open_new");
            Ok(Buffer::new())
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, path = %path.display(), "file_open_error");
            Err(e.into())
        }
    }
}

/// Write the buffer to the bound file and mark it clean. Returns the number
/// of bytes written.
pub fn write_file(state: &mut EditorState) -> Result<usize, IoError> {
    let path = state.file_name().ok_or(IoError::NoFileName)?.to_path_buf();
    let bytes = state.buffer().to_bytes();
    if let Err(e) = std::fs::write(&path, &bytes) {
        tracing::error!(target: "io", ?e, path = %path.display(), "file_write_error");
        return Err(e.into());
    }
    state.buffer_mut().mark_clean();
    tracing::info!(target: "io", path = %path.display(), bytes = bytes.len(), "file_write");
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let buf = open_file(&dir.path().join("nope.txt")).unwrap();
        assert!(buf.is_blank());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(open_file(dir.path()), Err(IoError::Io(_))));
    }

    #[test]
    fn unbound_state_cannot_be_written() {
        let mut st = EditorState::new(Buffer::from_records(["a"]));
        assert!(matches!(write_file(&mut st), Err(IoError::NoFileName)));
    }
}
