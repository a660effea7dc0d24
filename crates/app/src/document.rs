//! The document shared by the editor window and every peek view

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Text document, stored with `\n` line endings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    text: String,
    revision: u64,
}

impl Document {
    /// Unsaved document holding `text`
    #[cfg(test)]
    pub fn new(text: &str) -> Self {
        Self {
            path: None,
            text: from_crlf(text),
            revision: 0,
        }
    }

    /// Load a document from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            text: from_crlf(&text),
            revision: 0,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name for title bars
    pub fn display_name(&self) -> Option<String> {
        self.path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text with `\r\n` line endings, as edit controls expect it
    pub fn edit_text(&self) -> String {
        to_crlf(&self.text)
    }

    /// Replace the text; returns false when nothing changed
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = from_crlf(text);
        if text == self.text {
            return false;
        }
        self.text = text;
        self.revision += 1;
        true
    }

    /// Number of edits applied since the document was loaded
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

/// Normalize every line ending to `\r\n`
pub fn to_crlf(text: &str) -> String {
    from_crlf(text).replace('\n', "\r\n")
}

/// Normalize every line ending to `\n`
pub fn from_crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
