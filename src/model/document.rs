//! Document model - the text buffer an outline is built from

use ropey::Rope;
use std::path::PathBuf;

use crate::symbols::LanguageId;

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for in-memory text)
    pub file_path: Option<PathBuf>,
    /// Detected language, decides which grammar lists declarations
    pub language: LanguageId,
    /// Incremented on each text change
    pub revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            language: LanguageId::PlainText,
            revision: 0,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        Ok(Self::with_path(path, &content))
    }

    /// Document for `path` holding `text`, language detected from the path
    pub fn with_path(path: PathBuf, text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            language: LanguageId::from_path(&path),
            file_path: Some(path),
            revision: 0,
        }
    }

    /// File name, or "Untitled" for in-memory text
    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Replace the whole text, bumping the revision if it differs
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.buffer == text {
            return false;
        }
        self.buffer = Rope::from(text);
        self.revision += 1;
        true
    }

    /// Full text snapshot
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }
}
