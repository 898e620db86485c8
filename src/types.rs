use std::path::{Path, PathBuf};

/// File-like context handed to a transform alongside the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContext {
    /// Path of the document the tree was compiled from
    pub filename: Option<PathBuf>,
}

impl FileContext {
    /// Create a context for a document on disk
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(filename.into()),
        }
    }

    /// Context with no document path (the transform will be a no-op)
    pub fn anonymous() -> Self {
        Self { filename: None }
    }

    /// Get the document path, ignoring an empty one
    pub fn filename(&self) -> Option<&Path> {
        self.filename
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Outcome of asking one resolver about an image path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Use this path for the import (stops the chain)
    Import(String),
    /// Leave the image untouched (stops the chain)
    Skip,
    /// No decision, ask the next resolver
    Defer,
}

impl Resolution {
    /// Shorthand for `Resolution::Import`
    pub fn import(path: impl Into<String>) -> Self {
        Resolution::Import(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_filename() {
        let file = FileContext::new("docs/index.md");
        assert_eq!(file.filename(), Some(Path::new("docs/index.md")));
    }

    #[test]
    fn test_empty_filename_counts_as_missing() {
        assert!(FileContext::new("").filename().is_none());
        assert!(FileContext::anonymous().filename().is_none());
    }
}
