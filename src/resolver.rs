//! Content resolver for the markdown documents.
//!
//! Reads a document from the content root on every call. Nothing is
//! cached, so edits to the files show up on the next render.
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

/// Marker placed in front of the placeholder for a missing document.
pub const MISSING_MARKER: &str = "❌";

/// Builds the placeholder shown in place of a missing document.
#[must_use]
pub fn missing_placeholder(path: &str) -> String
{
    format!("{MISSING_MARKER} Missing: {path}")
}

/// Outcome of checking a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus
{
    /// The document can be read
    Present,
    /// No file at the path
    Missing,
    /// The file exists but reading it failed
    Unreadable(String),
}

/// Reads markdown documents relative to a content root.
#[derive(Debug, Clone)]
pub struct ContentResolver
{
    /// Directory the document paths are relative to
    root: PathBuf,
}

impl ContentResolver
{
    /// Creates a resolver for the given content root.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory the document paths are relative to
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self
    {
        Self { root: root.into() }
    }

    /// Returns the content root.
    #[must_use]
    pub fn root(&self) -> &Path
    {
        &self.root
    }

    /// Reads the document at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Document path, relative to the content root
    ///
    /// # Returns
    ///
    /// The text of the file, unmodified. If the file does not exist, the
    /// placeholder `"❌ Missing: {path}"` is returned instead.
    ///
    /// # Errors
    ///
    /// Returns an error for any other read failure, such as missing
    /// permissions, a directory in place of the file or invalid UTF-8.
    pub fn resolve(&self, path: &str) -> Result<String>
    {
        match self
            .read(path)
            .with_context(|| format!("Failed to read {path}"))?
        {
            Some(content) => Ok(content),
            None =>
            {
                debug!("Document not found: {path}");
                Ok(missing_placeholder(path))
            }
        }
    }

    /// Checks whether the document at `path` can be read.
    #[must_use]
    pub fn status(&self, path: &str) -> DocumentStatus
    {
        match self.read(path)
        {
            Ok(Some(_)) => DocumentStatus::Present,
            Ok(None) => DocumentStatus::Missing,
            Err(err) => DocumentStatus::Unreadable(err.to_string()),
        }
    }

    /// Reads a document, mapping "not found" to `None`.
    fn read(&self, path: &str) -> io::Result<Option<String>>
    {
        match fs::read_to_string(self.root.join(path))
        {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn root_with(path: &str, content: &[u8]) -> TempDir
    {
        let dir = TempDir::new().expect("temp dir");
        let file = dir.path().join(path);

        if let Some(parent) = file.parent()
        {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(file, content).expect("write fixture");

        dir
    }

    #[test]
    fn returns_file_content_unmodified()
    {
        let text = "  # Sets\n\n- unordered\n- unique\n\n\n";
        let dir = root_with("python_core/sets.md", text.as_bytes());
        let resolver = ContentResolver::new(dir.path());

        assert_eq!(resolver.resolve("python_core/sets.md").unwrap(), text);
    }

    #[test]
    fn missing_file_yields_placeholder()
    {
        let dir = TempDir::new().unwrap();
        let resolver = ContentResolver::new(dir.path());

        assert_eq!(
            resolver.resolve("notes/general_tips.md").unwrap(),
            "❌ Missing: notes/general_tips.md"
        );
    }

    #[test]
    fn missing_directory_yields_placeholder()
    {
        let resolver = ContentResolver::new("/nonexistent/devhub/root");

        assert_eq!(resolver.resolve("pcc/ch3_lists.md").unwrap(), missing_placeholder("pcc/ch3_lists.md"));
    }

    #[test]
    fn directory_in_place_of_file_is_an_error()
    {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("stdlib/regex.md")).unwrap();
        let resolver = ContentResolver::new(dir.path());

        let err = resolver.resolve("stdlib/regex.md").unwrap_err();
        assert!(err.to_string().contains("stdlib/regex.md"));
    }

    #[test]
    fn status_distinguishes_outcomes()
    {
        let dir = root_with("notes/best_practices.md", b"# Best practices");
        fs::create_dir_all(dir.path().join("notes/common_pitfalls.md")).unwrap();
        let resolver = ContentResolver::new(dir.path());

        assert_eq!(resolver.status("notes/best_practices.md"), DocumentStatus::Present);
        assert_eq!(resolver.status("notes/general_tips.md"), DocumentStatus::Missing);
        assert!(matches!(
            resolver.status("notes/common_pitfalls.md"),
            DocumentStatus::Unreadable(_)
        ));
    }

    #[test]
    fn placeholder_text_in_a_real_file_is_present()
    {
        let dir = root_with("pcc/ch5_if.md", "❌ Missing: pcc/ch5_if.md".as_bytes());
        let resolver = ContentResolver::new(dir.path());

        assert_eq!(resolver.status("pcc/ch5_if.md"), DocumentStatus::Present);
    }

    #[test]
    fn invalid_utf8_is_an_error()
    {
        let dir = root_with("datasci/numpy.md", &[0xff, 0xfe, 0x00, 0x80]);
        let resolver = ContentResolver::new(dir.path());

        assert!(resolver.resolve("datasci/numpy.md").is_err());
    }
}
