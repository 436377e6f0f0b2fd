//! Filesystem collaborator used by the dispatcher.
//!
//! The dispatcher only sees the [`FileTools`] trait. [`LocalFileTools`] is the
//! real implementation; tests substitute their own.

use crate::core::error::{AgentError, Result};
use crate::tools::result::ToolResult;
use std::path::{Path, PathBuf};

/// Marker prefixed to directory entries in listings
pub const DIR_MARKER: &str = "[dir]";
/// Marker prefixed to file entries in listings
pub const FILE_MARKER: &str = "[file]";

/// File operations the dispatcher delegates to
pub trait FileTools {
    fn read_file(&self, path: &str) -> ToolResult;
    fn write_file(&self, path: &str, content: &str) -> ToolResult;
    /// Newline-joined entries, each prefixed by [`DIR_MARKER`] or [`FILE_MARKER`]
    fn list_directory(&self, path: &str) -> ToolResult;
    /// Entries of `path` whose name contains `term`, case-insensitively
    fn search_files(&self, term: &str, path: &str) -> ToolResult;
}

/// File tools backed by the local disk, rooted at a workspace directory
#[derive(Debug, Clone)]
pub struct LocalFileTools {
    root: PathBuf,
}

impl LocalFileTools {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        }
    }

    fn try_read(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);
        if !full.is_file() {
            return Err(AgentError::FileNotFound(path.to_string()));
        }
        let text = std::fs::read_to_string(&full)?;
        Ok(format!("File contents ({}):\n\n{}", path, text))
    }

    fn try_write(&self, path: &str, content: &str) -> Result<String> {
        std::fs::write(self.resolve(path), content)?;
        Ok(format!("File saved: {}", path))
    }

    fn entries(&self, path: &str) -> Result<Vec<(String, bool)>> {
        let full = self.resolve(path);
        if !full.is_dir() {
            return Err(AgentError::DirectoryNotFound(path.to_string()));
        }
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&full)? {
            let entry = entry?;
            let is_dir = entry.file_type()?.is_dir();
            entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    fn try_list(&self, path: &str) -> Result<String> {
        let listing = render_entries(&self.entries(path)?);
        Ok(format!("Directory contents ({}):\n\n{}", path, listing))
    }

    fn try_search(&self, term: &str, path: &str) -> Result<String> {
        let needle = term.to_lowercase();
        let matches: Vec<_> = self
            .entries(path)?
            .into_iter()
            .filter(|(name, _)| name.to_lowercase().contains(&needle))
            .collect();

        if matches.is_empty() {
            return Ok(format!("Search results: no entries match \"{}\"", term));
        }
        Ok(format!(
            "Search results \"{}\":\n\n{}",
            term,
            render_entries(&matches)
        ))
    }
}

impl Default for LocalFileTools {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileTools for LocalFileTools {
    fn read_file(&self, path: &str) -> ToolResult {
        ToolResult::from_result(self.try_read(path))
    }

    fn write_file(&self, path: &str, content: &str) -> ToolResult {
        ToolResult::from_result(self.try_write(path, content))
    }

    fn list_directory(&self, path: &str) -> ToolResult {
        ToolResult::from_result(self.try_list(path))
    }

    fn search_files(&self, term: &str, path: &str) -> ToolResult {
        ToolResult::from_result(self.try_search(term, path))
    }
}

fn render_entries(entries: &[(String, bool)]) -> String {
    entries
        .iter()
        .map(|(name, is_dir)| {
            let marker = if *is_dir { DIR_MARKER } else { FILE_MARKER };
            format!("{} {}", marker, name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// File names (not directories) found in a listing produced by [`FileTools::list_directory`]
pub fn listed_files(listing: &str) -> Vec<String> {
    let prefix = format!("{} ", FILE_MARKER);
    listing
        .lines()
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .map(str::to_string)
        .collect()
}
