use std::path::Path;

use crate::error::ChangelogError;

/// The bullet `dch` leaves behind when asked to add an empty entry.
pub const PLACEHOLDER_LINE: &str = "  *";

/// A `debian/changelog` file held in memory.
#[derive(Debug, Clone)]
pub struct Changelog {
    content: String,
}

impl Changelog {
    #[must_use]
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { content })
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.content
            .lines()
            .filter(|line| is_placeholder(line))
            .count()
    }

    /// Replaces the single blank `  *` bullet with `message`.
    ///
    /// Every other byte of the file is preserved, including the terminator
    /// of the replaced line.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::PlaceholderCount` unless exactly one blank
    /// bullet is present.
    pub fn fill_placeholder(&mut self, message: &str) -> Result<(), ChangelogError> {
        let found = self.placeholder_count();
        if found != 1 {
            return Err(ChangelogError::PlaceholderCount { found });
        }

        let mut new_content = String::with_capacity(self.content.len() + message.len());
        for line in self.content.split_inclusive('\n') {
            let body = line.trim_end_matches(['\n', '\r']);
            if is_placeholder(body) {
                new_content.push_str(message);
                new_content.push_str(&line[body.len()..]);
            } else {
                new_content.push_str(line);
            }
        }

        self.content = new_content;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Write` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ChangelogError> {
        std::fs::write(path, &self.content).map_err(|source| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_placeholder(line: &str) -> bool {
    line.trim_end_matches('\r') == PLACEHOLDER_LINE
}
