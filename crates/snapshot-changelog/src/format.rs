use std::fmt;

use snapshot_core::BugNumber;
use url::Url;

/// Widest physical line allowed in a generated changelog body.
pub const MAX_LINE_WIDTH: usize = 79;

const BUGS_FIXED_PREFIX: &str = "    - Bugs fixed in this snapshot: (LP: ";
const BUGS_FIXED_CONTINUATION: &str = "      (LP: ";
const PATCHES_DIR_PREFIX: &str = "debian/patches/";
const PATCHES_DIR_SHORT: &str = "d/p/";

/// What the snapshot was taken from, as shown in the changelog bullet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSubject {
    /// An upstream release tag, shown verbatim.
    Tag(String),
    /// Any other commitish, resolved to its abbreviated hash.
    Commit {
        commitish: String,
        short_hash: String,
    },
}

impl fmt::Display for SnapshotSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Commit {
                commitish,
                short_hash,
            } => {
                if commitish.starts_with(short_hash.as_str()) {
                    write!(f, "{short_hash}")
                } else {
                    write!(f, "{commitish} at {short_hash}")
                }
            }
        }
    }
}

/// The body written into the new changelog entry.
#[derive(Debug, Clone)]
pub struct SnapshotMessage {
    pub subject: SnapshotSubject,
    pub sru_bug: Option<BugNumber>,
    pub upstream_changelog: Option<Url>,
    pub bugs_fixed: Vec<BugNumber>,
}

impl SnapshotMessage {
    #[must_use]
    pub fn new(subject: SnapshotSubject) -> Self {
        Self {
            subject,
            sru_bug: None,
            upstream_changelog: None,
            bugs_fixed: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sru_bug(mut self, bug: Option<BugNumber>) -> Self {
        self.sru_bug = bug;
        self
    }

    #[must_use]
    pub fn with_upstream_changelog(mut self, url: Option<Url>) -> Self {
        self.upstream_changelog = url;
        self
    }

    #[must_use]
    pub fn with_bugs_fixed(mut self, bugs: Vec<BugNumber>) -> Self {
        self.bugs_fixed = bugs;
        self
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut output = format!("  * Upstream snapshot based on {}.", self.subject);

        if let Some(bug) = &self.sru_bug {
            output.push_str(&format!(" (LP: #{bug})."));
        }

        if let Some(url) = &self.upstream_changelog {
            output.push_str("\n    List of changes from upstream can be found at\n    ");
            output.push_str(url.as_str());
        }

        if !self.bugs_fixed.is_empty() {
            output.push('\n');
            output.push_str(&format_bugs_fixed(&self.bugs_fixed));
        }

        output
    }
}

/// Renders the `Bugs fixed in this snapshot` block.
///
/// Bugs are packed greedily; a line is closed before it would exceed
/// [`MAX_LINE_WIDTH`] and the next one re-opens with `(LP: `. A bug number
/// is never split across lines.
#[must_use]
pub fn format_bugs_fixed(bugs: &[BugNumber]) -> String {
    if bugs.is_empty() {
        return String::new();
    }

    let mut lines = Vec::new();
    let mut line = String::from(BUGS_FIXED_PREFIX);
    let mut line_has_bug = false;

    for bug in bugs {
        let token = format!("#{bug}");
        let separator = if line_has_bug { ", " } else { "" };
        // +1 leaves room for the closing paren
        let fits = line.len() + separator.len() + token.len() + 1 <= MAX_LINE_WIDTH;

        if line_has_bug && !fits {
            line.push(')');
            lines.push(std::mem::replace(
                &mut line,
                String::from(BUGS_FIXED_CONTINUATION),
            ));
        } else {
            line.push_str(separator);
        }
        line.push_str(&token);
        line_has_bug = true;
    }

    line.push(')');
    lines.push(line);
    lines.join("\n")
}

/// Shortens `debian/patches/foo.patch` to `d/p/foo.patch`.
#[must_use]
pub fn abbreviate_patch_path(path: &str) -> String {
    path.replacen(PATCHES_DIR_PREFIX, PATCHES_DIR_SHORT, 1)
}

#[must_use]
pub fn format_refresh_note(patches: &[String]) -> String {
    let mut output = String::from("  * refresh patches:");
    for patch in patches {
        output.push_str("\n    - ");
        output.push_str(&abbreviate_patch_path(patch));
    }
    output
}
