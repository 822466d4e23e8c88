use url::Url;

use crate::Result;
use crate::error::ChangelogError;

pub const DEFAULT_UPSTREAM_CHANGELOG_TEMPLATE: &str =
    "https://raw.githubusercontent.com/canonical/cloud-init/{tag}/ChangeLog";

const TAG_PLACEHOLDER: &str = "{tag}";

/// URL template pointing at the upstream changelog of a release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamChangelogTemplate {
    template: String,
}

impl UpstreamChangelogTemplate {
    /// # Errors
    ///
    /// Returns `ChangelogError::TemplateMissingTag` if the template has no
    /// `{tag}` placeholder, or `ChangelogError::UrlParse` if expanding it
    /// does not produce a valid URL.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(TAG_PLACEHOLDER) {
            return Err(ChangelogError::TemplateMissingTag { template });
        }

        let parsed = Self { template };
        parsed.url_for("0.0")?;
        Ok(parsed)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::UrlParse` if the expanded template is not a URL.
    pub fn url_for(&self, tag: &str) -> Result<Url> {
        let expanded = self.template.replace(TAG_PLACEHOLDER, tag);
        Url::parse(&expanded).map_err(|source| ChangelogError::UrlParse {
            url: expanded,
            source,
        })
    }
}

impl Default for UpstreamChangelogTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_UPSTREAM_CHANGELOG_TEMPLATE.to_string(),
        }
    }
}
