use std::sync::Arc;

use tracing::warn;

use crate::Result;
use crate::process::{CommandRunner, Invocation};

/// Front-end for `dch` from devscripts.
#[derive(Clone)]
pub struct Dch {
    runner: Arc<dyn CommandRunner>,
    changelog: String,
}

impl Dch {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, changelog: impl Into<String>) -> Self {
        Self {
            runner,
            changelog: changelog.into(),
        }
    }

    /// Adds a bullet with a blank body, opening a new entry under
    /// `new_version` when given. `dch` cannot write multi-line bodies, so
    /// callers fill the blank bullet in afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if `dch` fails.
    pub fn add_placeholder(&self, new_version: Option<&str>) -> Result<()> {
        let mut invocation = Invocation::new("dch")
            .args(["--changelog", self.changelog.as_str(), "--no-multimaint"]);
        if let Some(version) = new_version {
            invocation = invocation.args(["--newversion", version]);
        }
        let invocation = invocation.arg(" ");
        self.runner.run(&invocation)?.checked(&invocation)?;
        Ok(())
    }
}

/// Front-end for `distro-info`.
#[derive(Clone)]
pub struct DistroInfo {
    runner: Arc<dyn CommandRunner>,
}

impl DistroInfo {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Codename of the development series, or `None` if `distro-info` does
    /// not know one (e.g. its data is outdated).
    ///
    /// # Errors
    ///
    /// Returns an error if `distro-info` cannot be run.
    pub fn devel(&self) -> Result<Option<String>> {
        let output = self
            .runner
            .run(&Invocation::new("distro-info").arg("--devel"))?;
        let codename = output.stdout.trim();
        if output.is_success() && !codename.is_empty() {
            Ok(Some(codename.to_string()))
        } else {
            warn!(stderr = %output.stderr.trim(), "distro-info could not report the devel series");
            Ok(None)
        }
    }

    /// Version number of the latest stable release, e.g. `22.04`.
    ///
    /// # Errors
    ///
    /// Returns an error if `distro-info` fails.
    pub fn stable_release(&self) -> Result<String> {
        let invocation = Invocation::new("distro-info").args(["--stable", "-r"]);
        let output = self.runner.run(&invocation)?.checked(&invocation)?;
        Ok(output.stdout.trim().to_string())
    }
}

/// Front-end for `dpkg-parsechangelog`.
#[derive(Clone)]
pub struct ParseChangelog {
    runner: Arc<dyn CommandRunner>,
    changelog: String,
}

impl ParseChangelog {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, changelog: impl Into<String>) -> Self {
        Self {
            runner,
            changelog: changelog.into(),
        }
    }

    /// Raw `Key: value` output for the entry `offset` entries below the top.
    ///
    /// # Errors
    ///
    /// Returns an error if `dpkg-parsechangelog` fails.
    pub fn entry(&self, offset: usize) -> Result<String> {
        let invocation = Invocation::new("dpkg-parsechangelog").args([
            "-l".to_string(),
            self.changelog.clone(),
            "--count=1".to_string(),
            format!("--offset={offset}"),
        ]);
        let output = self.runner.run(&invocation)?.checked(&invocation)?;
        Ok(output.stdout)
    }
}
