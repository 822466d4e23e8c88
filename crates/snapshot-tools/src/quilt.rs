use std::sync::Arc;

use crate::Result;
use crate::process::{CommandOutput, CommandRunner, Invocation};

const PROGRAM: &str = "quilt";

/// Diff formatting shared by `quilt diff` and `quilt refresh`.
pub const QUILT_DIFF_ARGS: &str = "-p ab --no-timestamps --no-index --sort";

/// Front-end for `quilt`, run with an empty quiltrc and a fixed environment
/// so the operator's own settings cannot change the patch format.
#[derive(Clone)]
pub struct Quilt {
    runner: Arc<dyn CommandRunner>,
    patches_dir: String,
}

impl Quilt {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, patches_dir: impl Into<String>) -> Self {
        Self {
            runner,
            patches_dir: patches_dir.into(),
        }
    }

    #[must_use]
    pub fn environment(&self) -> Vec<(String, String)> {
        vec![
            ("QUILT_PATCHES".to_string(), self.patches_dir.clone()),
            ("QUILT_DIFF_OPTS".to_string(), "-p".to_string()),
            (
                "QUILT_PATCH_OPTS".to_string(),
                "--reject-format=unified".to_string(),
            ),
            (
                "QUILT_DIFF_ARGS".to_string(),
                format!("{QUILT_DIFF_ARGS} --color=auto"),
            ),
            ("QUILT_REFRESH_ARGS".to_string(), QUILT_DIFF_ARGS.to_string()),
            ("LANG".to_string(), "C".to_string()),
        ]
    }

    fn invocation(&self, args: &[&str]) -> Invocation {
        let mut invocation = Invocation::new(PROGRAM)
            .args(["--quiltrc", "-"])
            .args(args.iter().copied());
        invocation.env = self.environment();
        invocation
    }

    fn run(&self, args: &[&str]) -> Result<(Invocation, CommandOutput)> {
        let invocation = self.invocation(args);
        let output = self.runner.run(&invocation)?;
        Ok((invocation, output))
    }

    /// The next unapplied patch, or `None` when the stack is fully applied.
    ///
    /// # Errors
    ///
    /// Returns an error if quilt cannot be run.
    pub fn next(&self) -> Result<Option<String>> {
        let (_, output) = self.run(&["next"])?;
        if output.is_success() {
            Ok(Some(output.stdout.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    /// # Errors
    ///
    /// Returns an error if the next patch does not apply cleanly.
    pub fn push(&self) -> Result<()> {
        let (invocation, output) = self.run(&["push"])?;
        output.checked(&invocation)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the top patch cannot be refreshed.
    pub fn refresh(&self) -> Result<()> {
        let (invocation, output) = self.run(&["refresh"])?;
        output.checked(&invocation)?;
        Ok(())
    }

    /// Unapplies every patch and returns quilt's exit code, leaving its
    /// interpretation to the caller (2 means nothing was applied).
    ///
    /// # Errors
    ///
    /// Returns an error if quilt cannot be run.
    pub fn pop_all(&self) -> Result<Option<i32>> {
        let (_, output) = self.run(&["pop", "-a"])?;
        Ok(output.code)
    }
}
