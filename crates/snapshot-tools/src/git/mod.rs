mod commit;
mod history;
mod merge;

use std::sync::Arc;

use crate::Result;
use crate::process::{CommandOutput, CommandRunner, Invocation};

const PROGRAM: &str = "git";

/// Front-end for the `git` command line.
#[derive(Clone)]
pub struct Git {
    runner: Arc<dyn CommandRunner>,
}

impl Git {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn invocation<I, S>(args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(PROGRAM).args(args)
    }

    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.runner.run(invocation)
    }

    fn run_checked(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.runner.run(invocation)?.checked(invocation)
    }
}
