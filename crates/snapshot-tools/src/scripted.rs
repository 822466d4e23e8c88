use std::collections::VecDeque;
use std::sync::Mutex;

use crate::Result;
use crate::process::{CommandOutput, CommandRunner, Invocation};

struct Rule {
    prefix: String,
    responses: VecDeque<CommandOutput>,
}

/// A fake [`CommandRunner`] that answers from a script.
///
/// Each rule matches command lines starting with its prefix; the longest
/// matching prefix wins. Responses queued on one rule are handed out in
/// order and the last one repeats. Unscripted commands succeed with empty
/// output. Every invocation is recorded.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<Invocation>>,
}

#[allow(clippy::missing_panics_doc)]
impl ScriptedRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `output` for command lines starting with `prefix`.
    #[must_use]
    pub fn on(self, prefix: impl Into<String>, output: CommandOutput) -> Self {
        let prefix = prefix.into();
        {
            let mut rules = self.rules.lock().expect("lock poisoned");
            if let Some(rule) = rules.iter_mut().find(|rule| rule.prefix == prefix) {
                rule.responses.push_back(output);
            } else {
                rules.push(Rule {
                    prefix,
                    responses: VecDeque::from([output]),
                });
            }
        }
        self
    }

    #[must_use]
    pub fn on_success(self, prefix: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.on(prefix, CommandOutput::success(stdout))
    }

    #[must_use]
    pub fn on_failure(self, prefix: impl Into<String>, code: i32) -> Self {
        self.on(prefix, CommandOutput::failure(code, ""))
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    #[must_use]
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::command_line).collect()
    }

    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.command_lines()
            .iter()
            .any(|line| line.starts_with(prefix))
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let line = invocation.command_line();
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(invocation.clone());

        let mut rules = self.rules.lock().expect("lock poisoned");
        let rule = rules
            .iter_mut()
            .filter(|rule| line.starts_with(&rule.prefix))
            .max_by_key(|rule| rule.prefix.len());

        let output = match rule {
            Some(rule) if rule.responses.len() > 1 => rule.responses.pop_front(),
            Some(rule) => rule.responses.front().cloned(),
            None => None,
        };
        Ok(output.unwrap_or_else(|| CommandOutput::success("")))
    }
}
