use dialoguer::{Confirm, Input};
use snapshot_core::BugNumber;
use snapshot_operations::traits::InteractionProvider;
use snapshot_operations::{OperationError, Result};

fn prompt_error(err: dialoguer::Error) -> OperationError {
    match err {
        dialoguer::Error::IO(io_err) => OperationError::Io(io_err),
    }
}

/// Asks on the terminal.
pub struct TerminalInteractionProvider;

impl InteractionProvider for TerminalInteractionProvider {
    fn confirm_first_devel_upload(
        &self,
        devel_series: &str,
        _changelog_series: &str,
    ) -> Result<bool> {
        Confirm::new()
            .with_prompt(format!("Is this the first devel upload for {devel_series}?"))
            .default(false)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm_first_sru(&self, _devel_series: &str, changelog_series: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(format!("Is this the first SRU for series {changelog_series}?"))
            .default(false)
            .interact()
            .map_err(prompt_error)
    }

    fn sru_bug(&self) -> Result<Option<BugNumber>> {
        let answer: String = Input::new()
            .with_prompt("No SRU bug. Enter one now or leave blank for no SRU bug")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(answer.parse()?))
    }
}

/// Used when nobody can answer; every question becomes an error naming the
/// flag that answers it up front.
pub struct NonInteractiveProvider;

impl InteractionProvider for NonInteractiveProvider {
    fn confirm_first_devel_upload(
        &self,
        devel_series: &str,
        changelog_series: &str,
    ) -> Result<bool> {
        Err(OperationError::UploadTargetUndecided {
            devel_series: devel_series.to_string(),
            changelog_series: changelog_series.to_string(),
        })
    }

    fn confirm_first_sru(&self, devel_series: &str, changelog_series: &str) -> Result<bool> {
        self.confirm_first_devel_upload(devel_series, changelog_series)
    }

    fn sru_bug(&self) -> Result<Option<BugNumber>> {
        Err(OperationError::SruBugRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_upload_question_names_both_series() {
        let result = NonInteractiveProvider.confirm_first_devel_upload("plucky", "noble");

        let err = result.expect_err("cannot ask");
        let msg = err.to_string();
        assert!(msg.contains("plucky"));
        assert!(msg.contains("noble"));
        assert!(msg.contains("--first-devel-upload"));
    }

    #[test]
    fn non_interactive_sru_bug_asks_for_flag() {
        let err = NonInteractiveProvider.sru_bug().expect_err("cannot ask");

        assert!(matches!(err, OperationError::SruBugRequired));
        assert!(err.to_string().contains("--no-sru-bug"));
    }

    #[test]
    fn prompt_io_errors_become_operation_io_errors() {
        let err = prompt_error(dialoguer::Error::IO(std::io::Error::other("closed")));

        assert!(matches!(err, OperationError::Io(_)));
    }
}
