use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid bug number '{0}': expected digits, optionally prefixed with '#' or 'LP: #'")]
    InvalidBugNumber(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
