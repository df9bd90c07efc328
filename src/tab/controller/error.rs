use crate::tab::model::bill::InvalidName;
use crate::tab::storage::StorageError;
use crate::tab::util::amount::AmountError;
use derive_more::{Display, Error};
use std::io;

#[derive(Debug, Display, Error)]
pub(crate) enum SessionError {
    #[display("price is not a number")]
    InvalidPrice { source: AmountError },
    #[display("tip must be a number")]
    InvalidTip { source: AmountError },
    #[display("not a valid option")]
    InvalidCommand { token: String },
    #[display("{source}")]
    InvalidName { source: InvalidName },
    #[display("could not save the bill: {source}")]
    Storage { source: StorageError },
    #[display("input closed before the bill was saved")]
    InputClosed,
    #[display("terminal error: {source}")]
    Terminal { source: io::Error },
}

impl SessionError {
    /// Whether the session reports the error and keeps prompting.
    pub fn is_recoverable(&self) -> bool {
        match *self {
            SessionError::InvalidPrice { .. }
            | SessionError::InvalidTip { .. }
            | SessionError::InvalidCommand { .. } => true,
            SessionError::InvalidName { .. }
            | SessionError::Storage { .. }
            | SessionError::InputClosed
            | SessionError::Terminal { .. } => false,
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(source: io::Error) -> Self {
        SessionError::Terminal { source }
    }
}

impl From<StorageError> for SessionError {
    fn from(source: StorageError) -> Self {
        SessionError::Storage { source }
    }
}

impl From<InvalidName> for SessionError {
    fn from(source: InvalidName) -> Self {
        SessionError::InvalidName { source }
    }
}
