use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum UserAssistError {
    ReadHive,
}

impl std::error::Error for UserAssistError {}

impl fmt::Display for UserAssistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAssistError::ReadHive => write!(f, "Failed to read UserAssist keys"),
        }
    }
}
