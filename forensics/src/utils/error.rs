use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum UtilsError {
    Regex,
    CreateDirectory,
    LogFile,
}

impl std::error::Error for UtilsError {}

impl fmt::Display for UtilsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilsError::Regex => write!(f, "Invalid regex provided"),
            UtilsError::CreateDirectory => write!(f, "Could not create directory(ies)"),
            UtilsError::LogFile => write!(f, "Could not create log file"),
        }
    }
}
