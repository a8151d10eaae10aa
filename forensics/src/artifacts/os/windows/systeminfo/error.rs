use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SystemInfoError {
    ReadHive,
}

impl std::error::Error for SystemInfoError {}

impl fmt::Display for SystemInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemInfoError::ReadHive => write!(f, "Failed to read system information keys"),
        }
    }
}
