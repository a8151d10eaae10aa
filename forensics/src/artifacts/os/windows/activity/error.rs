use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ActivityError {
    ReadHive,
}

impl std::error::Error for ActivityError {}

impl fmt::Display for ActivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityError::ReadHive => write!(f, "Failed to read activity keys"),
        }
    }
}
