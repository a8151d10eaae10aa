use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum NetworkError {
    ReadHive,
}

impl std::error::Error for NetworkError {}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ReadHive => write!(f, "Failed to read network keys"),
        }
    }
}
