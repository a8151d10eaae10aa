use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum StorageError {
    ReadHive,
    Regex,
}

impl std::error::Error for StorageError {}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadHive => write!(f, "Failed to read storage keys"),
            StorageError::Regex => write!(f, "Failed to compile USB regex"),
        }
    }
}
