use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BamError {
    ReadHive,
}

impl std::error::Error for BamError {}

impl fmt::Display for BamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BamError::ReadHive => write!(f, "Failed to read BAM keys"),
        }
    }
}
