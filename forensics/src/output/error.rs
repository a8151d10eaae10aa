use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FormatError {
    Serialize,
    Output,
}

impl std::error::Error for FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Serialize => write!(f, "Failed to serialize report"),
            FormatError::Output => write!(f, "Failed to write report"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LocalError {
    CreateDirectory,
    CreateFile,
    WriteJson,
}

impl std::error::Error for LocalError {}

impl fmt::Display for LocalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalError::CreateDirectory => write!(f, "Failed to create output directory"),
            LocalError::CreateFile => write!(f, "Failed to create output file"),
            LocalError::WriteJson => write!(f, "Failed to write output"),
        }
    }
}
