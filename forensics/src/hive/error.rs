use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum HiveError {
    ReadFile,
    BadExport,
    OpenHive,
    ReadKey,
    ControlSet,
}

impl std::error::Error for HiveError {}

impl fmt::Display for HiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HiveError::ReadFile => write!(f, "Failed to read hive file"),
            HiveError::BadExport => write!(f, "Failed to parse registry export"),
            HiveError::OpenHive => write!(f, "Failed to open hive"),
            HiveError::ReadKey => write!(f, "Failed to read hive key"),
            HiveError::ControlSet => write!(f, "Could not resolve the current control set"),
        }
    }
}
