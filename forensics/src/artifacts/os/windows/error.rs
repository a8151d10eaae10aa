use std::fmt;

/// A report that did not run. Other reports are unaffected
#[derive(Debug, PartialEq, Eq)]
pub enum ReportError {
    MissingHive,
    OpenHive,
    ControlSet,
    Profiles,
    SystemInfo,
    Network,
    Storage,
    Accounts,
    Activity,
    Serialize,
}

impl std::error::Error for ReportError {}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::MissingHive => write!(f, "Required hive not found"),
            ReportError::OpenHive => write!(f, "Failed to open hive"),
            ReportError::ControlSet => write!(f, "Could not resolve current control set"),
            ReportError::Profiles => write!(f, "Failed to resolve user profiles"),
            ReportError::SystemInfo => write!(f, "Failed to parse system information"),
            ReportError::Network => write!(f, "Failed to parse network configuration"),
            ReportError::Storage => write!(f, "Failed to parse storage devices"),
            ReportError::Accounts => write!(f, "Failed to parse local accounts"),
            ReportError::Activity => write!(f, "Failed to parse user activity"),
            ReportError::Serialize => write!(f, "Failed to serialize report"),
        }
    }
}
