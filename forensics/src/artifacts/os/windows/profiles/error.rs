use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ProfileError {
    ProfileList,
    ReadHive,
    Regex,
}

impl std::error::Error for ProfileError {}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::ProfileList => write!(f, "SOFTWARE hive has no ProfileList key"),
            ProfileError::ReadHive => write!(f, "Failed to read SOFTWARE hive"),
            ProfileError::Regex => write!(f, "Failed to compile profile path regex"),
        }
    }
}
