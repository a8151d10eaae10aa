use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum AccountError {
    ReadHive,
    UsersKey,
    RelativeId,
    FRecordMissing,
    FRecordTooShort,
    HashFile,
}

impl std::error::Error for AccountError {}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::ReadHive => write!(f, "Failed to read SAM hive"),
            AccountError::UsersKey => write!(f, "SAM hive has no Users key"),
            AccountError::RelativeId => write!(f, "User key name is not a hex RID"),
            AccountError::FRecordMissing => write!(f, "User key has no F value"),
            AccountError::FRecordTooShort => write!(f, "F value is too short"),
            AccountError::HashFile => write!(f, "Failed to read hash file"),
        }
    }
}
