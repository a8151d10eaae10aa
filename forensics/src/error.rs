use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum TomlError {
    NoFile,
    BadToml,
    ImageRoot,
    NoReports,
}

impl std::error::Error for TomlError {}

impl fmt::Display for TomlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlError::NoFile => write!(f, "Failed to read TOML file"),
            TomlError::BadToml => write!(f, "Failed to parse TOML data"),
            TomlError::ImageRoot => write!(f, "Image root is not a directory"),
            TomlError::NoReports => write!(f, "No report could be produced"),
        }
    }
}
