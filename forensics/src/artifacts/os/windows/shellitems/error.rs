use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ShellItemError {
    ItemSize,
    TextOffset,
}

impl std::error::Error for ShellItemError {}

impl fmt::Display for ShellItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellItemError::ItemSize => write!(f, "ShellItem size is outside of the data"),
            ShellItemError::TextOffset => write!(f, "ShellItem name offset is outside of the item"),
        }
    }
}
