use super::error::HiveError;
use chrono::{DateTime, Utc};

/// Decoded payload of a registry value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
    None,
    String(String),
    ExpandString(String),
    MultiString(Vec<String>),
    Dword(u32),
    Qword(u64),
    Binary(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HiveValue {
    pub name: String,
    pub data: ValueData,
}

/// One key without its children. Subkeys are listed through `HiveStore::subkeys`
#[derive(Debug, Clone, PartialEq)]
pub struct HiveKey {
    pub name: String,
    /// Backslash separated path relative to the hive root
    pub path: String,
    pub last_written: Option<DateTime<Utc>>,
    pub values: Vec<HiveValue>,
}

impl HiveKey {
    /// Lookup a value by name, ignoring case like Windows does
    pub fn value(&self, name: &str) -> Option<&HiveValue> {
        self.values
            .iter()
            .find(|value| value.name.eq_ignore_ascii_case(name))
    }

    /// The unnamed value of the key
    pub fn default_value(&self) -> Option<&HiveValue> {
        self.values
            .iter()
            .find(|value| value.name.is_empty() || value.name.eq_ignore_ascii_case("(default)"))
    }
}

/// Read only access to a registry hive.
/// Paths are relative to the hive root and case insensitive
pub trait HiveStore {
    /// Open a key. `Ok(None)` when the key does not exist
    fn open_key(&self, path: &str) -> Result<Option<HiveKey>, HiveError>;
    /// Subkeys in enumeration order. A missing parent has no subkeys
    fn subkeys(&self, path: &str) -> Result<Vec<HiveKey>, HiveError>;
}
