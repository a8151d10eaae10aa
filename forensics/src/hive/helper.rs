use super::{
    error::HiveError,
    store::{HiveKey, HiveStore, ValueData},
};
use crate::utils::strings::decode_utf16_lossy;
use common::time::{TemporalValue, TimeEncoding};
use log::warn;

/// Join a parent key path and a child name
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        return child.to_string();
    }
    format!("{parent}\\{child}")
}

/// Get a text value. Numbers are rendered as decimal text
pub(crate) fn get_string(key: &HiveKey, name: &str) -> Option<String> {
    let value = key.value(name)?;
    value_string(&value.data)
}

fn value_string(data: &ValueData) -> Option<String> {
    match data {
        ValueData::String(text) | ValueData::ExpandString(text) => Some(text.clone()),
        ValueData::Dword(number) => Some(number.to_string()),
        ValueData::Qword(number) => Some(number.to_string()),
        ValueData::MultiString(_) | ValueData::Binary(_) | ValueData::None => None,
    }
}

/// Get a 32 bit value. Decimal text is accepted
pub(crate) fn get_dword(key: &HiveKey, name: &str) -> Option<u32> {
    let value = key.value(name)?;
    match &value.data {
        ValueData::Dword(number) => Some(*number),
        ValueData::Qword(number) => u32::try_from(*number).ok(),
        ValueData::String(text) | ValueData::ExpandString(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Get a 64 bit value. An eight byte binary value is read little endian
pub(crate) fn get_qword(key: &HiveKey, name: &str) -> Option<u64> {
    let value = key.value(name)?;
    value_qword(&value.data)
}

/// Get the unnamed value of a key as a 64 bit number
pub(crate) fn get_default_qword(key: &HiveKey) -> Option<u64> {
    let value = key.default_value()?;
    value_qword(&value.data)
}

fn value_qword(data: &ValueData) -> Option<u64> {
    let qword_size = 8;
    match data {
        ValueData::Qword(number) => Some(*number),
        ValueData::Dword(number) => Some(u64::from(*number)),
        ValueData::Binary(bytes) if bytes.len() >= qword_size => {
            let mut raw = [0; 8];
            raw.copy_from_slice(&bytes[..qword_size]);
            Some(u64::from_le_bytes(raw))
        }
        _ => None,
    }
}

/// Get a binary value
pub(crate) fn get_binary<'a>(key: &'a HiveKey, name: &str) -> Option<&'a [u8]> {
    let value = key.value(name)?;
    match &value.data {
        ValueData::Binary(bytes) => Some(bytes),
        _ => None,
    }
}

/// Get a value that may hold one string or a list of strings
pub(crate) fn get_multi_string(key: &HiveKey, name: &str) -> Vec<String> {
    match key.value(name) {
        Some(value) => normalize_multi_value(&value.data),
        None => Vec::new(),
    }
}

/// Normalize a single string or a string list to a list without empty entries
pub(crate) fn normalize_multi_value(data: &ValueData) -> Vec<String> {
    match data {
        ValueData::String(text) | ValueData::ExpandString(text) => {
            if text.is_empty() {
                return Vec::new();
            }
            vec![text.clone()]
        }
        ValueData::MultiString(entries) => entries
            .iter()
            .filter(|entry| !entry.is_empty())
            .cloned()
            .collect(),
        ValueData::Dword(number) => vec![number.to_string()],
        ValueData::Qword(number) => vec![number.to_string()],
        // Raw REG_MULTI_SZ payload
        ValueData::Binary(bytes) => decode_utf16_lossy(bytes)
            .split('\0')
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
        ValueData::None => Vec::new(),
    }
}

/// Last write time of a key
pub(crate) fn key_time(key: &HiveKey) -> TemporalValue {
    match key.last_written {
        Some(time) => TemporalValue::at(time, TimeEncoding::Filetime),
        None => TemporalValue::absent(TimeEncoding::Filetime),
    }
}

/// Depth first search for the first key whose name ends with `suffix`. The key at `path` is checked before its descendants
pub(crate) fn find_key_with_suffix(
    store: &dyn HiveStore,
    path: &str,
    suffix: &str,
) -> Result<Option<HiveKey>, HiveError> {
    let suffix = suffix.to_lowercase();
    let start = match store.open_key(path)? {
        Some(result) => result,
        None => return Ok(None),
    };
    if start.name.to_lowercase().ends_with(&suffix) {
        return Ok(Some(start));
    }

    let max_depth = 32;
    search_suffix(store, path, &suffix, 0, max_depth)
}

fn search_suffix(
    store: &dyn HiveStore,
    path: &str,
    suffix: &str,
    depth: usize,
    max_depth: usize,
) -> Result<Option<HiveKey>, HiveError> {
    if depth >= max_depth {
        warn!("[hive] Stopped suffix search at {path}, key tree too deep");
        return Ok(None);
    }

    for key in store.subkeys(path)? {
        if key.name.to_lowercase().ends_with(suffix) {
            return Ok(Some(key));
        }
        if let Some(found) = search_suffix(store, &key.path, suffix, depth + 1, max_depth)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
