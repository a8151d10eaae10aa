use super::{
    error::HiveError,
    store::{HiveKey, HiveStore, HiveValue, ValueData},
};
use crate::utils::encoding::base64_decode_standard;
use chrono::{DateTime, Utc};
use log::{error, warn};
use serde::Deserialize;
use std::{collections::HashMap, fs::read, path::Path};

#[derive(Debug, Clone)]
struct MemoryNode {
    key: HiveKey,
    children: Vec<usize>,
}

/// In memory hive. Keys keep the order they were added in
#[derive(Debug, Clone)]
pub struct MemoryHive {
    nodes: Vec<MemoryNode>,
    lookup: HashMap<String, usize>,
}

/// Registry export produced by the `registry` artifact. Either the bare entry list or the full artifact output
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportFile {
    Entries(Vec<ExportEntry>),
    Hive { registry_entries: Vec<ExportEntry> },
}

#[derive(Debug, Deserialize)]
struct ExportEntry {
    path: String,
    #[serde(default)]
    values: Vec<ExportValue>,
    last_modified: Option<ExportTime>,
}

#[derive(Debug, Deserialize)]
struct ExportValue {
    value: String,
    data: String,
    data_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportTime {
    Epoch(i64),
    Text(String),
}

impl Default for MemoryHive {
    fn default() -> Self {
        MemoryHive::new()
    }
}

impl MemoryHive {
    pub fn new() -> MemoryHive {
        let root = MemoryNode {
            key: HiveKey {
                name: String::new(),
                path: String::new(),
                last_written: None,
                values: Vec::new(),
            },
            children: Vec::new(),
        };
        let mut lookup = HashMap::new();
        lookup.insert(String::new(), 0);

        MemoryHive {
            nodes: vec![root],
            lookup,
        }
    }

    /// Add a key, creating any missing parents
    pub fn add_key(&mut self, path: &str, last_written: Option<DateTime<Utc>>) -> &mut MemoryHive {
        let index = self.ensure_key(path);
        if last_written.is_some() {
            self.nodes[index].key.last_written = last_written;
        }
        self
    }

    /// Add or replace a value, creating the key if needed
    pub fn add_value(&mut self, path: &str, name: &str, data: ValueData) -> &mut MemoryHive {
        let index = self.ensure_key(path);
        let values = &mut self.nodes[index].key.values;
        if let Some(existing) = values
            .iter_mut()
            .find(|value| value.name.eq_ignore_ascii_case(name))
        {
            existing.data = data;
            return self;
        }

        values.push(HiveValue {
            name: name.to_string(),
            data,
        });
        self
    }

    /// Read a registry JSON export from disk
    pub fn read_export(path: &Path) -> Result<MemoryHive, HiveError> {
        let data = match read(path) {
            Ok(result) => result,
            Err(err) => {
                error!("[hive] Could not read registry export {path:?}: {err:?}");
                return Err(HiveError::ReadFile);
            }
        };
        MemoryHive::from_export(&data)
    }

    /// Build a hive from registry JSON export bytes
    pub fn from_export(data: &[u8]) -> Result<MemoryHive, HiveError> {
        let export_result = serde_json::from_slice(data);
        let export: ExportFile = match export_result {
            Ok(result) => result,
            Err(err) => {
                error!("[hive] Could not parse registry export: {err:?}");
                return Err(HiveError::BadExport);
            }
        };

        let entries = match export {
            ExportFile::Entries(entries) => entries,
            ExportFile::Hive { registry_entries } => registry_entries,
        };

        let mut hive = MemoryHive::new();
        for entry in entries {
            let path = strip_root(&entry.path);
            let last_written = entry.last_modified.as_ref().and_then(export_time);
            hive.add_key(path, last_written);

            for value in &entry.values {
                hive.add_value(path, &value.value, export_value(path, value));
            }
        }

        Ok(hive)
    }

    fn ensure_key(&mut self, path: &str) -> usize {
        let path = path.trim_matches('\\');
        let lookup_path = path.to_lowercase();
        if let Some(index) = self.lookup.get(&lookup_path) {
            return *index;
        }

        let (parent, name) = path.rsplit_once('\\').unwrap_or(("", path));
        let parent_index = self.ensure_key(parent);

        let index = self.nodes.len();
        self.nodes.push(MemoryNode {
            key: HiveKey {
                name: name.to_string(),
                path: path.to_string(),
                last_written: None,
                values: Vec::new(),
            },
            children: Vec::new(),
        });
        self.nodes[parent_index].children.push(index);
        self.lookup.insert(lookup_path, index);
        index
    }

    fn find(&self, path: &str) -> Option<&MemoryNode> {
        let lookup_path = path.trim_matches('\\').to_lowercase();
        self.lookup
            .get(&lookup_path)
            .and_then(|index| self.nodes.get(*index))
    }
}

impl HiveStore for MemoryHive {
    fn open_key(&self, path: &str) -> Result<Option<HiveKey>, HiveError> {
        Ok(self.find(path).map(|node| node.key.clone()))
    }

    fn subkeys(&self, path: &str) -> Result<Vec<HiveKey>, HiveError> {
        let node = match self.find(path) {
            Some(result) => result,
            None => return Ok(Vec::new()),
        };

        Ok(node
            .children
            .iter()
            .filter_map(|index| self.nodes.get(*index))
            .map(|child| child.key.clone())
            .collect())
    }
}

/// Exports start every path at a `ROOT` key
fn strip_root(path: &str) -> &str {
    let root = "ROOT";
    match path.get(..root.len()) {
        Some(start) if start.eq_ignore_ascii_case(root) => {
            let remaining = &path[root.len()..];
            if remaining.is_empty() || remaining.starts_with('\\') {
                return remaining.trim_start_matches('\\');
            }
            path
        }
        _ => path,
    }
}

fn export_time(time: &ExportTime) -> Option<DateTime<Utc>> {
    match time {
        ExportTime::Epoch(0) => None,
        ExportTime::Epoch(seconds) => DateTime::from_timestamp(*seconds, 0),
        ExportTime::Text(text) => match DateTime::parse_from_rfc3339(text) {
            Ok(result) => Some(result.with_timezone(&Utc)),
            Err(err) => {
                warn!("[hive] Bad last modified timestamp {text}: {err:?}");
                None
            }
        },
    }
}

/// Convert exported value text back to typed data. Values that do not decode are kept as text
fn export_value(path: &str, value: &ExportValue) -> ValueData {
    let null_data = value.data.is_empty() || value.data == "(NULL)";
    let data = &value.data;

    let decoded = match value.data_type.as_str() {
        "REG_SZ" | "REG_LINK" => Some(ValueData::String(data.clone())),
        "REG_EXPAND_SZ" => Some(ValueData::ExpandString(data.clone())),
        "REG_MULTI_SZ" if null_data => Some(ValueData::MultiString(Vec::new())),
        "REG_MULTI_SZ" => Some(ValueData::MultiString(
            data.split('\n').map(|entry| entry.trim_end_matches('\r').to_string()).collect(),
        )),
        "REG_DWORD" | "REG_DWORD_BIG_ENDIAN" => data.parse::<u32>().ok().map(ValueData::Dword),
        "REG_QWORD" | "REG_FILETIME" => data.parse::<u64>().ok().map(ValueData::Qword),
        "REG_NONE" if null_data => Some(ValueData::None),
        _ if null_data => Some(ValueData::Binary(Vec::new())),
        _ => base64_decode_standard(data).ok().map(ValueData::Binary),
    };

    match decoded {
        Some(result) => result,
        None => {
            warn!(
                "[hive] Could not decode {} value {} at {path}, keeping text",
                value.data_type, value.value
            );
            ValueData::String(data.clone())
        }
    }
}
