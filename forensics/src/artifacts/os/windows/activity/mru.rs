use super::error::ActivityError;
use crate::hive::{
    helper::get_string,
    store::{HiveKey, HiveStore, ValueData},
};
use common::windows::{MruEntry, TypedPathEntry};
use log::error;

const RUN_MRU: &str = "Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\RunMRU";
const TYPED_PATHS: &str = "Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\TypedPaths";

/// Commands typed into the Run dialog, most recent first as listed by `MRUList`
pub(crate) fn grab_run_mru(ntuser: &dyn HiveStore) -> Result<Vec<MruEntry>, ActivityError> {
    let key = match open(ntuser, RUN_MRU)? {
        Some(result) => result,
        None => return Ok(Vec::new()),
    };
    let mru_list = get_string(&key, "MRUList").unwrap_or_default();

    Ok(mru_list
        .chars()
        .map(|order| {
            let order = order.to_string();
            let value = get_string(&key, &order);
            MruEntry { order, value }
        })
        .collect())
}

/// Paths typed into the Explorer address bar
pub(crate) fn grab_typed_paths(
    ntuser: &dyn HiveStore,
) -> Result<Vec<TypedPathEntry>, ActivityError> {
    let key = match open(ntuser, TYPED_PATHS)? {
        Some(result) => result,
        None => return Ok(Vec::new()),
    };

    let mut paths = Vec::new();
    for value in &key.values {
        let path = match &value.data {
            ValueData::String(text) | ValueData::ExpandString(text) => text.clone(),
            _ => continue,
        };
        paths.push(TypedPathEntry {
            name: value.name.clone(),
            path,
        });
    }
    Ok(paths)
}

pub(crate) fn open(store: &dyn HiveStore, path: &str) -> Result<Option<HiveKey>, ActivityError> {
    match store.open_key(path) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[activity] Could not open {path}: {err:?}");
            Err(ActivityError::ReadHive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RUN_MRU, TYPED_PATHS, grab_run_mru, grab_typed_paths};
    use crate::hive::{memory::MemoryHive, store::ValueData};

    fn text(value: &str) -> ValueData {
        ValueData::String(value.to_string())
    }

    #[test]
    fn test_grab_run_mru() {
        let mut hive = MemoryHive::new();
        hive.add_value(RUN_MRU, "a", text("cmd\\1"))
            .add_value(RUN_MRU, "b", text("regedit\\1"))
            .add_value(RUN_MRU, "MRUList", text("bac"));

        let entries = grab_run_mru(&hive).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].order, "b");
        assert_eq!(entries[0].value.as_deref(), Some("regedit\\1"));
        assert_eq!(entries[1].value.as_deref(), Some("cmd\\1"));
        assert_eq!(entries[2].order, "c");
        assert!(entries[2].value.is_none());
    }

    #[test]
    fn test_grab_run_mru_empty() {
        let mut hive = MemoryHive::new();
        assert!(grab_run_mru(&hive).unwrap().is_empty());

        hive.add_value(RUN_MRU, "a", text("cmd\\1"));
        assert!(grab_run_mru(&hive).unwrap().is_empty());
    }

    #[test]
    fn test_grab_typed_paths() {
        let mut hive = MemoryHive::new();
        hive.add_value(TYPED_PATHS, "url1", text("C:\\Users\\Public"))
            .add_value(TYPED_PATHS, "url2", text("\\\\fileserver\\share"))
            .add_value(TYPED_PATHS, "junk", ValueData::Dword(4));

        let paths = grab_typed_paths(&hive).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].name, "url2");
        assert_eq!(paths[1].path, "\\\\fileserver\\share");
    }
}
