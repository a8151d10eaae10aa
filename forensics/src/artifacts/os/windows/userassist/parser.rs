/**
 * Windows `UserAssist` is a Registry artifact that records applications executed via Windows Explorer.
 * Each `{GUID}\Count` key holds one value per program, the value name is ROT13 encoded
 *
 * References:
 * `https://winreg-kb.readthedocs.io/en/latest/sources/explorer-keys/User-assist.html`
 */
use super::{
    assist::{UserAssistData, rot_decode},
    error::UserAssistError,
};
use crate::{
    hive::{
        helper::join_path,
        store::{HiveKey, HiveStore, ValueData},
    },
    utils::diagnostics::Diagnostics,
};
use common::windows::{RunHistoryEntry, RunHistorySource};
use log::{debug, error};

const USERASSIST: &str = "Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\UserAssist";

/// Get every executed program recorded in a NTUSER.DAT hive. Entries with a zero run count are dropped
pub(crate) fn grab_userassist(
    ntuser: &dyn HiveStore,
    diag: &mut Diagnostics,
) -> Result<Vec<RunHistoryEntry>, UserAssistError> {
    let mut entries = Vec::new();
    for guid in read_subkeys(ntuser, USERASSIST)? {
        let count_path = join_path(&guid.path, "Count");
        let count_key = match ntuser.open_key(&count_path) {
            Ok(Some(result)) => result,
            Ok(None) => continue,
            Err(err) => {
                diag.warning("userassist", format!("Could not open {count_path}: {err}"));
                continue;
            }
        };
        get_entries(&count_key, &mut entries);
    }
    Ok(entries)
}

fn get_entries(count_key: &HiveKey, entries: &mut Vec<RunHistoryEntry>) {
    for value in &count_key.values {
        let data = match &value.data {
            ValueData::Binary(data) => data,
            _ => continue,
        };
        let assist = match UserAssistData::parse(data) {
            Some(result) => result,
            None => {
                debug!("[userassist] Skipping short value {}", value.name);
                continue;
            }
        };
        if assist.count == 0 {
            continue;
        }

        entries.push(RunHistoryEntry {
            program_path: rot_decode(&value.name),
            run_count: Some(assist.count),
            last_executed: assist.last_execution,
            source: RunHistorySource::UserAssist,
            source_key: count_key.path.clone(),
        });
    }
}

fn read_subkeys(store: &dyn HiveStore, path: &str) -> Result<Vec<HiveKey>, UserAssistError> {
    match store.subkeys(path) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[userassist] Could not list {path}: {err:?}");
            Err(UserAssistError::ReadHive)
        }
    }
}
