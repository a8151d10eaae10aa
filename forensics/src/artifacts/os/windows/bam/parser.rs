/**
 * The Background Activity Moderator service tracks the last execution time of programs per user.
 * Every value under `UserSettings\<SID>` is a program path with a FILETIME at the start of the data
 *
 * References:
 * `https://www.forensafe.com/blogs/bam.html`
 */
use super::error::BamError;
use crate::{
    hive::{
        controlset::SystemHive,
        store::{HiveKey, ValueData},
    },
    utils::time::decode_filetime_bytes,
};
use common::windows::{BamUser, RunHistoryEntry, RunHistorySource};
use log::error;

/// Windows 10 1809 and later
const BAM_STATE: &str = "Services\\bam\\State\\UserSettings";
/// Windows 10 before 1809
const BAM_LEGACY: &str = "Services\\bam\\UserSettings";

/// Bookkeeping values stored next to the program entries
const SKIP_VALUES: [&str; 4] = ["Version", "SequenceNumber", "", "(default)"];

/// Get BAM entries for every user SID. The legacy key is only read when the current one is missing
pub(crate) fn grab_bam(system: &SystemHive) -> Result<Vec<BamUser>, BamError> {
    let mut users = read_subkeys(system, BAM_STATE)?;
    if users.is_empty() {
        users = read_subkeys(system, BAM_LEGACY)?;
    }

    Ok(users
        .iter()
        .map(|user| BamUser {
            security_id: user.name.clone(),
            entries: get_entries(user),
        })
        .collect())
}

fn get_entries(user: &HiveKey) -> Vec<RunHistoryEntry> {
    let filetime_size = 8;
    let mut entries = Vec::new();
    for value in &user.values {
        if SKIP_VALUES
            .iter()
            .any(|skip| skip.eq_ignore_ascii_case(&value.name))
        {
            continue;
        }
        let data = match &value.data {
            ValueData::Binary(data) if data.len() >= filetime_size => data,
            _ => continue,
        };

        entries.push(RunHistoryEntry {
            program_path: value.name.clone(),
            run_count: None,
            last_executed: decode_filetime_bytes(data),
            source: RunHistorySource::Bam,
            source_key: user.path.clone(),
        });
    }
    entries
}

fn read_subkeys(system: &SystemHive, relative: &str) -> Result<Vec<HiveKey>, BamError> {
    match system.subkeys(relative) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[bam] Could not list {relative}: {err:?}");
            Err(BamError::ReadHive)
        }
    }
}
