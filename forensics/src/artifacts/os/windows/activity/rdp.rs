use super::error::ActivityError;
use crate::hive::{
    helper::{get_string, key_time},
    store::HiveStore,
};
use common::windows::RdpServerEntry;
use glob::{MatchOptions, Pattern, glob_with};
use log::{error, warn};
use std::path::{Path, PathBuf};

const RDP_SERVERS: &str = "Software\\Microsoft\\Terminal Server Client\\Servers";
const RDP_CACHE: [&str; 5] = [
    "AppData",
    "Local",
    "Microsoft",
    "Terminal Server Client",
    "Cache",
];

/// Outbound RDP connections. The key timestamp is the last time the entry was updated
pub(crate) fn grab_rdp_servers(
    ntuser: &dyn HiveStore,
) -> Result<Vec<RdpServerEntry>, ActivityError> {
    let servers = match ntuser.subkeys(RDP_SERVERS) {
        Ok(result) => result,
        Err(err) => {
            error!("[activity] Could not list RDP servers: {err:?}");
            return Err(ActivityError::ReadHive);
        }
    };

    Ok(servers
        .iter()
        .map(|server| RdpServerEntry {
            server: server.name.clone(),
            username_hint: get_string(server, "UsernameHint"),
            last_updated: key_time(server),
        })
        .collect())
}

/// Return the RDP bitmap cache directory if it holds any `.bin` files
pub(crate) fn find_rdp_cache(profile_root: &Path) -> Option<PathBuf> {
    let mut cache = profile_root.to_path_buf();
    cache.extend(RDP_CACHE);

    let pattern = format!("{}/*.bin", Pattern::escape(&cache.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let entries = match glob_with(&pattern, options) {
        Ok(result) => result,
        Err(err) => {
            warn!("[activity] Bad glob for RDP cache {cache:?}: {err:?}");
            return None;
        }
    };

    let bitmap = entries.flatten().find(|entry| entry.is_file())?;
    bitmap.parent().map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::{RDP_SERVERS, find_rdp_cache, grab_rdp_servers};
    use crate::hive::{memory::MemoryHive, store::ValueData};
    use chrono::DateTime;
    use std::path::PathBuf;

    #[test]
    fn test_grab_rdp_servers() {
        let time = DateTime::from_timestamp(1673778600, 0);
        let mut hive = MemoryHive::new();
        hive.add_key(&format!("{RDP_SERVERS}\\10.0.0.5"), time)
            .add_value(
                &format!("{RDP_SERVERS}\\10.0.0.5"),
                "UsernameHint",
                ValueData::String(String::from("CORP\\admin")),
            )
            .add_key(&format!("{RDP_SERVERS}\\jumpbox.corp.local"), None);

        let servers = grab_rdp_servers(&hive).unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].server, "10.0.0.5");
        assert_eq!(servers[0].username_hint.as_deref(), Some("CORP\\admin"));
        assert_eq!(servers[0].last_updated.to_string(), "2023-01-15 10:30:00");
        assert!(servers[1].username_hint.is_none());
        assert_eq!(servers[1].last_updated.to_string(), "N/A");
    }

    #[test]
    fn test_find_rdp_cache() {
        let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        root.push("tests/test_data/image/Users/alice");
        let cache = find_rdp_cache(&root).unwrap();
        assert!(cache.ends_with("Terminal Server Client/Cache"));

        let mut missing = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        missing.push("tests/test_data/image/Users/nobody");
        assert!(find_rdp_cache(&missing).is_none());
    }
}
