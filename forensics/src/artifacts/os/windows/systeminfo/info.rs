use super::error::SystemInfoError;
use crate::{
    hive::{
        controlset::SystemHive,
        helper::{get_dword, get_string},
        store::{HiveKey, HiveStore},
    },
    utils::{diagnostics::Diagnostics, time::decode_unixepoch},
};
use common::{
    time::{TemporalValue, TimeEncoding},
    windows::SystemInfo,
};
use log::error;

const CURRENT_VERSION: &str = "Microsoft\\Windows NT\\CurrentVersion";
const COMPUTER_NAME: &str = "Control\\ComputerName\\ComputerName";
const TIME_ZONE: &str = "Control\\TimeZoneInformation";

/// Operating system details. Either hive may be missing, the fields it provides are then absent
pub(crate) fn grab_system_info(
    software: Option<&dyn HiveStore>,
    system: Option<&SystemHive>,
    diag: &mut Diagnostics,
) -> Result<SystemInfo, SystemInfoError> {
    let mut info = SystemInfo {
        product_name: None,
        edition_id: None,
        hostname: None,
        display_version: None,
        os_build: None,
        build_lab: None,
        install_date: TemporalValue::absent(TimeEncoding::Unixepoch),
        system_root: None,
        registered_owner: None,
        registered_organization: None,
        product_id: None,
        time_zone: None,
        source_keys: Vec::new(),
    };

    if let Some(store) = software {
        match open(store, CURRENT_VERSION)? {
            Some(key) => {
                current_version(&key, &mut info);
                info.source_keys.push(format!("SOFTWARE\\{CURRENT_VERSION}"));
            }
            None => diag.warning(
                "systeminfo",
                format!("SOFTWARE hive has no {CURRENT_VERSION} key"),
            ),
        }
    }

    if let Some(system) = system {
        if let Some(key) = open(system.store(), &system.path(COMPUTER_NAME))? {
            info.hostname = get_string(&key, "ComputerName");
        }

        let time_zone_path = system.path(TIME_ZONE);
        if let Some(key) = open(system.store(), &time_zone_path)? {
            info.time_zone = format_time_zone(
                get_string(&key, "TimeZoneKeyName"),
                get_dword(&key, "Bias"),
            );
            info.source_keys.push(format!("SYSTEM\\{time_zone_path}"));
        }
    }

    Ok(info)
}

fn current_version(key: &HiveKey, info: &mut SystemInfo) {
    info.product_name = get_string(key, "ProductName");
    info.edition_id = get_string(key, "EditionID");
    info.display_version = get_string(key, "DisplayVersion");
    info.os_build = get_string(key, "CurrentBuildNumber").map(|build| {
        match get_dword(key, "UBR") {
            Some(ubr) => format!("{build}.{ubr}"),
            None => build,
        }
    });
    info.build_lab = get_string(key, "BuildLabEx");
    info.system_root = get_string(key, "SystemRoot");
    info.registered_owner = get_string(key, "RegisteredOwner");
    info.registered_organization = get_string(key, "RegisteredOrganization");
    info.product_id = get_string(key, "ProductId");
    // Unsigned DWORD, read without a signed reinterpretation
    if let Some(install) = get_dword(key, "InstallDate") {
        info.install_date = decode_unixepoch(i64::from(install));
    }
}

/// Render the time zone as `Name (UTC+HH:MM)`. `Bias` is the signed number of minutes to add to local time to get UTC
pub(crate) fn format_time_zone(name: Option<String>, bias: Option<u32>) -> Option<String> {
    let bias = match bias {
        Some(result) => i64::from(result as i32),
        None => return name,
    };

    let offset = -bias;
    let sign = if offset >= 0 { '+' } else { '-' };
    let minutes_per_hour = 60;
    let utc = format!(
        "UTC{sign}{:02}:{:02}",
        offset.abs() / minutes_per_hour,
        offset.abs() % minutes_per_hour
    );

    match name {
        Some(name) => Some(format!("{name} ({utc})")),
        None => Some(utc),
    }
}

fn open(store: &dyn HiveStore, path: &str) -> Result<Option<HiveKey>, SystemInfoError> {
    match store.open_key(path) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[systeminfo] Could not open {path}: {err:?}");
            Err(SystemInfoError::ReadHive)
        }
    }
}
