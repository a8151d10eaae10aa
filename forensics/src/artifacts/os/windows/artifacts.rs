use super::{
    accounts::{hashes::CredentialSource, parser::grab_accounts},
    activity::parser::grab_activity,
    error::ReportError,
    network::parser::grab_network,
    profiles::parser::grab_profiles,
    storage::parser::grab_storage,
    systeminfo::info::grab_system_info,
};
use crate::{
    artifacts::collection::ReportData,
    hive::{
        controlset::SystemHive,
        locate::{HiveKind, ImageHives},
        store::HiveStore,
    },
    utils::diagnostics::Diagnostics,
};
use log::error;
use serde::Serialize;
use std::collections::HashMap;

/// Operating system details. Runs when either SOFTWARE or SYSTEM exists
pub(crate) fn system(hives: &ImageHives) -> Result<ReportData, ReportError> {
    let mut diag = Diagnostics::new();
    let software = open_hive(hives, HiveKind::Software)?;
    let system = optional_system(hives, &mut diag)?;
    if software.is_none() && system.is_none() {
        error!("[regalyzer] System report needs SOFTWARE or SYSTEM");
        return Err(ReportError::MissingHive);
    }

    let info = match grab_system_info(software.as_deref(), system.as_ref(), &mut diag) {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Failed to parse system information: {err:?}");
            return Err(ReportError::SystemInfo);
        }
    };
    report_data("system", &info, 1, diag)
}

/// Interfaces and network profiles. SYSTEM is required
pub(crate) fn network(hives: &ImageHives) -> Result<ReportData, ReportError> {
    let mut diag = Diagnostics::new();
    let system = required_system(hives)?;
    let software = open_hive(hives, HiveKind::Software)?;

    let info = match grab_network(&system, software.as_deref(), &mut diag) {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Failed to parse network configuration: {err:?}");
            return Err(ReportError::Network);
        }
    };
    let count = info.interfaces.len() + info.profiles.len();
    report_data("network", &info, count, diag)
}

/// Disks, USB storage and portable devices. SYSTEM is required
pub(crate) fn storage(hives: &ImageHives) -> Result<ReportData, ReportError> {
    let mut diag = Diagnostics::new();
    let system = required_system(hives)?;
    let software = open_hive(hives, HiveKind::Software)?;

    let info = match grab_storage(&system, software.as_deref(), &mut diag) {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Failed to parse storage devices: {err:?}");
            return Err(ReportError::Storage);
        }
    };
    let count = info.disks.len() + info.usb_storage.len() + info.portable_devices.len();
    report_data("storage", &info, count, diag)
}

/// Local accounts from SAM joined with hashes from the credential source
pub(crate) fn accounts(
    hives: &ImageHives,
    credentials: &dyn CredentialSource,
) -> Result<ReportData, ReportError> {
    let mut diag = Diagnostics::new();
    let sam = match open_hive(hives, HiveKind::Sam)? {
        Some(result) => result,
        None => {
            error!("[regalyzer] Accounts report needs SAM");
            return Err(ReportError::MissingHive);
        }
    };
    let system = open_hive(hives, HiveKind::System)?;

    let hashes = match credentials.hashes(sam.as_ref(), system.as_deref()) {
        Ok(result) => result,
        Err(err) => {
            diag.warning("accounts", format!("No credential hashes available: {err}"));
            HashMap::new()
        }
    };

    let records = match grab_accounts(sam.as_ref(), &hashes, &mut diag) {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Failed to parse local accounts: {err:?}");
            return Err(ReportError::Accounts);
        }
    };
    report_data("accounts", &records, records.len(), diag)
}

/// Per user activity. SOFTWARE is required to find the user profiles, SYSTEM is optional
pub(crate) fn activity(hives: &ImageHives) -> Result<ReportData, ReportError> {
    let mut diag = Diagnostics::new();
    let software = match open_hive(hives, HiveKind::Software)? {
        Some(result) => result,
        None => {
            error!("[regalyzer] Activity report needs SOFTWARE");
            return Err(ReportError::MissingHive);
        }
    };
    let system = optional_system(hives, &mut diag)?;

    let profiles = match grab_profiles(software.as_ref(), hives.root()) {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Failed to resolve user profiles: {err:?}");
            return Err(ReportError::Profiles);
        }
    };

    let info = match grab_activity(&profiles, system.as_ref(), &mut diag) {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Failed to parse user activity: {err:?}");
            return Err(ReportError::Activity);
        }
    };
    let count = info.users.len() + info.bam.len();
    report_data("activity", &info, count, diag)
}

fn open_hive(
    hives: &ImageHives,
    kind: HiveKind,
) -> Result<Option<Box<dyn HiveStore>>, ReportError> {
    match hives.open(kind) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[regalyzer] Could not open {}: {err:?}", kind.file_name());
            Err(ReportError::OpenHive)
        }
    }
}

/// SYSTEM with its control set. A missing hive is an error
fn required_system(hives: &ImageHives) -> Result<SystemHive, ReportError> {
    let store = match open_hive(hives, HiveKind::System)? {
        Some(result) => result,
        None => {
            error!("[regalyzer] Report needs SYSTEM");
            return Err(ReportError::MissingHive);
        }
    };
    match SystemHive::open(store) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[regalyzer] Could not resolve control set: {err:?}");
            Err(ReportError::ControlSet)
        }
    }
}

/// SYSTEM when present. An unusable control set is recorded and the hive is skipped
fn optional_system(
    hives: &ImageHives,
    diag: &mut Diagnostics,
) -> Result<Option<SystemHive>, ReportError> {
    let store = match open_hive(hives, HiveKind::System)? {
        Some(result) => result,
        None => return Ok(None),
    };
    match SystemHive::open(store) {
        Ok(result) => Ok(Some(result)),
        Err(err) => {
            diag.error("regalyzer", format!("Skipping SYSTEM hive: {err}"));
            Ok(None)
        }
    }
}

fn report_data<T: Serialize>(
    name: &str,
    records: &T,
    record_count: usize,
    diag: Diagnostics,
) -> Result<ReportData, ReportError> {
    let records = match serde_json::to_value(records) {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Failed to serialize {name}: {err:?}");
            return Err(ReportError::Serialize);
        }
    };

    Ok(ReportData {
        name: name.to_string(),
        record_count,
        records,
        diagnostics: diag.into_events(),
    })
}
