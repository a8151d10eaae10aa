use super::error::NetworkError;
use crate::{
    hive::{
        helper::{get_binary, get_string, join_path},
        store::{HiveKey, HiveStore},
    },
    utils::{diagnostics::Diagnostics, encoding::format_mac, time::decode_systemtime},
};
use common::{
    time::{TemporalValue, TimeEncoding},
    windows::{NetworkProfileRecord, SignatureNamespace},
};
use log::error;
use std::collections::HashMap;

const NETWORK_LIST: &str = "Microsoft\\Windows NT\\CurrentVersion\\NetworkList";

struct ProfileMetadata {
    name: Option<String>,
    description: Option<String>,
    first_connected: TemporalValue,
    last_connected: TemporalValue,
}

/// Join profile metadata with the connection signatures that reference it.
/// Managed signatures are scanned before unmanaged ones. Profiles without a signature are not returned
pub(crate) fn grab_network_profiles(
    software: &dyn HiveStore,
    diag: &mut Diagnostics,
) -> Result<Vec<NetworkProfileRecord>, NetworkError> {
    let mut metadata = HashMap::new();
    for profile in read_subkeys(software, &join_path(NETWORK_LIST, "Profiles"))? {
        metadata.insert(profile.name.to_uppercase(), profile_metadata(&profile));
    }
    if metadata.is_empty() {
        return Ok(Vec::new());
    }

    let namespaces = [
        (SignatureNamespace::Managed, "Signatures\\Managed"),
        (SignatureNamespace::Unmanaged, "Signatures\\Unmanaged"),
    ];

    let mut records = Vec::new();
    for (namespace, relative) in namespaces {
        for signature in read_subkeys(software, &join_path(NETWORK_LIST, relative))? {
            let guid = match get_string(&signature, "ProfileGuid") {
                Some(result) => result.to_uppercase(),
                None => {
                    diag.warning(
                        "network",
                        format!("Signature {} has no ProfileGuid", signature.path),
                    );
                    continue;
                }
            };
            let profile = match metadata.get(&guid) {
                Some(result) => result,
                None => continue,
            };

            records.push(NetworkProfileRecord {
                profile_guid: guid,
                name: profile.name.clone(),
                description: profile.description.clone(),
                first_connected: profile.first_connected,
                last_connected: profile.last_connected,
                gateway_mac: get_binary(&signature, "DefaultGatewayMac").map(format_mac),
                dns_suffix: get_string(&signature, "DnsSuffix"),
                namespace,
            });
        }
    }
    Ok(records)
}

fn profile_metadata(profile: &HiveKey) -> ProfileMetadata {
    let systemtime = |name: &str| match get_binary(profile, name) {
        Some(data) => decode_systemtime(data),
        None => TemporalValue::absent(TimeEncoding::Systemtime),
    };

    ProfileMetadata {
        name: get_string(profile, "ProfileName"),
        description: get_string(profile, "Description"),
        first_connected: systemtime("DateCreated"),
        last_connected: systemtime("DateLastConnected"),
    }
}

fn read_subkeys(software: &dyn HiveStore, path: &str) -> Result<Vec<HiveKey>, NetworkError> {
    match software.subkeys(path) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[network] Could not list {path}: {err:?}");
            Err(NetworkError::ReadHive)
        }
    }
}
