use super::error::NetworkError;
use crate::{
    hive::{
        controlset::SystemHive,
        helper::{get_dword, get_multi_string, get_qword, get_string, join_path, normalize_multi_value},
        store::{HiveKey, ValueData},
    },
    utils::{diagnostics::Diagnostics, time::decode_unixepoch},
};
use common::{
    time::{TemporalValue, TimeEncoding},
    windows::{Ipv4Config, Ipv6Config, NetworkGlobals, NetworkInterfaceRecord},
};
use log::error;
use std::{collections::BTreeSet, net::Ipv6Addr};

/// Device class of network adapters
const ADAPTER_CLASS: &str = "Control\\Class\\{4d36e972-e325-11ce-bfc1-08002be10318}";
const TCPIP_PARAMETERS: &str = "Services\\Tcpip\\Parameters";
const TCPIP_INTERFACES: &str = "Services\\Tcpip\\Parameters\\Interfaces";
const TCPIP6_INTERFACES: &str = "Services\\Tcpip6\\Parameters\\Interfaces";

/// Hostname and domain from the Tcpip parameters
pub(crate) fn grab_globals(system: &SystemHive) -> Result<NetworkGlobals, NetworkError> {
    let params = open(system, TCPIP_PARAMETERS)?;
    Ok(NetworkGlobals {
        hostname: params.as_ref().and_then(|key| get_string(key, "Hostname")),
        domain: params.as_ref().and_then(|key| get_string(key, "Domain")),
    })
}

/// Join every adapter in the network class with its Tcpip and Tcpip6 interface keys
pub(crate) fn grab_interfaces(
    system: &SystemHive,
    diag: &mut Diagnostics,
) -> Result<Vec<NetworkInterfaceRecord>, NetworkError> {
    let adapters = match system.subkeys(ADAPTER_CLASS) {
        Ok(result) => result,
        Err(err) => {
            error!("[network] Could not list network adapters: {err:?}");
            return Err(NetworkError::ReadHive);
        }
    };
    if adapters.is_empty() {
        diag.info("network", String::from("No network adapter class entries found"));
    }

    let mut interfaces = Vec::new();
    for adapter in adapters {
        let instance_guid = match get_string(&adapter, "NetCfgInstanceId") {
            Some(result) => result,
            None => continue,
        };
        let description =
            get_string(&adapter, "DriverDesc").unwrap_or_else(|| String::from("Unknown Interface"));

        let ipv4 = match open(system, &join_path(TCPIP_INTERFACES, &instance_guid))? {
            Some(key) => read_ipv4(&key),
            None => empty_ipv4(),
        };
        let ipv6 = match open(system, &join_path(TCPIP6_INTERFACES, &instance_guid))? {
            Some(key) => read_ipv6(&key),
            None => Ipv6Config::default(),
        };

        interfaces.push(NetworkInterfaceRecord::new(description, instance_guid, ipv4, ipv6));
    }
    Ok(interfaces)
}

fn open(system: &SystemHive, relative: &str) -> Result<Option<HiveKey>, NetworkError> {
    match system.open_key(relative) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[network] Could not open {relative}: {err:?}");
            Err(NetworkError::ReadHive)
        }
    }
}

fn empty_ipv4() -> Ipv4Config {
    Ipv4Config {
        dhcp_enabled: false,
        addresses: Vec::new(),
        subnet_masks: Vec::new(),
        gateways: Vec::new(),
        dns_servers: Vec::new(),
        lease_obtained: TemporalValue::absent(TimeEncoding::Unixepoch),
        lease_expires: TemporalValue::absent(TimeEncoding::Unixepoch),
    }
}

/// DHCP interfaces keep their current lease in the `Dhcp*` values
fn read_ipv4(key: &HiveKey) -> Ipv4Config {
    let dhcp_enabled = get_dword(key, "EnableDHCP") == Some(1);
    let pick = |dhcp: &str, fixed: &str| {
        if dhcp_enabled {
            get_multi_string(key, dhcp)
        } else {
            get_multi_string(key, fixed)
        }
    };

    Ipv4Config {
        dhcp_enabled,
        addresses: pick("DhcpIPAddress", "IPAddress"),
        subnet_masks: pick("DhcpSubnetMask", "SubnetMask"),
        gateways: pick("DhcpDefaultGateway", "DefaultGateway"),
        dns_servers: pick("DhcpNameServer", "NameServer"),
        lease_obtained: lease_time(key, "LeaseObtainedTime"),
        lease_expires: lease_time(key, "LeaseTerminatesTime"),
    }
}

/// Lease times are unsigned DWORDs. They are not reinterpreted as signed, so values past 2038 decode as invalid
fn lease_time(key: &HiveKey, name: &str) -> TemporalValue {
    match get_qword(key, name) {
        Some(seconds) => decode_unixepoch(i64::try_from(seconds).unwrap_or(i64::MAX)),
        None => TemporalValue::absent(TimeEncoding::Unixepoch),
    }
}

/// IPv6 addresses may be text or packed 16 byte binary. Duplicates are dropped and the list is sorted
fn read_ipv6(key: &HiveKey) -> Ipv6Config {
    let mut addresses = BTreeSet::new();
    if let Some(value) = key.value("IPAddress") {
        match &value.data {
            ValueData::Binary(data) => addresses.extend(decode_ipv6_binary(data)),
            other => addresses.extend(normalize_multi_value(other)),
        }
    }

    Ipv6Config {
        addresses: addresses.into_iter().collect(),
        gateways: get_multi_string(key, "Dhcpv6DefaultGateway"),
    }
}

/// Split packed 16 byte addresses. A trailing partial address is ignored
pub(crate) fn decode_ipv6_binary(data: &[u8]) -> Vec<String> {
    let address_size = 16;
    data.chunks_exact(address_size)
        .filter_map(|chunk| <[u8; 16]>::try_from(chunk).ok())
        .map(|octets| Ipv6Addr::from(octets).to_string())
        .collect()
}
