use super::{
    error::NetworkError,
    interfaces::{grab_globals, grab_interfaces},
    profiles::grab_network_profiles,
};
use crate::{
    hive::{controlset::SystemHive, store::HiveStore},
    utils::diagnostics::Diagnostics,
};
use common::windows::NetworkInfo;

/// Interfaces come from SYSTEM. Profiles need SOFTWARE and are skipped without it
pub(crate) fn grab_network(
    system: &SystemHive,
    software: Option<&dyn HiveStore>,
    diag: &mut Diagnostics,
) -> Result<NetworkInfo, NetworkError> {
    let globals = grab_globals(system)?;
    let interfaces = grab_interfaces(system, diag)?;

    let profiles = match software {
        Some(store) => match grab_network_profiles(store, diag) {
            Ok(result) => result,
            Err(err) => {
                diag.warning("network", format!("Could not read network profiles: {err}"));
                Vec::new()
            }
        },
        None => {
            diag.info(
                "network",
                String::from("SOFTWARE hive not found, skipping network profiles"),
            );
            Vec::new()
        }
    };

    Ok(NetworkInfo {
        globals,
        interfaces,
        profiles,
    })
}

#[cfg(test)]
mod tests {
    use super::grab_network;
    use crate::{
        hive::{controlset::SystemHive, memory::MemoryHive, store::ValueData},
        utils::diagnostics::Diagnostics,
    };

    #[test]
    fn test_grab_network() {
        let mut system = MemoryHive::new();
        system
            .add_value("Select", "Current", ValueData::Dword(2))
            .add_value(
                "ControlSet002\\Services\\Tcpip\\Parameters",
                "Hostname",
                ValueData::String(String::from("WORKSTATION")),
            );
        let system = SystemHive::open(Box::new(system)).unwrap();
        let software = MemoryHive::new();

        let mut diag = Diagnostics::new();
        let network = grab_network(&system, Some(&software), &mut diag).unwrap();
        assert_eq!(network.globals.hostname.as_deref(), Some("WORKSTATION"));
        assert!(network.interfaces.is_empty());
        assert!(network.profiles.is_empty());

        let mut diag = Diagnostics::new();
        let network = grab_network(&system, None, &mut diag).unwrap();
        assert!(network.profiles.is_empty());
        assert!(
            diag.events()
                .iter()
                .any(|event| event.message.contains("skipping network profiles"))
        );
    }
}
