use super::{error::StorageError, usb::read_subkeys};
use crate::hive::{
    controlset::SystemHive,
    helper::{get_string, key_time},
    store::HiveStore,
};
use common::windows::{DiskRecord, PortableDeviceRecord};

pub(crate) const PORTABLE_DEVICES: &str = "Microsoft\\Windows Portable Devices\\Devices";

/// Disks enumerated under `Enum\SCSI`. The class name stands in for a missing FriendlyName
pub(crate) fn grab_disks(system: &SystemHive) -> Result<Vec<DiskRecord>, StorageError> {
    let mut disks = Vec::new();
    for device_class in read_subkeys(system.store(), &system.path("Enum\\SCSI"))? {
        for instance in read_subkeys(system.store(), &device_class.path)? {
            disks.push(DiskRecord {
                description: get_string(&instance, "FriendlyName")
                    .unwrap_or_else(|| device_class.name.clone()),
                first_installed: key_time(&instance),
            });
        }
    }
    Ok(disks)
}

/// MTP/PTP devices (phones, cameras) from the SOFTWARE hive
pub(crate) fn grab_portable_devices(
    software: &dyn HiveStore,
) -> Result<Vec<PortableDeviceRecord>, StorageError> {
    let devices = read_subkeys(software, PORTABLE_DEVICES)?
        .iter()
        .map(|device| PortableDeviceRecord {
            friendly_name: get_string(device, "FriendlyName"),
            manufacturer: get_string(device, "Manufacturer"),
            last_connected: key_time(device),
        })
        .collect();
    Ok(devices)
}
