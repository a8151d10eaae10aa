use super::{
    devices::{grab_disks, grab_portable_devices},
    error::StorageError,
    usb::{UsbIndex, grab_usb_storage},
};
use crate::{
    hive::{controlset::SystemHive, store::HiveStore},
    utils::diagnostics::Diagnostics,
};
use common::windows::StorageInfo;

/// Disks, USB storage and portable devices. SOFTWARE is only needed for portable devices
pub(crate) fn grab_storage(
    system: &SystemHive,
    software: Option<&dyn HiveStore>,
    diag: &mut Diagnostics,
) -> Result<StorageInfo, StorageError> {
    let disks = grab_disks(system)?;

    let index = UsbIndex::build(system)?;
    let usb_storage = grab_usb_storage(system, &index, diag)?;

    let portable_devices = match software {
        Some(store) => match grab_portable_devices(store) {
            Ok(result) => result,
            Err(err) => {
                diag.warning("storage", format!("Could not read portable devices: {err}"));
                Vec::new()
            }
        },
        None => {
            diag.info(
                "storage",
                String::from("SOFTWARE hive not found, skipping portable devices"),
            );
            Vec::new()
        }
    };

    Ok(StorageInfo {
        disks,
        usb_storage,
        portable_devices,
    })
}
