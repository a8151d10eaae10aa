use super::error::StorageError;
use crate::{
    hive::{
        controlset::SystemHive,
        helper::{find_key_with_suffix, get_default_qword, get_multi_string, get_string, key_time},
        store::{HiveKey, HiveStore},
    },
    utils::{diagnostics::Diagnostics, regex_options::create_regex, time::decode_filetime},
};
use common::{
    time::{TemporalValue, TimeEncoding},
    windows::UsbStorageRecord,
};
use log::error;

/// Device property key holding the last removal FILETIME
const LAST_REMOVED_SUFFIX: &str = "0067";

/// Enumeration data for one USB instance. Only used to enrich storage devices
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UsbDeviceDescriptor {
    pub(crate) vendor_id: String,
    pub(crate) product_id: String,
    pub(crate) last_connected: TemporalValue,
    pub(crate) hardware_ids: Vec<String>,
}

/// `Enum\USB` instances keyed by instance name, kept in enumeration order
#[derive(Debug, Default)]
pub(crate) struct UsbIndex {
    entries: Vec<(String, UsbDeviceDescriptor)>,
}

impl UsbIndex {
    /// Index every `VID_xxxx&PID_xxxx\<instance>` key. A missing `Enum\USB` is an empty index
    pub(crate) fn build(system: &SystemHive) -> Result<UsbIndex, StorageError> {
        let vid_pid = match create_regex(r"VID_([^&]+)&PID_([^&]+)") {
            Ok(result) => result,
            Err(_) => return Err(StorageError::Regex),
        };

        let mut index = UsbIndex::default();
        for device_key in read_subkeys(system.store(), &system.path("Enum\\USB"))? {
            let (vendor_id, product_id) = match vid_pid.captures(&device_key.name) {
                Some(hits) => (hits[1].to_string(), hits[2].to_string()),
                None => continue,
            };

            for instance in read_subkeys(system.store(), &device_key.path)? {
                let descriptor = UsbDeviceDescriptor {
                    vendor_id: vendor_id.clone(),
                    product_id: product_id.clone(),
                    last_connected: key_time(&instance),
                    hardware_ids: get_multi_string(&instance, "HardwareID"),
                };
                index.insert(&instance.name, descriptor);
            }
        }
        Ok(index)
    }

    pub(crate) fn insert(&mut self, instance: &str, descriptor: UsbDeviceDescriptor) {
        self.entries.push((instance.to_string(), descriptor));
    }

    /// First instance whose name starts with the short serial
    pub(crate) fn lookup(&self, serial_short: &str) -> Option<&UsbDeviceDescriptor> {
        if serial_short.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(instance, _)| instance.starts_with(serial_short))
            .map(|(_, descriptor)| descriptor)
    }

    /// Number of enumeration entries sharing the prefix. More than one means the join is ambiguous
    pub(crate) fn match_count(&self, serial_short: &str) -> usize {
        if serial_short.is_empty() {
            return 0;
        }
        self.entries
            .iter()
            .filter(|(instance, _)| instance.starts_with(serial_short))
            .count()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Serial number up to the first `&`
pub(crate) fn short_serial(serial: &str) -> &str {
    serial.split('&').next().unwrap_or_default()
}

/// Walk `Enum\USBSTOR` and join each device against the USB index
pub(crate) fn grab_usb_storage(
    system: &SystemHive,
    index: &UsbIndex,
    diag: &mut Diagnostics,
) -> Result<Vec<UsbStorageRecord>, StorageError> {
    let usbstor_path = system.path("Enum\\USBSTOR");
    let classes = read_subkeys(system.store(), &usbstor_path)?;
    if classes.is_empty() {
        diag.info("usb", format!("No USB storage devices under {usbstor_path}"));
    }

    let mut records = Vec::new();
    for device_class in classes {
        for serial_key in read_subkeys(system.store(), &device_class.path)? {
            let serial_short = short_serial(&serial_key.name);
            if index.match_count(serial_short) > 1 {
                diag.warning(
                    "usb",
                    format!("Serial {serial_short} matches more than one USB device, using the first"),
                );
            }
            let last_removed = last_removed(system.store(), &serial_key, diag);
            records.push(build_usb_record(
                &device_class.name,
                &serial_key,
                index,
                last_removed,
            ));
        }
    }
    Ok(records)
}

/// Merge one storage serial key with its enumeration entry, if one exists
pub(crate) fn build_usb_record(
    device_class: &str,
    serial_key: &HiveKey,
    index: &UsbIndex,
    last_removed: TemporalValue,
) -> UsbStorageRecord {
    let serial_short = short_serial(&serial_key.name);
    let first_installed = key_time(serial_key);
    let not_available = String::from("N/A");

    let mut record = UsbStorageRecord {
        device_class: device_class.to_string(),
        friendly_name: get_string(serial_key, "FriendlyName"),
        serial_short: serial_short.to_string(),
        serial_full: serial_key.name.clone(),
        vendor_id: not_available.clone(),
        product_id: not_available,
        hardware_ids: Vec::new(),
        correlated: false,
        first_installed,
        last_connected: TemporalValue::absent(TimeEncoding::Filetime),
        last_removed,
    };

    if let Some(descriptor) = index.lookup(serial_short) {
        record.vendor_id = descriptor.vendor_id.clone();
        record.product_id = descriptor.product_id.clone();
        record.hardware_ids = descriptor.hardware_ids.clone();
        record.last_connected = descriptor.last_connected;
        record.correlated = true;
    }

    record.last_connected = record.last_connected.or(first_installed);
    record
}

fn last_removed(store: &dyn HiveStore, serial_key: &HiveKey, diag: &mut Diagnostics) -> TemporalValue {
    let absent = TemporalValue::absent(TimeEncoding::Filetime);
    let property = match find_key_with_suffix(store, &serial_key.path, LAST_REMOVED_SUFFIX) {
        Ok(Some(result)) => result,
        Ok(None) => return absent,
        Err(err) => {
            diag.warning(
                "usb",
                format!("Could not search {} for removal time: {err}", serial_key.path),
            );
            return absent;
        }
    };

    match get_default_qword(&property) {
        Some(filetime) => decode_filetime(filetime),
        None => absent,
    }
}

pub(crate) fn read_subkeys(store: &dyn HiveStore, path: &str) -> Result<Vec<HiveKey>, StorageError> {
    match store.subkeys(path) {
        Ok(keys) => Ok(keys),
        Err(err) => {
            error!("[usb] Could not list {path}: {err:?}");
            Err(StorageError::ReadHive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{UsbDeviceDescriptor, UsbIndex, build_usb_record, grab_usb_storage, short_serial};
    use crate::{
        hive::{controlset::SystemHive, memory::MemoryHive, store::{HiveStore, ValueData}},
        utils::diagnostics::Diagnostics,
    };
    use chrono::DateTime;
    use common::time::{Moment, TemporalValue, TimeEncoding};

    fn descriptor(vendor_id: &str) -> UsbDeviceDescriptor {
        UsbDeviceDescriptor {
            vendor_id: vendor_id.to_string(),
            product_id: String::from("5583"),
            last_connected: TemporalValue::at(
                DateTime::from_timestamp(1673778600, 0).unwrap(),
                TimeEncoding::Filetime,
            ),
            hardware_ids: vec![String::from("USB\\VID_0781&PID_5583")],
        }
    }

    fn system_fixture() -> MemoryHive {
        let usb = "ControlSet001\\Enum\\USB";
        let usbstor = "ControlSet001\\Enum\\USBSTOR\\Disk&Ven_SanDisk&Prod_Cruzer&Rev_1.00";
        let mut hive = MemoryHive::new();
        hive.add_value("Select", "Current", ValueData::Dword(1))
            .add_key(&format!("{usb}\\ROOT_HUB30\\4&1"), None)
            .add_key(
                &format!("{usb}\\VID_0781&PID_5583\\4C530001230101116384"),
                DateTime::from_timestamp(1673778600, 0),
            )
            .add_value(
                &format!("{usb}\\VID_0781&PID_5583\\4C530001230101116384"),
                "HardwareID",
                ValueData::MultiString(vec![
                    String::from("USB\\VID_0781&PID_5583&REV_0100"),
                    String::new(),
                    String::from("USB\\VID_0781&PID_5583"),
                ]),
            )
            .add_key(
                &format!("{usbstor}\\4C530001230101116384&0"),
                DateTime::from_timestamp(1673700000, 0),
            )
            .add_value(
                &format!("{usbstor}\\4C530001230101116384&0"),
                "FriendlyName",
                ValueData::String(String::from("SanDisk Cruzer USB Device")),
            )
            .add_value(
                &format!("{usbstor}\\4C530001230101116384&0\\Properties\\{{83da6326-97a6-4088-9453-a1923f573b29}}\\0067"),
                "",
                ValueData::Binary(132223325760000000u64.to_le_bytes().to_vec()),
            )
            .add_key(
                &format!("{usbstor}\\AA11BB22&0"),
                DateTime::from_timestamp(1673600000, 0),
            );
        hive
    }

    #[test]
    fn test_short_serial() {
        assert_eq!(short_serial("5&1a2b3c4d&0&5C0000000000"), "5");
        assert_eq!(short_serial("4C530001230101116384&0"), "4C530001230101116384");
        assert_eq!(short_serial("NOAMP"), "NOAMP");
        assert_eq!(short_serial(""), "");
    }

    #[test]
    fn test_prefix_correlation() {
        let mut index = UsbIndex::default();
        index.insert("5&1a2b3c4d&0", descriptor("0781"));

        let mut hive = MemoryHive::new();
        hive.add_key("USBSTOR\\Disk\\5&1a2b3c4d&0&5C0000000000", None);
        let serial_key = hive
            .open_key("USBSTOR\\Disk\\5&1a2b3c4d&0&5C0000000000")
            .unwrap()
            .unwrap();

        let record = build_usb_record(
            "Disk",
            &serial_key,
            &index,
            TemporalValue::absent(TimeEncoding::Filetime),
        );
        assert!(record.correlated);
        assert_eq!(record.vendor_id, "0781");
        assert_eq!(record.product_id, "5583");
        assert_eq!(record.last_connected.to_string(), "2023-01-15 10:30:00");
    }

    #[test]
    fn test_first_match_wins() {
        let mut index = UsbIndex::default();
        index.insert("ABC123", descriptor("1111"));
        index.insert("ABC1234", descriptor("2222"));
        assert_eq!(index.lookup("ABC").unwrap().vendor_id, "1111");
        assert_eq!(index.match_count("ABC"), 2);
        assert_eq!(index.match_count("ABC1234"), 1);
        assert_eq!(index.match_count(""), 0);
        assert!(index.lookup("").is_none());
        assert!(index.lookup("XYZ").is_none());
    }

    #[test]
    fn test_grab_usb_storage() {
        let system = SystemHive::open(Box::new(system_fixture())).unwrap();
        let index = UsbIndex::build(&system).unwrap();
        assert_eq!(index.len(), 1);

        let mut diag = Diagnostics::new();
        let records = grab_usb_storage(&system, &index, &mut diag).unwrap();
        assert_eq!(records.len(), 2);

        let cruzer = &records[0];
        assert!(cruzer.correlated);
        assert_eq!(cruzer.device_class, "Disk&Ven_SanDisk&Prod_Cruzer&Rev_1.00");
        assert_eq!(cruzer.friendly_name.as_deref(), Some("SanDisk Cruzer USB Device"));
        assert_eq!(cruzer.vendor_id, "0781");
        assert_eq!(cruzer.hardware_ids.len(), 2);
        assert_eq!(cruzer.first_installed.to_string(), "2023-01-14 12:40:00");
        assert_eq!(cruzer.last_connected.to_string(), "2023-01-15 10:30:00");
        assert_eq!(cruzer.last_removed.to_string(), "2020-01-01 06:09:36");

        let unknown = &records[1];
        assert!(!unknown.correlated);
        assert_eq!(unknown.vendor_id, "N/A");
        assert_eq!(unknown.product_id, "N/A");
        assert!(unknown.hardware_ids.is_empty());
        assert_eq!(unknown.last_connected, unknown.first_installed);
        assert_eq!(unknown.last_removed.moment, Moment::Absent);
    }

    #[test]
    fn test_ambiguous_serial() {
        let mut hive = system_fixture();
        hive.add_key(
            "ControlSet001\\Enum\\USB\\VID_1234&PID_0001\\4C530001230101116384_2",
            None,
        );
        let system = SystemHive::open(Box::new(hive)).unwrap();
        let index = UsbIndex::build(&system).unwrap();
        assert_eq!(index.len(), 2);

        let mut diag = Diagnostics::new();
        let records = grab_usb_storage(&system, &index, &mut diag).unwrap();
        assert_eq!(records[0].vendor_id, "0781");
        assert_eq!(diag.events().len(), 1);
    }

    #[test]
    fn test_no_usbstor() {
        let mut hive = MemoryHive::new();
        hive.add_value("Select", "Current", ValueData::Dword(1));
        let system = SystemHive::open(Box::new(hive)).unwrap();
        let index = UsbIndex::build(&system).unwrap();

        let mut diag = Diagnostics::new();
        assert!(grab_usb_storage(&system, &index, &mut diag).unwrap().is_empty());
        assert_eq!(diag.events().len(), 1);
    }
}
