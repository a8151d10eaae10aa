/**
 * Common dialog history. Every extension subkey of `OpenSavePidlMRU` holds numbered `ShellItem` lists
 * and a `MRUListEx` value ordering them from most to least recent
 */
use super::error::ActivityError;
use crate::{
    artifacts::os::windows::shellitems::items::parse_shellitem_path,
    hive::{
        helper::get_binary,
        store::{HiveKey, HiveStore, ValueData},
    },
    utils::nom_helper::{Endian, nom_unsigned_four_bytes},
};
use common::windows::OpenSaveEntry;
use log::error;

const OPEN_SAVE_MRU: &str =
    "Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\ComDlg32\\OpenSavePidlMRU";

/// Files opened or saved through a common dialog, grouped by extension
pub(crate) fn grab_open_save(ntuser: &dyn HiveStore) -> Result<Vec<OpenSaveEntry>, ActivityError> {
    let extensions = match ntuser.subkeys(OPEN_SAVE_MRU) {
        Ok(result) => result,
        Err(err) => {
            error!("[activity] Could not list OpenSavePidlMRU: {err:?}");
            return Err(ActivityError::ReadHive);
        }
    };

    let mut entries = Vec::new();
    for extension in extensions {
        for data in ordered_items(&extension) {
            entries.push(OpenSaveEntry {
                extension: extension.name.clone(),
                path: parse_shellitem_path(data),
            });
        }
    }
    Ok(entries)
}

/// Item lists in `MRUListEx` order. Without a usable `MRUListEx` the value order is kept
fn ordered_items(extension: &HiveKey) -> Vec<&[u8]> {
    if let Some(list) = get_binary(extension, "MRUListEx") {
        let order = mru_list_ex(list);
        if !order.is_empty() {
            return order
                .iter()
                .filter_map(|index| item_data(extension, &index.to_string()))
                .collect();
        }
    }

    extension
        .values
        .iter()
        .filter(|value| !value.name.eq_ignore_ascii_case("MRUListEx"))
        .filter_map(|value| item_data(extension, &value.name))
        .collect()
}

fn item_data<'a>(extension: &'a HiveKey, name: &str) -> Option<&'a [u8]> {
    match &extension.value(name)?.data {
        ValueData::Binary(data) => Some(data),
        _ => None,
    }
}

/// `MRUListEx` is a list of 32 bit indexes ending with 0xffffffff
fn mru_list_ex(data: &[u8]) -> Vec<u32> {
    let end_of_list = 0xffffffff;
    let mut order = Vec::new();
    let mut input = data;
    while let Ok((remaining, index)) = nom_unsigned_four_bytes(input, Endian::Le) {
        if index == end_of_list {
            break;
        }
        order.push(index);
        input = remaining;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::{OPEN_SAVE_MRU, grab_open_save, mru_list_ex};
    use crate::hive::{memory::MemoryHive, store::ValueData};

    /// A single ASCII file entry `ShellItem` followed by the list terminator
    fn file_item(name: &str) -> Vec<u8> {
        let mut body = vec![0; 11];
        body.extend_from_slice(name.as_bytes());
        body.push(0);
        let size = (body.len() + 3) as u16;

        let mut data = size.to_le_bytes().to_vec();
        data.push(0x32);
        data.extend_from_slice(&body);
        data.extend_from_slice(&[0, 0]);
        data
    }

    fn mru_list(order: &[u32]) -> ValueData {
        let mut data: Vec<u8> = order.iter().flat_map(|index| index.to_le_bytes()).collect();
        data.extend_from_slice(&0xffffffffu32.to_le_bytes());
        ValueData::Binary(data)
    }

    #[test]
    fn test_grab_open_save() {
        let docx = format!("{OPEN_SAVE_MRU}\\docx");
        let all = format!("{OPEN_SAVE_MRU}\\*");
        let mut hive = MemoryHive::new();
        hive.add_value(&docx, "0", ValueData::Binary(file_item("old.docx")))
            .add_value(&docx, "1", ValueData::Binary(file_item("new.docx")))
            .add_value(&docx, "MRUListEx", mru_list(&[1, 0]))
            .add_value(&all, "0", ValueData::Binary(vec![40, 0, 0x32]))
            .add_value(&all, "MRUListEx", ValueData::Binary(vec![0xff; 4]));

        let entries = grab_open_save(&hive).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].extension, "docx");
        assert_eq!(entries[0].path, "new.docx");
        assert_eq!(entries[1].path, "old.docx");
        assert_eq!(entries[2].extension, "*");
        assert_eq!(entries[2].path, "Parsing Error");
    }

    #[test]
    fn test_mru_list_ex() {
        assert_eq!(mru_list_ex(&[2, 0, 0, 0, 0, 0, 0, 0, 255, 255, 255, 255]), vec![2, 0]);
        assert!(mru_list_ex(&[]).is_empty());
        assert_eq!(mru_list_ex(&[1, 0, 0, 0, 9]), vec![1]);
    }
}
