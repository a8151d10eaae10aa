/**
 * `ShellItems` are size prefixed chunks describing a location in the Windows Shell.
 * `OpenSavePidlMRU` stores a list of them for every file picked in a common dialog.
 * Only volume and file entry items carry a path segment, everything else is skipped
 *
 * References:
 *   `https://github.com/libyal/libfwsi/blob/main/documentation/Windows%20Shell%20Item%20format.asciidoc`
 */
use super::error::ShellItemError;
use crate::utils::{
    nom_helper::{Endian, nom_unsigned_two_bytes},
    strings::{extract_utf8_string, extract_utf16_string},
};
use log::warn;

/// Marker returned when the item list is structurally broken
pub(crate) const PARSING_ERROR: &str = "Parsing Error";

const CLASS_MASK: u8 = 0x70;
const VOLUME_CLASS: u8 = 0x20;
const FILE_ENTRY_CLASS: u8 = 0x30;
const UNICODE_FLAG: u8 = 0x04;

const TYPE_OFFSET: usize = 2;
const VOLUME_NAME_OFFSET: usize = 3;
const FILE_ENTRY_NAME_OFFSET: usize = 14;

/// Decode a `ShellItem` list into a backslash separated path
pub(crate) fn parse_shellitem_path(data: &[u8]) -> String {
    match get_shellitems(data) {
        Ok(segments) => segments.join("\\"),
        Err(err) => {
            warn!("[shellitems] Could not parse ShellItem list: {err}");
            PARSING_ERROR.to_string()
        }
    }
}

/// Walk the list until a zero size item or the end of the data
fn get_shellitems(data: &[u8]) -> Result<Vec<String>, ShellItemError> {
    let mut segments = Vec::new();
    let mut input = data;

    while !input.is_empty() {
        let (_, item_size) = match nom_unsigned_two_bytes(input, Endian::Le) {
            Ok(result) => result,
            Err(_err) => return Err(ShellItemError::ItemSize),
        };
        if item_size == 0 {
            break;
        }

        // Size includes the size field itself
        let size = usize::from(item_size);
        if size <= TYPE_OFFSET || size > input.len() {
            return Err(ShellItemError::ItemSize);
        }
        let (item, remaining) = input.split_at(size);
        if let Some(segment) = item_segment(item)? {
            segments.push(segment);
        }
        input = remaining;
    }
    Ok(segments)
}

/// Get the path segment for one item. Unsupported item types return nothing
fn item_segment(item: &[u8]) -> Result<Option<String>, ShellItemError> {
    let item_type = item[TYPE_OFFSET];

    match item_type & CLASS_MASK {
        VOLUME_CLASS => {
            let text = item
                .get(VOLUME_NAME_OFFSET..)
                .ok_or(ShellItemError::TextOffset)?;
            let drive = extract_utf8_string(text);
            Ok(Some(drive.trim_end_matches('\\').to_string()))
        }
        FILE_ENTRY_CLASS => {
            let text = match item.get(FILE_ENTRY_NAME_OFFSET..) {
                Some(result) if !result.is_empty() => result,
                _ => return Err(ShellItemError::TextOffset),
            };
            if item_type & UNICODE_FLAG == UNICODE_FLAG {
                return Ok(Some(extract_utf16_string(text)));
            }
            Ok(Some(extract_utf8_string(text)))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{PARSING_ERROR, parse_shellitem_path};

    fn item(item_type: u8, body: &[u8]) -> Vec<u8> {
        let size = (body.len() + 3) as u16;
        let mut data = size.to_le_bytes().to_vec();
        data.push(item_type);
        data.extend_from_slice(body);
        data
    }

    fn volume(drive: &str) -> Vec<u8> {
        let mut body = drive.as_bytes().to_vec();
        body.resize(20, 0);
        item(0x2f, &body)
    }

    fn file_entry(name: &str, unicode: bool) -> Vec<u8> {
        // 11 bytes of size, modified time and attributes before the name
        let mut body = vec![0; 11];
        if unicode {
            for unit in name.encode_utf16() {
                body.extend_from_slice(&unit.to_le_bytes());
            }
            body.extend_from_slice(&[0, 0]);
            return item(0x36, &body);
        }
        body.extend_from_slice(name.as_bytes());
        body.push(0);
        item(0x32, &body)
    }

    #[test]
    fn test_parse_shellitem_path() {
        let root = item(0x1f, &[0x50; 17]);
        let data = [
            root,
            volume("C:\\"),
            file_entry("Users", false),
            file_entry("résumé.docx", true),
            vec![0, 0],
        ]
        .concat();
        assert_eq!(parse_shellitem_path(&data), "C:\\Users\\résumé.docx");
    }

    #[test]
    fn test_stops_at_zero_size() {
        let data = [file_entry("report.pdf", false), vec![0, 0], vec![0xff; 6]].concat();
        assert_eq!(parse_shellitem_path(&data), "report.pdf");
        assert_eq!(parse_shellitem_path(&[]), "");
    }

    #[test]
    fn test_structural_errors() {
        let mut past_end = file_entry("a.txt", false);
        past_end[0] += 10;
        assert_eq!(parse_shellitem_path(&past_end), PARSING_ERROR);

        assert_eq!(parse_shellitem_path(&[2, 0, 0x32]), PARSING_ERROR);
        assert_eq!(parse_shellitem_path(&[7]), PARSING_ERROR);

        let short_entry = item(0x31, &[0; 4]);
        assert_eq!(parse_shellitem_path(&short_entry), PARSING_ERROR);
    }
}
