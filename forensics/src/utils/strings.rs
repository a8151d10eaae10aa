/// Decode UTF16LE bytes up to the first null character. Invalid sequences are replaced
pub(crate) fn extract_utf16_string(data: &[u8]) -> String {
    let utf16_data: Vec<u16> = data
        .chunks_exact(2)
        .map(|wide_char| u16::from_le_bytes([wide_char[0], wide_char[1]]))
        .take_while(|wide_char| *wide_char != 0)
        .collect();

    String::from_utf16_lossy(&utf16_data)
}

/// Decode every UTF16LE character in the provided bytes, embedded nulls included. A trailing odd byte is dropped
pub(crate) fn decode_utf16_lossy(data: &[u8]) -> String {
    let utf16_data: Vec<u16> = data
        .chunks_exact(2)
        .map(|wide_char| u16::from_le_bytes([wide_char[0], wide_char[1]]))
        .collect();

    String::from_utf16_lossy(&utf16_data)
}

/// Decode single byte text up to the first null byte
pub(crate) fn extract_utf8_string(data: &[u8]) -> String {
    let end = data.iter().position(|byte| *byte == 0).unwrap_or(data.len());
    String::from_utf8_lossy(&data[..end]).to_string()
}

#[cfg(test)]
mod tests {
    use super::{decode_utf16_lossy, extract_utf16_string, extract_utf8_string};

    #[test]
    fn test_extract_utf16_string() {
        let test = [65, 0, 100, 0, 109, 0, 0, 0, 66, 0];
        assert_eq!(extract_utf16_string(&test), "Adm");
    }

    #[test]
    fn test_decode_utf16_lossy() {
        let test = [65, 0, 100, 0, 109, 0, 0xd8];
        assert_eq!(decode_utf16_lossy(&test), "Adm");

        let lone_surrogate = [0x00, 0xd8, 65, 0];
        assert_eq!(decode_utf16_lossy(&lone_surrogate), "\u{FFFD}A");
    }

    #[test]
    fn test_extract_utf8_string() {
        let test = b"C:\\\0junk";
        assert_eq!(extract_utf8_string(test), "C:\\");
        assert_eq!(extract_utf8_string(b"Temp"), "Temp");
    }
}
