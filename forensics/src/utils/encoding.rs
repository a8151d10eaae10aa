use base64::{DecodeError, Engine, engine::general_purpose};

/// Base64 decode data use the STANDARD engine (alphabet along with "+" and "/")
pub(crate) fn base64_decode_standard(data: &str) -> Result<Vec<u8>, DecodeError> {
    general_purpose::STANDARD.decode(data)
}

/// Format a hardware address as colon separated uppercase octets. Anything but six bytes is "N/A"
pub(crate) fn format_mac(data: &[u8]) -> String {
    let mac_size = 6;
    if data.len() != mac_size {
        return String::from("N/A");
    }

    data.iter()
        .map(|octet| format!("{octet:02X}"))
        .collect::<Vec<String>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::{base64_decode_standard, format_mac};

    #[test]
    fn test_base64_decode_standard() {
        let test = "SGVsbG8gd29yZCE=";
        let result = base64_decode_standard(test).unwrap();
        assert_eq!(result, b"Hello word!")
    }

    #[test]
    fn test_format_mac() {
        let test = [0x00, 0x1A, 0x2B, 0x3C, 0x4D, 0x5E];
        assert_eq!(format_mac(&test), "00:1A:2B:3C:4D:5E");
        assert_eq!(format_mac(&test[..5]), "N/A");
        assert_eq!(format_mac(&[]), "N/A");
    }
}
