use crate::utils::{
    nom_helper::{Endian, nom_data, nom_unsigned_eight_bytes, nom_unsigned_four_bytes},
    time::decode_filetime,
};
use common::time::TemporalValue;

/// Smallest `UserAssist` value holding the run count and last execution time
pub(crate) const ENTRY_MIN_SIZE: usize = 72;

#[derive(Debug, PartialEq)]
pub(crate) struct UserAssistData {
    pub(crate) count: u32,
    pub(crate) last_execution: TemporalValue,
}

impl UserAssistData {
    /// Parse the `UserAssist` value data. Count is at offset 4 and the FILETIME at offset 60
    pub(crate) fn parse(data: &[u8]) -> Option<UserAssistData> {
        if data.len() < ENTRY_MIN_SIZE {
            return None;
        }
        match UserAssistData::get_userassist_data(data) {
            Ok((_, result)) => Some(result),
            Err(_err) => None,
        }
    }

    fn get_userassist_data(data: &[u8]) -> nom::IResult<&[u8], UserAssistData> {
        let (input, _session) = nom_unsigned_four_bytes(data, Endian::Le)?;
        let (input, count) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let unknown_data_size = 52;
        let (input, _unknown) = nom_data(input, unknown_data_size)?;
        let (input, last_execution) = nom_unsigned_eight_bytes(input, Endian::Le)?;

        Ok((
            input,
            UserAssistData {
                count,
                last_execution: decode_filetime(last_execution),
            },
        ))
    }
}

/// The `UserAssist` value name is ROT13 encoded.
/// It is possible to disable the encoding via a Registry setting.
pub(crate) fn rot_decode(rot: &str) -> String {
    let rot_shift = 13;
    rot.chars()
        .map(|c| match c {
            'a'..='m' | 'A'..='M' => ((c as u8) + rot_shift) as char,
            'n'..='z' | 'N'..='Z' => ((c as u8) - rot_shift) as char,
            _ => c,
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{ENTRY_MIN_SIZE, UserAssistData, rot_decode};
    use common::time::Moment;

    /// Build a `UserAssist` value with the provided count and FILETIME
    pub(crate) fn build_entry(count: u32, filetime: u64) -> Vec<u8> {
        let mut data = vec![0; ENTRY_MIN_SIZE];
        data[4..8].copy_from_slice(&count.to_le_bytes());
        data[60..68].copy_from_slice(&filetime.to_le_bytes());
        data
    }

    #[test]
    fn test_rot_decode() {
        assert_eq!(rot_decode("Hfre"), "User");
        assert_eq!(rot_decode("Urer"), "Here");
        let test_input = "Ehfg vf cerggl pbby nppbeqvat gb Sreevf";
        assert_eq!(
            rot_decode(test_input),
            "Rust is pretty cool according to Ferris"
        );
        assert_eq!(rot_decode(&rot_decode("C:\\Jvaqbjf\\abgrcnq.rkr")), "C:\\Jvaqbjf\\abgrcnq.rkr");
        assert_eq!(rot_decode("{1NP14R77-02R7}"), "{1AC14E77-02E7}");
    }

    #[test]
    fn test_parse() {
        let result = UserAssistData::parse(&build_entry(7, 132223325760000000)).unwrap();
        assert_eq!(result.count, 7);
        assert_eq!(result.last_execution.to_string(), "2020-01-01 06:09:36");

        let mut larger = build_entry(1, 0);
        larger.extend_from_slice(&[0xff; 4]);
        let result = UserAssistData::parse(&larger).unwrap();
        assert_eq!(result.last_execution.moment, Moment::Absent);
    }

    #[test]
    fn test_parse_short() {
        assert!(UserAssistData::parse(&[0; 16]).is_none());
        assert!(UserAssistData::parse(&[0; ENTRY_MIN_SIZE - 1]).is_none());
    }
}
