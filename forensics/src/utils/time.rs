use crate::utils::nom_helper::{Endian, nom_unsigned_eight_bytes, nom_unsigned_two_bytes};
use chrono::{DateTime, NaiveDate, Utc};
use common::time::{TemporalValue, TimeEncoding};

/// FILETIME value Windows uses for "never"
const FILETIME_NEVER: u64 = 0x7FFF_FFFF_FFFF_FFFF;
const WINDOWS_TICKS: u64 = 10_000_000;
const SECONDS_TO_UNIX: i64 = 11_644_473_600;

/// Convert Windows FILETIME (100ns intervals since 1601) to a `TemporalValue`
pub(crate) fn decode_filetime(filetime: u64) -> TemporalValue {
    if filetime == 0 || filetime == FILETIME_NEVER {
        return TemporalValue::absent(TimeEncoding::Filetime);
    }

    // u64::MAX / WINDOWS_TICKS always fits in i64
    let seconds = (filetime / WINDOWS_TICKS) as i64 - SECONDS_TO_UNIX;
    let nanos = ((filetime % WINDOWS_TICKS) * 100) as u32;

    match DateTime::from_timestamp(seconds, nanos) {
        Some(time) => TemporalValue::at(time, TimeEncoding::Filetime),
        None => TemporalValue::absent(TimeEncoding::Filetime),
    }
}

/// Decode a little endian FILETIME from the start of a blob
pub(crate) fn decode_filetime_bytes(data: &[u8]) -> TemporalValue {
    match nom_unsigned_eight_bytes(data, Endian::Le) {
        Ok((_, filetime)) => decode_filetime(filetime),
        Err(_) => TemporalValue::absent(TimeEncoding::Filetime),
    }
}

/// Decode a 16 byte `SYSTEMTIME` structure
pub(crate) fn decode_systemtime(data: &[u8]) -> TemporalValue {
    match parse_systemtime(data) {
        Some(time) => TemporalValue::at(time, TimeEncoding::Systemtime),
        None => TemporalValue::absent(TimeEncoding::Systemtime),
    }
}

fn parse_systemtime(data: &[u8]) -> Option<DateTime<Utc>> {
    let fields = systemtime_fields(data).ok()?.1;
    let [year, month, _day_of_week, day, hour, minute, second, millis] = fields;
    if year == 0 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))?;
    let time = date.and_hms_milli_opt(
        u32::from(hour),
        u32::from(minute),
        u32::from(second),
        u32::from(millis),
    )?;
    Some(time.and_utc())
}

fn systemtime_fields(data: &[u8]) -> nom::IResult<&[u8], [u16; 8]> {
    let mut fields = [0; 8];
    let mut input = data;
    for field in fields.iter_mut() {
        let (remaining, value) = nom_unsigned_two_bytes(input, Endian::Le)?;
        *field = value;
        input = remaining;
    }
    Ok((input, fields))
}

/// Convert a signed 32 bit count of seconds since 1970. Zero is absent, anything outside the i32 range is invalid
pub(crate) fn decode_unixepoch(seconds: i64) -> TemporalValue {
    if seconds == 0 {
        return TemporalValue::absent(TimeEncoding::Unixepoch);
    }
    if i32::try_from(seconds).is_err() {
        return TemporalValue::invalid(TimeEncoding::Unixepoch);
    }

    match DateTime::from_timestamp(seconds, 0) {
        Some(time) => TemporalValue::at(time, TimeEncoding::Unixepoch),
        None => TemporalValue::invalid(TimeEncoding::Unixepoch),
    }
}
