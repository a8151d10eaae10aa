/**
 * Registry blobs are fixed layouts of little endian integers.
 * nom needs two steps for each field:  
 *   `take X bytes`  
 *   `le_uX` to number
 *
 * These helpers fold both steps into one call
 */
use nom::{
    bytes::complete::take,
    number::complete::{le_u16, le_u32, le_u64},
};
use std::mem::size_of;

/// Byte order of a field. Registry blobs only use little endian
pub(crate) enum Endian {
    Le,
}

/**
 * Nom four (4) bytes to u32
 */
pub(crate) fn nom_unsigned_four_bytes(data: &[u8], endian: Endian) -> nom::IResult<&[u8], u32> {
    let (input, value_data) = take(size_of::<u32>())(data)?;

    let (_, value) = match endian {
        Endian::Le => le_u32(value_data)?,
    };

    Ok((input, value))
}

/**
 * Nom eight (8) bytes to u64
 */
pub(crate) fn nom_unsigned_eight_bytes(data: &[u8], endian: Endian) -> nom::IResult<&[u8], u64> {
    let (input, value_data) = take(size_of::<u64>())(data)?;

    let (_, value) = match endian {
        Endian::Le => le_u64(value_data)?,
    };
    Ok((input, value))
}

/**
 * Nom two (2) bytes to u16
 */
pub(crate) fn nom_unsigned_two_bytes(data: &[u8], endian: Endian) -> nom::IResult<&[u8], u16> {
    let (input, value_data) = take(size_of::<u16>())(data)?;

    let (_, value) = match endian {
        Endian::Le => le_u16(value_data)?,
    };
    Ok((input, value))
}

/**
 * Nom an arbitrary amount of data and return the bytes remaining and bytes nom'd
 */
pub(crate) fn nom_data(data: &[u8], count: u64) -> nom::IResult<&[u8], &[u8]> {
    let (input, value) = take(count)(data)?;

    Ok((input, value))
}

/// Read a little endian u32 at `offset` without consuming anything
pub(crate) fn read_u32_at(data: &[u8], offset: usize) -> Option<u32> {
    let start = data.get(offset..)?;
    let (_, value) = nom_unsigned_four_bytes(start, Endian::Le).ok()?;
    Some(value)
}

/// Read a little endian u64 at `offset` without consuming anything
pub(crate) fn read_u64_at(data: &[u8], offset: usize) -> Option<u64> {
    let start = data.get(offset..)?;
    let (_, value) = nom_unsigned_eight_bytes(start, Endian::Le).ok()?;
    Some(value)
}

/// Read a little endian u16 at `offset` without consuming anything
pub(crate) fn read_u16_at(data: &[u8], offset: usize) -> Option<u16> {
    let start = data.get(offset..)?;
    let (_, value) = nom_unsigned_two_bytes(start, Endian::Le).ok()?;
    Some(value)
}

/// One fixed position field of a binary layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    pub(crate) offset: usize,
    pub(crate) width: usize,
}

impl Field {
    pub(crate) const fn new(offset: usize, width: usize) -> Field {
        Field { offset, width }
    }

    /// First byte after the field
    pub(crate) const fn end(&self) -> usize {
        self.offset + self.width
    }

    pub(crate) fn read_u16(&self, data: &[u8]) -> Option<u16> {
        read_u16_at(data, self.offset)
    }

    pub(crate) fn read_u32(&self, data: &[u8]) -> Option<u32> {
        read_u32_at(data, self.offset)
    }

    pub(crate) fn read_u64(&self, data: &[u8]) -> Option<u64> {
        read_u64_at(data, self.offset)
    }
}
