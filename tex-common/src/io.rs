//! I/O helper functions for reading and writing binary data
//!
//! Everything is little-endian. Strings use the length-prefixed layout of
//! .NET's `BinaryWriter`: a 7-bit variable-length byte count followed by
//! UTF-8 bytes.

use std::io::{Cursor, Read};

use crate::error::TexError;

/// Bytes left between the cursor position and the end of the buffer
pub(crate) fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    let len = cursor.get_ref().len();
    len.saturating_sub(cursor.position() as usize)
}

/// Read exactly `len` bytes, failing with `TruncatedData` on a short read
pub(crate) fn read_bytes(
    cursor: &mut Cursor<&[u8]>,
    len: usize,
    context: &'static str,
) -> Result<Vec<u8>, TexError> {
    let available = remaining(cursor);
    if len > available {
        return Err(TexError::eof(context, len, available));
    }
    let mut buf = vec![0u8; len];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| TexError::eof(context, len, available))?;
    Ok(buf)
}

/// Read a single byte
pub(crate) fn read_u8(cursor: &mut Cursor<&[u8]>, context: &'static str) -> Result<u8, TexError> {
    let mut buf = [0u8; 1];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| TexError::eof(context, 1, 0))?;
    Ok(buf[0])
}

/// Read an i32 in little-endian format
pub(crate) fn read_i32(cursor: &mut Cursor<&[u8]>, context: &'static str) -> Result<i32, TexError> {
    let available = remaining(cursor);
    let mut buf = [0u8; 4];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| TexError::eof(context, 4, available))?;
    Ok(i32::from_le_bytes(buf))
}

/// Read an f32 in little-endian format
pub(crate) fn read_f32(cursor: &mut Cursor<&[u8]>, context: &'static str) -> Result<f32, TexError> {
    let available = remaining(cursor);
    let mut buf = [0u8; 4];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| TexError::eof(context, 4, available))?;
    Ok(f32::from_le_bytes(buf))
}

/// Read a 7-bit encoded length (at most 5 bytes, 32 significant bits)
pub(crate) fn read_7bit_len(
    cursor: &mut Cursor<&[u8]>,
    context: &'static str,
) -> Result<usize, TexError> {
    let mut value: u32 = 0;
    for i in 0..5 {
        let byte = read_u8(cursor, context)?;
        value |= u32::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value as usize);
        }
    }
    Err(TexError::InvalidHeader {
        field: "string length",
        value: i64::from(value),
    })
}

/// Read a length-prefixed string (lossy UTF-8)
pub(crate) fn read_string(
    cursor: &mut Cursor<&[u8]>,
    context: &'static str,
) -> Result<String, TexError> {
    let len = read_7bit_len(cursor, context)?;
    let bytes = read_bytes(cursor, len, context)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write an i32 in little-endian format
pub(crate) fn write_i32(output: &mut Vec<u8>, val: i32) {
    output.extend_from_slice(&val.to_le_bytes());
}

/// Write an f32 in little-endian format
pub(crate) fn write_f32(output: &mut Vec<u8>, val: f32) {
    output.extend_from_slice(&val.to_le_bytes());
}

/// Write a 7-bit encoded length
pub(crate) fn write_7bit_len(output: &mut Vec<u8>, len: usize) {
    let mut value = len as u32;
    while value >= 0x80 {
        output.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    output.push(value as u8);
}

/// Write a length-prefixed UTF-8 string
pub(crate) fn write_string(output: &mut Vec<u8>, val: &str) {
    write_7bit_len(output, val.len());
    output.extend_from_slice(val.as_bytes());
}
