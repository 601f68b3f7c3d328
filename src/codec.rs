//! Typed value encoding for the metadata section.
//!
//! Everything is little-endian. Strings are u64-length-prefixed UTF-8 with
//! no terminator and no padding; arrays are an i32 element tag, a u64
//! element count, then the packed elements.

use crate::error::Error;
use crate::models::{MAX_DIMS, MetaType, TensorType, Value};
use crate::utils::align_offset_to;

/// Appends a length-prefixed UTF-8 string.
pub fn put_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Appends zero bytes until `buf.len()` is a multiple of `alignment`.
pub fn pad_to_alignment(buf: &mut Vec<u8>, alignment: u64) {
    let (aligned, _) = align_offset_to(buf.len() as u64, alignment);
    buf.resize(aligned as usize, 0);
}

/// Appends the encoded form of a scalar or array value.
///
/// Scalars encode little-endian, bool as a single 0/1 byte. Fails if an
/// array is declared with the `array` element type, or if an element does
/// not match the declared element type.
pub fn put_value(buf: &mut Vec<u8>, value: &Value) -> Result<(), Error> {
    match value {
        Value::Uint8(v) => buf.push(*v),
        Value::Int8(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Uint16(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Int16(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Uint32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Int32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Float32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Bool(v) => buf.push(if *v { 1 } else { 0 }),
        Value::String(s) => put_str(buf, s),
        Value::Array(elem_type, items) => put_array(buf, *elem_type, items)?,
        Value::Uint64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Int64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Float64(v) => buf.extend_from_slice(&v.to_le_bytes()),
    }
    Ok(())
}

/// Appends an array value: element tag, element count, then each element
/// back to back with no per-array padding.
pub fn put_array(buf: &mut Vec<u8>, elem_type: MetaType, items: &[Value]) -> Result<(), Error> {
    if elem_type == MetaType::Array {
        return Err(Error::UnsupportedNesting);
    }
    buf.extend_from_slice(&(elem_type.tag() as i32).to_le_bytes());
    buf.extend_from_slice(&(items.len() as u64).to_le_bytes());
    for item in items {
        // elem_type is never Array here, so this also rejects nesting.
        if item.meta_type() != elem_type {
            return Err(Error::ArrayElementType {
                expected: elem_type,
                found: item.meta_type(),
            });
        }
        put_value(buf, item)?;
    }
    Ok(())
}

/// Appends a tensor descriptor: name string, dimension count, four
/// dimension slots (unused slots written as 1), element type tag, and a
/// zeroed offset slot.
///
/// Returns the byte position of the offset slot so the caller can patch it
/// once data placement is known. Emits exactly
/// `8 + name.len() + 4 + 32 + 4 + 8` bytes.
pub fn put_tensor_descriptor(
    buf: &mut Vec<u8>,
    name: &str,
    shape: &[u64],
    ttype: TensorType,
) -> Result<usize, Error> {
    let n_dims = shape.len() as u32;
    if n_dims == 0 || n_dims > MAX_DIMS {
        return Err(Error::InvalidDimensions { n_dims });
    }
    put_str(buf, name);
    buf.extend_from_slice(&n_dims.to_le_bytes());
    for i in 0..MAX_DIMS as usize {
        let dim = shape.get(i).copied().unwrap_or(1);
        buf.extend_from_slice(&(dim as i64).to_le_bytes());
    }
    buf.extend_from_slice(&(ttype.tag() as i32).to_le_bytes());
    let offset_pos = buf.len();
    buf.extend_from_slice(&0u64.to_le_bytes());
    Ok(offset_pos)
}
