//! Alignment arithmetic shared by the builder and the corpus constructors.

use crate::models::DEFAULT_ALIGNMENT;

/// Aligns an offset up to the given alignment boundary.
/// Returns (aligned_offset, padding_bytes).
#[inline]
pub fn align_offset_to(current_offset: u64, alignment: u64) -> (u64, u64) {
    if alignment == 0 {
        return (current_offset, 0);
    }
    let remainder = current_offset % alignment;
    if remainder == 0 {
        (current_offset, 0)
    } else {
        let padding = alignment - remainder;
        (current_offset + padding, padding)
    }
}

/// Calculates the aligned offset and required padding for the default
/// 32-byte boundary. Returns (aligned_offset, padding_bytes).
#[inline]
pub fn align_offset(current_offset: u64) -> (u64, u64) {
    align_offset_to(current_offset, DEFAULT_ALIGNMENT)
}
