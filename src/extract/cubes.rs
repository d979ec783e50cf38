//! Trigger cube volume collection
//!
//! Cube volumes hang off a fixed array of group pointers. Each group holds
//! a volume count and an info pointer; the info record points at a table of
//! volume pointers. This walk only resolves which volume records exist;
//! their geometry is read downstream when triangles are emitted.

use std::collections::HashSet;

use crate::core::types::Result;
use crate::layout::cube;
use crate::memory::channel::{MemoryView, Ptr};

/// Resolve the set of cube volume record addresses.
///
/// `array_base` is the first of `max_slots` consecutive 4-byte group
/// pointer slots. Any pointer failing the validity sentinel skips the
/// dependent reads for that group; the result is deduplicated by address.
pub fn collect(
    mem: &impl MemoryView,
    array_base: Ptr,
    max_slots: usize,
) -> Result<HashSet<Ptr>> {
    let mut out = HashSet::new();
    if !array_base.is_valid() {
        return Ok(out);
    }

    for slot in 0..max_slots as u32 {
        let group = mem.read_ptr(array_base.0 + slot * 4)?;
        if !group.is_valid() {
            continue;
        }

        let count = mem.read_u8(group.0 + cube::GROUP_COUNT)?;
        let info = mem.read_ptr(group.0 + cube::GROUP_INFO)?;
        if !info.is_valid() {
            continue;
        }

        let table = mem.read_ptr(info.0 + cube::INFO_TABLE)?;
        if !table.is_valid() {
            continue;
        }

        for i in 0..count as u32 {
            let volume = mem.read_ptr(table.0 + i * 4)?;
            if volume.is_valid() {
                out.insert(volume);
            }
        }
    }

    Ok(out)
}
