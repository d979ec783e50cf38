//! Check list traversal
//!
//! Collision surfaces are reachable through singly linked "check lists":
//! each node points at the next node and at one surface record. Two head
//! arrays can reference overlapping node chains, so targets are always
//! collected into a set and classified per unique address, never per
//! traversal edge.
//!
//! Known limitation: there is no cycle guard. A list whose nodes stay above
//! the validity sentinel but loop back on themselves would spin forever; no
//! such list has been observed in practice, and the frame fully re-derives
//! state anyway, so a guard would only mask a corrupted target.

use std::collections::HashSet;

use crate::core::types::Result;
use crate::layout::check_node;
use crate::memory::channel::{MemoryView, Ptr};

/// Walk the check list rooted at `head`, adding every valid target address
/// to `out`.
///
/// A head failing the validity sentinel means "empty list" and causes no
/// reads at all. Traversal stops as soon as a next pointer fails the
/// sentinel; targets failing it are skipped but the walk continues.
pub fn collect_targets(
    mem: &impl MemoryView,
    head: Ptr,
    out: &mut HashSet<Ptr>,
) -> Result<()> {
    let mut node = head;
    while node.is_valid() {
        let target = mem.read_ptr(node.0 + check_node::TARGET)?;
        if target.is_valid() {
            out.insert(target);
        }
        node = mem.read_ptr(node.0 + check_node::NEXT)?;
    }
    Ok(())
}

/// Walk a single check list into a fresh set
pub fn traverse(mem: &impl MemoryView, head: Ptr) -> Result<HashSet<Ptr>> {
    let mut out = HashSet::new();
    collect_targets(mem, head, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::fake::FakeMemory;

    fn put_node(mem: &mut FakeMemory, addr: u32, next: u32, target: u32) {
        mem.put_u32(addr + check_node::NEXT, next);
        mem.put_u32(addr + check_node::TARGET, target);
    }

    #[test]
    fn test_invalid_head_reads_nothing() {
        let mem = FakeMemory::new();
        for head in [Ptr::NULL, Ptr(0x1234), Ptr(0x7FFF_FFFF)] {
            let out = traverse(&mem, head).unwrap();
            assert!(out.is_empty());
        }
        assert_eq!(mem.read_count(), 0);
    }

    #[test]
    fn test_collects_all_targets() {
        let mut mem = FakeMemory::new();
        put_node(&mut mem, 0x8010_0000, 0x8010_0100, 0x8020_0000);
        put_node(&mut mem, 0x8010_0100, 0x8010_0200, 0x8020_0040);
        put_node(&mut mem, 0x8010_0200, 0, 0x8020_0080);

        let out = traverse(&mem, Ptr(0x8010_0000)).unwrap();
        assert_eq!(
            out,
            HashSet::from([Ptr(0x8020_0000), Ptr(0x8020_0040), Ptr(0x8020_0080)])
        );
    }

    #[test]
    fn test_invalid_target_skipped_walk_continues() {
        let mut mem = FakeMemory::new();
        put_node(&mut mem, 0x8010_0000, 0x8010_0100, 0);
        put_node(&mut mem, 0x8010_0100, 0, 0x8020_0000);

        let out = traverse(&mem, Ptr(0x8010_0000)).unwrap();
        assert_eq!(out, HashSet::from([Ptr(0x8020_0000)]));
    }

    #[test]
    fn test_union_deduplicates_shared_targets() {
        let mut mem = FakeMemory::new();
        // Two lists referencing the same surface record
        put_node(&mut mem, 0x8010_0000, 0, 0x8020_0000);
        put_node(&mut mem, 0x8011_0000, 0x8011_0100, 0x8020_0000);
        put_node(&mut mem, 0x8011_0100, 0, 0x8020_0040);

        let mut out = HashSet::new();
        collect_targets(&mem, Ptr(0x8010_0000), &mut out).unwrap();
        collect_targets(&mem, Ptr(0x8011_0000), &mut out).unwrap();
        assert_eq!(out, HashSet::from([Ptr(0x8020_0000), Ptr(0x8020_0040)]));
    }

    #[test]
    fn test_unmapped_node_is_transient_failure() {
        let mut mem = FakeMemory::new();
        put_node(&mut mem, 0x8010_0000, 0x8010_0100, 0x8020_0000);
        // 0x8010_0100 was never written: the mapping vanished mid-walk
        assert!(traverse(&mem, Ptr(0x8010_0000)).is_err());
    }
}
