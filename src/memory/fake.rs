//! In-memory fake of the foreign process, for tests and benches
//!
//! Stores individual bytes keyed by address, big-endian like the real
//! console, so layout code is exercised the same way against both backends.
//! Reads of unwritten addresses fail the way a vanished mapping does.

use std::cell::Cell;
use std::collections::HashMap;

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::memory::channel::{MemoryView, Ptr};

/// Synthetic memory image implementing [`MemoryView`]
#[derive(Default)]
pub struct FakeMemory {
    bytes: HashMap<u32, u8>,
    detached: bool,
    reads: Cell<u64>,
}

impl FakeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the fake as detached (process gone)
    pub fn set_detached(&mut self, detached: bool) {
        self.detached = detached;
    }

    /// Number of read operations performed so far
    pub fn read_count(&self) -> u64 {
        self.reads.get()
    }

    pub fn put_u8(&mut self, addr: u32, value: u8) {
        self.bytes.insert(addr, value);
    }

    pub fn put_u16(&mut self, addr: u32, value: u16) {
        for (i, b) in value.to_be_bytes().into_iter().enumerate() {
            self.bytes.insert(addr + i as u32, b);
        }
    }

    pub fn put_u32(&mut self, addr: u32, value: u32) {
        for (i, b) in value.to_be_bytes().into_iter().enumerate() {
            self.bytes.insert(addr + i as u32, b);
        }
    }

    pub fn put_f32(&mut self, addr: u32, value: f32) {
        self.put_u32(addr, value.to_bits());
    }

    pub fn put_ptr(&mut self, addr: u32, value: Ptr) {
        self.put_u32(addr, value.0);
    }

    pub fn put_vec3(&mut self, addr: u32, value: Vec3) {
        self.put_f32(addr, value.x);
        self.put_f32(addr + 0x4, value.y);
        self.put_f32(addr + 0x8, value.z);
    }

    fn get(&self, addr: u32) -> Result<u8> {
        self.bytes.get(&addr).copied().ok_or(Error::Read(addr))
    }
}

impl MemoryView for FakeMemory {
    fn is_attached(&self) -> bool {
        !self.detached
    }

    fn read_u8(&self, addr: u32) -> Result<u8> {
        self.reads.set(self.reads.get() + 1);
        self.get(addr)
    }

    fn read_u16(&self, addr: u32) -> Result<u16> {
        self.reads.set(self.reads.get() + 1);
        Ok(u16::from_be_bytes([self.get(addr)?, self.get(addr + 1)?]))
    }

    fn read_u32(&self, addr: u32) -> Result<u32> {
        self.reads.set(self.reads.get() + 1);
        Ok(u32::from_be_bytes([
            self.get(addr)?,
            self.get(addr + 1)?,
            self.get(addr + 2)?,
            self.get(addr + 3)?,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut mem = FakeMemory::new();
        mem.put_u32(0x8000_0000, 0xDEAD_BEEF);
        mem.put_u16(0x8000_0010, 0x4104);
        mem.put_f32(0x8000_0020, -12.5);
        assert_eq!(mem.read_u32(0x8000_0000).unwrap(), 0xDEAD_BEEF);
        assert_eq!(mem.read_u16(0x8000_0010).unwrap(), 0x4104);
        assert_eq!(mem.read_f32(0x8000_0020).unwrap(), -12.5);
    }

    #[test]
    fn test_unmapped_read_fails() {
        let mem = FakeMemory::new();
        assert!(matches!(mem.read_u32(0x8000_0000), Err(Error::Read(_))));
    }

    #[test]
    fn test_read_counter() {
        let mut mem = FakeMemory::new();
        mem.put_u32(0x8000_0000, 7);
        assert_eq!(mem.read_count(), 0);
        mem.read_u32(0x8000_0000).unwrap();
        mem.read_u32(0x8000_0000).unwrap();
        assert_eq!(mem.read_count(), 2);
    }
}
