//! Memory channel trait and pointer validity

use crate::core::types::{Result, Vec3};

/// Lowest dereferenceable address. Anything below this is null/invalid and
/// must never be read through.
pub const VALID_BASE: u32 = 0x8000_0000;

/// A 32-bit address inside the foreign process.
///
/// The target's pointers all live at or above [`VALID_BASE`]; lower values
/// (including 0) mean "nothing here". Every pointer pulled out of foreign
/// memory goes through [`Ptr::is_valid`] before it is dereferenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ptr(pub u32);

impl Ptr {
    /// The null pointer
    pub const NULL: Ptr = Ptr(0);

    /// Whether this address may be dereferenced
    pub fn is_valid(self) -> bool {
        self.0 >= VALID_BASE
    }

    /// Address `offset` bytes past this one
    pub fn offset(self, offset: u32) -> Ptr {
        Ptr(self.0.wrapping_add(offset))
    }
}

impl std::fmt::Display for Ptr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Read-only view of the foreign process's memory.
///
/// Reads are synchronous and individually atomic at the byte-range level
/// only; the target keeps mutating underneath, so an aggregate walk over
/// several reads is never transactionally consistent. A failed read means
/// the backing went away (process exited, memory unmapped), not a bad
/// pointer; pointer validity is the caller's job via [`Ptr::is_valid`].
pub trait MemoryView {
    /// Whether the backing process is still reachable
    fn is_attached(&self) -> bool;

    fn read_u8(&self, addr: u32) -> Result<u8>;
    fn read_u16(&self, addr: u32) -> Result<u16>;
    fn read_u32(&self, addr: u32) -> Result<u32>;

    fn read_f32(&self, addr: u32) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32(addr)?))
    }

    /// Read a pointer-sized field as a [`Ptr`] (validity unchecked)
    fn read_ptr(&self, addr: u32) -> Result<Ptr> {
        Ok(Ptr(self.read_u32(addr)?))
    }

    /// Read three consecutive floats as a vector
    fn read_vec3(&self, addr: u32) -> Result<Vec3> {
        Ok(Vec3::new(
            self.read_f32(addr)?,
            self.read_f32(addr + 0x4)?,
            self.read_f32(addr + 0x8)?,
        ))
    }
}
