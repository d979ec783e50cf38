//! Dolphin emulator memory backend
//!
//! Dolphin exposes the emulated console's RAM as a shared-memory file named
//! `dolphin-emu.<pid>` under `/dev/shm`. MEM1 sits at the start of that file
//! and is mapped at 0x80000000 in the emulated address space. The console is
//! big-endian, so every scalar read byte-swaps.

use std::fs::File;
use std::os::unix::fs::FileExt;
use std::path::Path;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::memory::channel::{MemoryView, VALID_BASE};

/// Size of MEM1 in bytes
const MEM1_SIZE: u32 = 0x0180_0000;

/// Process names Dolphin runs under
const PROCESS_NAMES: [&str; 3] = ["dolphin-emu", "dolphin-emu-qt2", "dolphin-emu-wx"];

/// Memory channel backed by a running Dolphin instance
pub struct DolphinMemory {
    shm: File,
    pid: u32,
}

impl DolphinMemory {
    /// Find a running Dolphin and open its shared memory.
    ///
    /// Returns [`Error::NotAttached`] when no emulator process is found or
    /// it has not mapped its RAM yet (no game booted).
    pub fn attach() -> Result<Self> {
        let pid = find_emulator_pid().ok_or(Error::NotAttached)?;
        let shm_path = format!("/dev/shm/dolphin-emu.{pid}");
        let shm = File::open(&shm_path).map_err(|_| Error::NotAttached)?;
        log::info!("attached to Dolphin pid {pid}");
        Ok(Self { shm, pid })
    }

    /// Pid of the attached emulator process
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Translate an emulated address to a file offset, bounds-checked
    /// against MEM1.
    fn translate(addr: u32, len: u32) -> Result<u64> {
        let off = addr.wrapping_sub(VALID_BASE);
        if addr < VALID_BASE || off.saturating_add(len) > MEM1_SIZE {
            return Err(Error::Read(addr));
        }
        Ok(off as u64)
    }

    fn read_bytes<const N: usize>(&self, addr: u32) -> Result<[u8; N]> {
        let off = Self::translate(addr, N as u32)?;
        let mut buf = [0u8; N];
        self.shm
            .read_exact_at(&mut buf, off)
            .map_err(|_| Error::Read(addr))?;
        Ok(buf)
    }
}

impl MemoryView for DolphinMemory {
    fn is_attached(&self) -> bool {
        Path::new(&format!("/proc/{}", self.pid)).exists()
    }

    fn read_u8(&self, addr: u32) -> Result<u8> {
        Ok(self.read_bytes::<1>(addr)?[0])
    }

    fn read_u16(&self, addr: u32) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_bytes::<2>(addr)?))
    }

    fn read_u32(&self, addr: u32) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_bytes::<4>(addr)?))
    }
}

/// Scan /proc for an emulator process by name
fn find_emulator_pid() -> Option<u32> {
    let entries = std::fs::read_dir("/proc").ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(pid) = name.to_str().and_then(|s| s.parse::<u32>().ok()) else {
            continue;
        };
        let Ok(comm) = std::fs::read_to_string(entry.path().join("comm")) else {
            continue;
        };
        if PROCESS_NAMES.contains(&comm.trim()) {
            return Some(pid);
        }
    }
    None
}
