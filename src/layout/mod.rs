//! Foreign structure layouts and per-revision base addresses
//!
//! The target game ships in several builds that place the same globals at
//! different addresses. A one-byte fingerprint identifies the running build
//! and selects a [`RevisionLayout`]. Field offsets within records are the
//! same across all known builds.

use crate::memory::channel::Ptr;

/// Address of the game identity string (first bytes of the disc header)
pub const GAME_ID_ADDR: u32 = 0x8000_0000;

/// Expected game identity bytes
pub const GAME_ID: [u8; 3] = *b"GMS";

/// Address of the one-byte revision fingerprint
pub const FINGERPRINT_ADDR: u32 = 0x8036_5DDD;

/// Camera record field offsets
pub mod camera {
    pub const NEAR: u32 = 0x28;
    pub const FAR: u32 = 0x2C;
    pub const UP: u32 = 0x30;
    /// Vertical field of view, degrees
    pub const FOV_Y: u32 = 0x48;
    pub const EYE: u32 = 0x124;
    pub const TARGET: u32 = 0x148;
}

/// Collision data header field offsets
pub mod col_data {
    /// Number of entries in each check list head array (u32)
    pub const LIST_COUNT: u32 = 0x10;
    /// First head array pointer
    pub const LISTS_A: u32 = 0x14;
    /// Second head array pointer
    pub const LISTS_B: u32 = 0x18;
    /// Stride of one head array entry
    pub const ENTRY_STRIDE: u32 = 0x24;
    /// Head offsets within one entry, per surface role
    pub const FLOOR_HEAD: u32 = 0x4;
    pub const ROOF_HEAD: u32 = 0x10;
    pub const WALL_HEAD: u32 = 0x1C;
}

/// Check list node field offsets
pub mod check_node {
    pub const NEXT: u32 = 0x4;
    pub const TARGET: u32 = 0x8;
}

/// Surface record field offsets
pub mod surface {
    /// 16-bit surface type code
    pub const TYPE_CODE: u32 = 0x0;
    /// 16-bit surface flags
    pub const FLAGS: u32 = 0x4;
    /// 9 consecutive floats, 3 world-space vertices
    pub const VERTICES: u32 = 0x10;
    /// Wall axis flag: set means the wall faces along X
    pub const FLAG_WALL_X: u16 = 0x8;
}

/// Trigger cube group / volume field offsets
pub mod cube {
    /// Count byte inside a cube group record
    pub const GROUP_COUNT: u32 = 0x10;
    /// Info pointer inside a cube group record
    pub const GROUP_INFO: u32 = 0x14;
    /// Volume table pointer inside the info record
    pub const INFO_TABLE: u32 = 0x10;
    /// Box center, 3 floats, inside a volume record
    pub const CENTER: u32 = 0x10;
    /// Full box extents, 3 floats, inside a volume record
    pub const EXTENTS: u32 = 0x1C;
}

/// Player record field offsets
pub mod player {
    /// World position, 3 floats
    pub const POSITION: u32 = 0x10;
}

/// Resolved global base addresses for one game revision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevisionLayout {
    /// Slot holding the camera record pointer
    pub camera_ptr_slot: Ptr,
    /// Slot holding the collision data header pointer
    pub col_data_ptr_slot: Ptr,
    /// Slot holding the player record pointer
    pub player_ptr_slot: Ptr,
    /// Base of the trigger cube group pointer array
    pub cube_array_base: Ptr,
}

impl RevisionLayout {
    /// Look up the layout for a revision fingerprint byte.
    ///
    /// Returns `None` for unknown builds; the pipeline then has no base
    /// addresses and renders nothing.
    pub fn for_fingerprint(fingerprint: u8) -> Option<RevisionLayout> {
        let (camera, col_data, player, cubes) = match fingerprint {
            // JP 1.0
            0x23 => (0x8040_B370, 0x8040_A578, 0x8040_A378, 0x8040_A400),
            // NA / KOR
            0xA3 => (0x8040_D0A8, 0x8040_DEA0, 0x8040_E0E8, 0x8040_DF10),
            // PAL
            0x41 => (0x8040_4808, 0x8040_5568, 0x8040_6218, 0x8040_5640),
            // JP 1.1
            0x80 => (0x803F_FA38, 0x803F_ED40, 0x8040_0A88, 0x803F_EE18),
            // 3D All-Stars
            0x4D => (0x8040_1D08, 0x8040_2A68, 0x8040_3718, 0x8040_2B40),
            _ => return None,
        };
        Some(RevisionLayout {
            camera_ptr_slot: Ptr(camera),
            col_data_ptr_slot: Ptr(col_data),
            player_ptr_slot: Ptr(player),
            cube_array_base: Ptr(cubes),
        })
    }
}
