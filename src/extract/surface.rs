//! Collision surface record classification

use crate::core::types::{Result, Vec3};
use crate::layout::surface;
use crate::memory::channel::{MemoryView, Ptr};

/// Surface type codes that mark a floor as water
const WATER_TYPE_CODES: [u16; 7] = [0x100, 0x101, 0x102, 0x103, 0x104, 0x105, 0x4104];

/// The role a check list covers; determines how its records classify
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceRole {
    Floor,
    Roof,
    Wall,
}

/// Category of one rendered triangle.
///
/// Closed set: the foreign layout stores an open integer, but everything
/// downstream only distinguishes these seven cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Floor,
    Roof,
    WallZ,
    WallX,
    Water,
    Cube,
    Hitbox,
}

impl SurfaceKind {
    /// Numeric tag carried beside each vertex into the shader
    pub fn tag(self) -> f32 {
        match self {
            SurfaceKind::Floor => 0.0,
            SurfaceKind::Roof => 1.0,
            SurfaceKind::WallZ => 2.0,
            SurfaceKind::WallX => 3.0,
            SurfaceKind::Water => 4.0,
            SurfaceKind::Cube => 5.0,
            SurfaceKind::Hitbox => 6.0,
        }
    }
}

/// Classify the surface record at `addr` and read its three vertices.
///
/// Floors split into water/floor on the 16-bit type code at +0x0, walls
/// split into X/Z-facing on flag bit 0x8 at +0x4, roofs are always roofs.
/// Vertices are world-space and untransformed.
pub fn classify(
    mem: &impl MemoryView,
    addr: Ptr,
    role: SurfaceRole,
) -> Result<(SurfaceKind, [Vec3; 3])> {
    let kind = match role {
        SurfaceRole::Floor => {
            let type_code = mem.read_u16(addr.0 + surface::TYPE_CODE)?;
            if WATER_TYPE_CODES.contains(&type_code) {
                SurfaceKind::Water
            } else {
                SurfaceKind::Floor
            }
        }
        SurfaceRole::Roof => SurfaceKind::Roof,
        SurfaceRole::Wall => {
            let flags = mem.read_u16(addr.0 + surface::FLAGS)?;
            if flags & surface::FLAG_WALL_X != 0 {
                SurfaceKind::WallX
            } else {
                SurfaceKind::WallZ
            }
        }
    };

    let verts = [
        mem.read_vec3(addr.0 + surface::VERTICES)?,
        mem.read_vec3(addr.0 + surface::VERTICES + 0xC)?,
        mem.read_vec3(addr.0 + surface::VERTICES + 0x18)?,
    ];
    Ok((kind, verts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::fake::FakeMemory;

    const ADDR: u32 = 0x8020_0000;

    fn put_record(mem: &mut FakeMemory, type_code: u16, flags: u16) {
        mem.put_u16(ADDR + surface::TYPE_CODE, type_code);
        mem.put_u16(ADDR + surface::FLAGS, flags);
        for i in 0..9 {
            mem.put_f32(ADDR + surface::VERTICES + i * 4, i as f32);
        }
    }

    #[test]
    fn test_floor_water_codes_exhaustive() {
        for code in 0x0..=0x4200u16 {
            let mut mem = FakeMemory::new();
            put_record(&mut mem, code, 0);
            let (kind, _) = classify(&mem, Ptr(ADDR), SurfaceRole::Floor).unwrap();
            let expected = if WATER_TYPE_CODES.contains(&code) {
                SurfaceKind::Water
            } else {
                SurfaceKind::Floor
            };
            assert_eq!(kind, expected, "type code {code:#06x}");
        }
    }

    #[test]
    fn test_wall_axis_flag_both_states() {
        for (flags, expected) in [
            (0x0000, SurfaceKind::WallZ),
            (0x0008, SurfaceKind::WallX),
            (0x0007, SurfaceKind::WallZ),
            (0xFFF7, SurfaceKind::WallZ),
            (0xFFFF, SurfaceKind::WallX),
        ] {
            let mut mem = FakeMemory::new();
            put_record(&mut mem, 0, flags);
            let (kind, _) = classify(&mem, Ptr(ADDR), SurfaceRole::Wall).unwrap();
            assert_eq!(kind, expected, "flags {flags:#06x}");
        }
    }

    #[test]
    fn test_roof_ignores_type_and_flags() {
        let mut mem = FakeMemory::new();
        put_record(&mut mem, 0x104, 0x8);
        let (kind, _) = classify(&mem, Ptr(ADDR), SurfaceRole::Roof).unwrap();
        assert_eq!(kind, SurfaceKind::Roof);
    }

    #[test]
    fn test_vertices_read_from_fixed_offsets() {
        let mut mem = FakeMemory::new();
        put_record(&mut mem, 0, 0);
        let (_, verts) = classify(&mem, Ptr(ADDR), SurfaceRole::Floor).unwrap();
        assert_eq!(verts[0], Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(verts[1], Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(verts[2], Vec3::new(6.0, 7.0, 8.0));
    }

    #[test]
    fn test_tags_are_distinct() {
        let kinds = [
            SurfaceKind::Floor,
            SurfaceKind::Roof,
            SurfaceKind::WallZ,
            SurfaceKind::WallX,
            SurfaceKind::Water,
            SurfaceKind::Cube,
            SurfaceKind::Hitbox,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.tag(), b.tag());
            }
        }
    }
}
