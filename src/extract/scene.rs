//! Scene geometry building
//!
//! Flattens the resolved scene (classified surface records, trigger cube
//! volumes, the player position) into one unordered bag of tagged
//! triangles. Positions stay in the game's world space; the
//! category tag rides alongside for downstream shading. Emission order
//! carries no meaning, translucent categories included.

use std::collections::HashSet;
use std::f32::consts::TAU;

use crate::core::types::{Result, Vec3};
use crate::extract::checklist;
use crate::extract::config::ExtractConfig;
use crate::extract::surface::{self, SurfaceKind, SurfaceRole};
use crate::layout::cube;
use crate::memory::channel::{MemoryView, Ptr};

/// Three world-space positions plus a category tag; the only datum
/// crossing the render boundary.
#[derive(Clone, Copy, Debug)]
pub struct TaggedTriangle {
    pub vertices: [Vec3; 3],
    pub kind: SurfaceKind,
}

/// Check list heads gathered per surface role, unioned across both head
/// arrays before traversal.
#[derive(Clone, Debug, Default)]
pub struct RoleHeads {
    pub floors: Vec<Ptr>,
    pub roofs: Vec<Ptr>,
    pub walls: Vec<Ptr>,
}

/// Box face triangulation over corner indices (bit 0 = +x, bit 1 = +y,
/// bit 2 = +z). Each face is two triangles; both windings are emitted so
/// trigger volumes stay visible from inside under back-face culling.
const BOX_TRIANGLES: [[usize; 3]; 12] = [
    [0, 4, 6], [0, 6, 2], // -x
    [1, 3, 7], [1, 7, 5], // +x
    [0, 1, 5], [0, 5, 4], // -y
    [2, 6, 7], [2, 7, 3], // +y
    [0, 2, 3], [0, 3, 1], // -z
    [4, 5, 7], [4, 7, 6], // +z
];

/// Build the frame's triangle bag.
///
/// Every call re-derives the full scene: the player hitbox (when a valid
/// position is present), one triangle per unique classified surface record,
/// and 24 triangles per unique cube volume.
pub fn build(
    mem: &impl MemoryView,
    heads: &RoleHeads,
    cube_volumes: &HashSet<Ptr>,
    player_pos: Option<Vec3>,
    config: &ExtractConfig,
) -> Result<Vec<TaggedTriangle>> {
    let mut out = Vec::new();

    if let Some(pos) = player_pos {
        push_cylinder(
            &mut out,
            pos,
            config.hitbox_radius,
            config.hitbox_height,
            config.hitbox_sides,
        );
    }

    for (role, role_heads) in [
        (SurfaceRole::Floor, &heads.floors),
        (SurfaceRole::Roof, &heads.roofs),
        (SurfaceRole::Wall, &heads.walls),
    ] {
        let mut targets = HashSet::new();
        for &head in role_heads {
            checklist::collect_targets(mem, head, &mut targets)?;
        }
        for addr in targets {
            let (kind, vertices) = surface::classify(mem, addr, role)?;
            out.push(TaggedTriangle { vertices, kind });
        }
    }

    for &volume in cube_volumes {
        let center = mem.read_vec3(volume.0 + cube::CENTER)?;
        let extents = mem.read_vec3(volume.0 + cube::EXTENTS)?;
        push_box(&mut out, center, extents);
    }

    Ok(out)
}

/// Emit a cylinder approximation around `base`: 4 triangles per segment
/// (bottom cap, top cap, two side triangles). Cap fans are anchored at the
/// first rim vertex so every emitted vertex sits on the rim.
fn push_cylinder(out: &mut Vec<TaggedTriangle>, base: Vec3, radius: f32, height: f32, sides: u32) {
    let rim = |angle: f32, y: f32| {
        Vec3::new(
            base.x + radius * angle.cos(),
            y,
            base.z + radius * angle.sin(),
        )
    };
    let top = base.y + height;
    let bottom_anchor = rim(0.0, base.y);
    let top_anchor = rim(0.0, top);

    for i in 1..=sides {
        let a0 = TAU * (i - 1) as f32 / sides as f32;
        let a1 = TAU * i as f32 / sides as f32;
        let (b0, b1) = (rim(a0, base.y), rim(a1, base.y));
        let (t0, t1) = (rim(a0, top), rim(a1, top));

        for vertices in [
            [bottom_anchor, b1, b0],
            [top_anchor, t0, t1],
            [b0, b1, t1],
            [b0, t1, t0],
        ] {
            out.push(TaggedTriangle {
                vertices,
                kind: SurfaceKind::Hitbox,
            });
        }
    }
}

/// Emit both windings of an axis-aligned box given its center and full
/// extents (24 triangles).
fn push_box(out: &mut Vec<TaggedTriangle>, center: Vec3, extents: Vec3) {
    let half = extents * 0.5;
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 != 0 { center.x + half.x } else { center.x - half.x },
            if i & 2 != 0 { center.y + half.y } else { center.y - half.y },
            if i & 4 != 0 { center.z + half.z } else { center.z - half.z },
        )
    };

    for [a, b, c] in BOX_TRIANGLES {
        out.push(TaggedTriangle {
            vertices: [corner(a), corner(b), corner(c)],
            kind: SurfaceKind::Cube,
        });
        out.push(TaggedTriangle {
            vertices: [corner(a), corner(c), corner(b)],
            kind: SurfaceKind::Cube,
        });
    }
}
