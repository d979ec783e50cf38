use criterion::{Criterion, black_box, criterion_group, criterion_main};

use colview::extract::{ExtractConfig, FrameResult, Session};
use colview::layout::{self, RevisionLayout, check_node, col_data, player, surface};
use colview::memory::fake::FakeMemory;
use glam::Vec3;

/// Build a synthetic collision world: one head array entry per role with a
/// chain of `surfaces` records each, plus camera and player.
fn synthetic_world(surfaces: u32) -> FakeMemory {
    let mut mem = FakeMemory::new();
    let rev = RevisionLayout::for_fingerprint(0xA3).unwrap();

    for (i, b) in layout::GAME_ID.iter().enumerate() {
        mem.put_u8(layout::GAME_ID_ADDR + i as u32, *b);
    }
    mem.put_u8(layout::FINGERPRINT_ADDR, 0xA3);

    let camera = 0x8050_0000;
    mem.put_u32(rev.camera_ptr_slot.0, camera);
    mem.put_f32(camera + layout::camera::FOV_Y, 50.0);
    mem.put_f32(camera + layout::camera::NEAR, 10.0);
    mem.put_f32(camera + layout::camera::FAR, 30000.0);
    mem.put_vec3(camera + layout::camera::EYE, Vec3::new(0.0, 500.0, 1000.0));
    mem.put_vec3(camera + layout::camera::TARGET, Vec3::ZERO);
    mem.put_vec3(camera + layout::camera::UP, Vec3::Y);

    let player_record = 0x8060_0000;
    mem.put_u32(rev.player_ptr_slot.0, player_record);
    mem.put_vec3(player_record + player::POSITION, Vec3::ZERO);

    for slot in 0..ExtractConfig::default().cube_array_slots as u32 {
        mem.put_u32(rev.cube_array_base.0 + slot * 4, 0);
    }

    let col = 0x8030_0000;
    let array = 0x8030_1000;
    mem.put_u32(rev.col_data_ptr_slot.0, col);
    mem.put_u32(col + col_data::LIST_COUNT, 1);
    mem.put_u32(col + col_data::LISTS_A, array);
    mem.put_u32(col + col_data::LISTS_B, 0);

    for (role, head_off, record_base) in [
        (0u32, col_data::FLOOR_HEAD, 0x8100_0000u32),
        (1, col_data::ROOF_HEAD, 0x8110_0000),
        (2, col_data::WALL_HEAD, 0x8120_0000),
    ] {
        let node_base = 0x8070_0000 + role * 0x10_0000;
        mem.put_u32(array + head_off, node_base);
        for i in 0..surfaces {
            let node = node_base + i * 0x10;
            let record = record_base + i * 0x40;
            let next = if i + 1 < surfaces { node + 0x10 } else { 0 };
            mem.put_u32(node + check_node::NEXT, next);
            mem.put_u32(node + check_node::TARGET, record);

            mem.put_u16(record + surface::TYPE_CODE, if i % 7 == 0 { 0x101 } else { 0 });
            mem.put_u16(record + surface::FLAGS, if i % 2 == 0 { 0x8 } else { 0 });
            for j in 0..9 {
                mem.put_f32(record + surface::VERTICES + j * 4, (i * 9 + j) as f32);
            }
        }
    }

    mem
}

fn bench_extract_frame(c: &mut Criterion) {
    for surfaces in [100u32, 1000] {
        let mem = synthetic_world(surfaces);
        let session = Session::attach(mem, ExtractConfig::default()).unwrap();

        c.bench_function(&format!("extract_frame_{surfaces}_per_role"), |b| {
            b.iter(|| {
                let result = session.extract_frame(black_box(4.0 / 3.0)).unwrap();
                let FrameResult::Frame(frame) = result else {
                    panic!("expected a frame");
                };
                black_box(frame.triangles.len())
            });
        });
    }
}

criterion_group!(benches, bench_extract_frame);
criterion_main!(benches);
