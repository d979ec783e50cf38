//! Camera transform derivation
//!
//! The game keeps a live camera record with field of view, clip planes and
//! look-at vectors. The projection/view pair is rebuilt from it every frame
//! so the overlay tracks whatever the game's camera does.

use crate::core::types::{Mat4, Result};
use crate::layout::camera;
use crate::memory::channel::{MemoryView, Ptr};

/// Result of a camera read: matrices, or skip the frame entirely
#[derive(Clone, Copy, Debug)]
pub enum CameraRead {
    Transform { proj: Mat4, view: Mat4 },
    /// Camera record pointer failed the validity sentinel; nothing can be
    /// projected this frame.
    FrameSkip,
}

/// Read the camera record at `record` and derive projection and view.
///
/// The stored field of view is in degrees. The view matrix is a standard
/// right-handed look-at from the record's eye/target/up.
pub fn read(mem: &impl MemoryView, record: Ptr, aspect: f32) -> Result<CameraRead> {
    if !record.is_valid() {
        return Ok(CameraRead::FrameSkip);
    }

    let fov_y = mem.read_f32(record.0 + camera::FOV_Y)?;
    let near = mem.read_f32(record.0 + camera::NEAR)?;
    let far = mem.read_f32(record.0 + camera::FAR)?;
    let proj = Mat4::perspective_rh(fov_y.to_radians(), aspect, near, far);

    let eye = mem.read_vec3(record.0 + camera::EYE)?;
    let target = mem.read_vec3(record.0 + camera::TARGET)?;
    let up = mem.read_vec3(record.0 + camera::UP)?;
    let view = Mat4::look_at_rh(eye, target, up);

    Ok(CameraRead::Transform { proj, view })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::memory::fake::FakeMemory;

    const RECORD: u32 = 0x8050_0000;

    #[test]
    fn test_invalid_record_skips_frame() {
        let mem = FakeMemory::new();
        for record in [Ptr::NULL, Ptr(0x10), Ptr(0x7FFF_FFFF)] {
            assert!(matches!(
                read(&mem, record, 4.0 / 3.0).unwrap(),
                CameraRead::FrameSkip
            ));
        }
        assert_eq!(mem.read_count(), 0);
    }

    #[test]
    fn test_matrices_match_live_fields() {
        let mut mem = FakeMemory::new();
        let eye = Vec3::new(100.0, 400.0, -250.0);
        let target = Vec3::new(0.0, 300.0, 0.0);
        let up = Vec3::Y;
        mem.put_f32(RECORD + camera::FOV_Y, 60.0);
        mem.put_f32(RECORD + camera::NEAR, 10.0);
        mem.put_f32(RECORD + camera::FAR, 30000.0);
        mem.put_vec3(RECORD + camera::EYE, eye);
        mem.put_vec3(RECORD + camera::TARGET, target);
        mem.put_vec3(RECORD + camera::UP, up);

        let CameraRead::Transform { proj, view } = read(&mem, Ptr(RECORD), 16.0 / 9.0).unwrap()
        else {
            panic!("expected a transform");
        };
        assert_eq!(
            proj,
            Mat4::perspective_rh(60.0_f32.to_radians(), 16.0 / 9.0, 10.0, 30000.0)
        );
        assert_eq!(view, Mat4::look_at_rh(eye, target, up));
    }

    #[test]
    fn test_unmapped_record_is_transient_failure() {
        let mem = FakeMemory::new();
        assert!(read(&mem, Ptr(RECORD), 1.0).is_err());
    }
}
