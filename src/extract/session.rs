//! Attached session and the per-frame extraction entry point
//!
//! A [`Session`] owns the memory channel and the four base addresses
//! resolved from the revision fingerprint, the only state that survives
//! across frames. Everything else is re-derived from scratch by
//! [`Session::extract_frame`].


use crate::core::error::Error;
use crate::core::types::{Mat4, Result, Vec3};
use crate::extract::camera::{self, CameraRead};
use crate::extract::config::ExtractConfig;
use crate::extract::cubes;
use crate::extract::scene::{self, RoleHeads, TaggedTriangle};
use crate::layout::{self, RevisionLayout, col_data, player};
use crate::memory::channel::MemoryView;

/// Everything the renderer needs for one frame
#[derive(Clone, Debug)]
pub struct SceneFrame {
    pub proj: Mat4,
    pub view: Mat4,
    pub triangles: Vec<TaggedTriangle>,
}

/// Outcome of one extraction pass
#[derive(Clone, Debug)]
pub enum FrameResult {
    Frame(SceneFrame),
    /// Camera was unreadable this frame; render nothing. The host decides
    /// whether to keep the previous image or clear.
    Skipped,
}

/// An attached target: memory channel plus resolved base addresses
pub struct Session<M: MemoryView> {
    mem: M,
    revision: RevisionLayout,
    config: ExtractConfig,
}

impl<M: MemoryView> Session<M> {
    /// Validate the target and resolve its revision layout.
    ///
    /// Fails with [`Error::WrongGame`] when the identity bytes don't match
    /// and [`Error::UnknownRevision`] when the fingerprint is not in the
    /// table; either way no session exists and the caller stays detached.
    pub fn attach(mem: M, config: ExtractConfig) -> Result<Self> {
        let id = [
            mem.read_u8(layout::GAME_ID_ADDR)?,
            mem.read_u8(layout::GAME_ID_ADDR + 1)?,
            mem.read_u8(layout::GAME_ID_ADDR + 2)?,
        ];
        if id != layout::GAME_ID {
            return Err(Error::WrongGame);
        }

        let fingerprint = mem.read_u8(layout::FINGERPRINT_ADDR)?;
        let revision =
            RevisionLayout::for_fingerprint(fingerprint).ok_or(Error::UnknownRevision(fingerprint))?;
        log::info!("revision fingerprint {fingerprint:#04x} resolved");
        Ok(Self { mem, revision, config })
    }

    /// The underlying memory channel
    pub fn mem(&self) -> &M {
        &self.mem
    }

    /// Run one full extraction pass.
    ///
    /// Returns [`FrameResult::Skipped`] when the camera pointer fails the
    /// validity sentinel (level transition, menu). Any read error aborts
    /// the whole pass; the caller renders nothing and retries next frame
    /// from scratch.
    pub fn extract_frame(&self, aspect: f32) -> Result<FrameResult> {
        let camera_record = self.mem.read_ptr(self.revision.camera_ptr_slot.0)?;
        let (proj, view) = match camera::read(&self.mem, camera_record, aspect)? {
            CameraRead::Transform { proj, view } => (proj, view),
            CameraRead::FrameSkip => return Ok(FrameResult::Skipped),
        };

        let heads = self.gather_heads()?;
        let cube_volumes = cubes::collect(
            &self.mem,
            self.revision.cube_array_base,
            self.config.cube_array_slots,
        )?;
        let player_pos = self.read_player_position()?;

        let triangles = scene::build(&self.mem, &heads, &cube_volumes, player_pos, &self.config)?;
        Ok(FrameResult::Frame(SceneFrame { proj, view, triangles }))
    }

    /// Gather check list heads for all three roles from both head arrays.
    ///
    /// The two arrays can reference overlapping chains; they are unioned
    /// unconditionally and deduplication happens at the target level during
    /// traversal.
    fn gather_heads(&self) -> Result<RoleHeads> {
        let mut heads = RoleHeads::default();

        let col = self.mem.read_ptr(self.revision.col_data_ptr_slot.0)?;
        if !col.is_valid() {
            return Ok(heads);
        }

        let count = self.mem.read_u32(col.0 + col_data::LIST_COUNT)?;
        let arrays = [
            self.mem.read_ptr(col.0 + col_data::LISTS_A)?,
            self.mem.read_ptr(col.0 + col_data::LISTS_B)?,
        ];

        for array in arrays.into_iter().filter(|a| a.is_valid()) {
            for i in 0..count {
                let entry = array.0 + i * col_data::ENTRY_STRIDE;
                heads.floors.push(self.mem.read_ptr(entry + col_data::FLOOR_HEAD)?);
                heads.roofs.push(self.mem.read_ptr(entry + col_data::ROOF_HEAD)?);
                heads.walls.push(self.mem.read_ptr(entry + col_data::WALL_HEAD)?);
            }
        }
        Ok(heads)
    }

    /// Dereference the player record and read its position, or `None` when
    /// the pointer fails the sentinel.
    fn read_player_position(&self) -> Result<Option<Vec3>> {
        let record = self.mem.read_ptr(self.revision.player_ptr_slot.0)?;
        if !record.is_valid() {
            return Ok(None);
        }
        Ok(Some(self.mem.read_vec3(record.0 + player::POSITION)?))
    }
}
