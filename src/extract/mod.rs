//! Live scene extraction pipeline
//!
//! Re-derives the target's collision scene from scratch every frame: walks
//! the check lists and cube group arrays out of foreign memory, classifies
//! the records they reference, and flattens everything into one tagged
//! triangle bag plus the camera's projection/view matrices. Nothing is
//! cached across frames except the resolved base addresses in [`Session`].

pub mod checklist;
pub mod surface;
pub mod cubes;
pub mod scene;
pub mod camera;
pub mod config;
pub mod session;

pub use config::ExtractConfig;
pub use scene::TaggedTriangle;
pub use session::{FrameResult, SceneFrame, Session};
pub use surface::SurfaceKind;
