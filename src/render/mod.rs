//! Rendering of the extracted scene
//!
//! Consumes the per-frame matrices and tagged triangle bag and draws them
//! over a cleared background. All classification and geometry work happens
//! upstream in `extract`; this layer only uploads and shades.

pub mod context;
pub mod pipeline;

pub use context::GpuContext;
pub use pipeline::ScenePipeline;
