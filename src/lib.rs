//! Colview - live collision geometry viewer
//!
//! Reconstructs a running game's hidden collision world every frame by
//! reading the emulator's memory directly: floors, roofs, walls, water,
//! trigger cubes and the player hitbox, drawn in the game's own coordinate
//! space through its own camera.

pub mod core;
pub mod memory;
pub mod layout;
pub mod extract;
pub mod render;
