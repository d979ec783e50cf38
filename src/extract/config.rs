//! Extraction configuration

/// Tunables for scene extraction
#[derive(Clone, Copy, Debug)]
pub struct ExtractConfig {
    /// Segments used to approximate the player hitbox cylinder
    pub hitbox_sides: u32,
    /// Hitbox cylinder radius, world units
    pub hitbox_radius: f32,
    /// Hitbox cylinder height, world units
    pub hitbox_height: f32,
    /// Slots scanned in the trigger cube group pointer array
    pub cube_array_slots: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            hitbox_sides: 12,
            hitbox_radius: 50.0,
            hitbox_height: 160.0,
            cube_array_slots: 8,
        }
    }
}
