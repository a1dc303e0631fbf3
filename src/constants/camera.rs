//! Screen-related constants.

/// Screen width in world units (pixels at 1:1)
pub const SCREEN_WIDTH: f32 = 1080.0;
/// Screen height in world units
pub const SCREEN_HEIGHT: f32 = 720.0;
/// Simulation steps per second used by the headless driver
pub const FRAMES_PER_SECOND: u32 = 60;
