//! Dungeon generation constants.

/// Side length of one grid cell in world units
pub const TILE_SIZE: f32 = 90.0;
/// Default map width in cells (five screens wide)
pub const MAP_WIDTH: usize = 60;
/// Default map height in cells (five screens tall)
pub const MAP_HEIGHT: usize = 40;
/// Number of candidate rooms attempted per dungeon
pub const DUNGEON_ROOM_ATTEMPTS: u32 = 20;
/// Smallest room side in cells
pub const DUNGEON_MIN_ROOM_SIZE: i32 = 3;
/// Largest room side in cells
pub const DUNGEON_MAX_ROOM_SIZE: i32 = 9;
/// Relative weights for a room holding 0, 1 or 2 chests
pub const CHEST_COUNT_WEIGHTS: [f32; 3] = [0.25, 0.55, 0.2];
/// Smallest health/ammo value a chest can hold
pub const CHEST_ITEM_MIN_VALUE: u32 = 10;
/// Largest health/ammo value a chest can hold
pub const CHEST_ITEM_MAX_VALUE: u32 = 80;
/// Chest pickup box side (a tile minus a 20 unit border each way)
pub const CHEST_SIZE: f32 = 50.0;
