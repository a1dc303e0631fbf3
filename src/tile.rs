/// Cell tag produced by the dungeon generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Wall,
    Floor,
    /// Floor cell holding an unopened chest
    Chest,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        !matches!(self, TileType::Wall)
    }
}

impl Default for TileType {
    fn default() -> Self {
        TileType::Wall
    }
}
