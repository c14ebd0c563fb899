use arrayvec::ArrayVec;
use glam::Vec2;

use super::GridError;
use crate::state::TilePos;

/// Read-only walkability oracle consumed by the pathfinder and sensing.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn terrain(&self, position: TilePos) -> Option<TerrainKind>;

    fn contains(&self, position: TilePos) -> bool {
        self.dimensions().contains(position)
    }

    /// Out-of-bounds tiles are never walkable.
    fn is_walkable(&self, position: TilePos) -> bool {
        self.terrain(position).is_some_and(TerrainKind::is_passable)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: TilePos) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub const fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Canonical terrain classes. The level format only distinguishes floor (0) and wall (1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn from_cell(value: u8) -> Option<Self> {
        match value {
            0 => Some(TerrainKind::Floor),
            1 => Some(TerrainKind::Wall),
            _ => None,
        }
    }
}

/// Immutable per-level walkability matrix plus its placement in world space.
///
/// Tile `(x, y)` covers the world rectangle starting at
/// `origin + (x, y) * tile_size`. Rows are indexed by `y`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
    tile_size: f32,
    origin: Vec2,
}

impl TileGrid {
    /// Builds a grid from a rectangular 0/1 matrix (0 = floor, 1 = wall).
    ///
    /// # Errors
    ///
    /// - [`GridError::Empty`] when there are no rows or the first row is empty
    /// - [`GridError::RaggedRow`] when a row length differs from the first row
    /// - [`GridError::InvalidCell`] for values other than 0 or 1
    /// - [`GridError::InvalidTileSize`] when `tile_size` is not a positive finite number
    pub fn from_rows<R: AsRef<[u8]>>(
        rows: &[R],
        tile_size: f32,
        origin: Vec2,
    ) -> Result<Self, GridError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(GridError::InvalidTileSize(tile_size));
        }

        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                let terrain =
                    TerrainKind::from_cell(value).ok_or(GridError::InvalidCell { x, y, value })?;
                tiles.push(terrain);
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, rows.len() as u32),
            tiles,
            tile_size,
            origin,
        })
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Converts a world point to the tile containing it (floor division).
    pub fn world_to_tile(&self, point: Vec2) -> TilePos {
        let local = (point - self.origin) / self.tile_size;
        TilePos::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    /// World-space center of a tile.
    pub fn tile_center(&self, tile: TilePos) -> Vec2 {
        self.origin + (Vec2::new(tile.x as f32, tile.y as f32) + Vec2::splat(0.5)) * self.tile_size
    }

    /// Walkable orthogonal neighbours of `tile`, in east/west/south/north order.
    pub fn walkable_neighbors(&self, tile: TilePos) -> ArrayVec<TilePos, 4> {
        tile.cardinal_neighbors()
            .into_iter()
            .filter(|&n| self.is_walkable(n))
            .collect()
    }

    /// True when the world point lies on a walkable tile.
    pub fn is_walkable_at(&self, point: Vec2) -> bool {
        self.is_walkable(self.world_to_tile(point))
    }

    fn index(&self, position: TilePos) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

impl MapOracle for TileGrid {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn terrain(&self, position: TilePos) -> Option<TerrainKind> {
        self.index(position).and_then(|i| self.tiles.get(i).copied())
    }
}
