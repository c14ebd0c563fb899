//! Grid route planning for chasing agents.
//!
//! Routes are recomputed on demand every tick an agent chases; nothing is
//! cached between ticks.
mod astar;

use glam::Vec2;

use crate::env::{MapOracle, TileGrid};
use crate::state::TilePos;

/// Outcome of a route request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathPlan {
    /// `start == goal`; there is nothing to walk.
    Arrived,
    /// Tiles from `start` (exclusive) to `goal` (inclusive).
    Route(Vec<TilePos>),
    /// The goal is out of bounds, a wall, or disconnected from `start`.
    Unreachable,
}

impl PathPlan {
    pub fn is_reachable(&self) -> bool {
        !matches!(self, PathPlan::Unreachable)
    }

    /// Tiles to walk; empty for both `Arrived` and `Unreachable`.
    pub fn into_tiles(self) -> Vec<TilePos> {
        match self {
            PathPlan::Route(tiles) => tiles,
            PathPlan::Arrived | PathPlan::Unreachable => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PathPlan::Route(tiles) => tiles.len(),
            PathPlan::Arrived | PathPlan::Unreachable => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Plans a route from `start` to `goal`, distinguishing "already there" from
/// "no route".
pub fn plan_path<M>(map: &M, start: TilePos, goal: TilePos) -> PathPlan
where
    M: MapOracle + ?Sized,
{
    if start == goal {
        return PathPlan::Arrived;
    }
    if !map.is_walkable(start) || !map.is_walkable(goal) {
        return PathPlan::Unreachable;
    }
    match astar::search(map, start, goal) {
        Some(tiles) => PathPlan::Route(tiles),
        None => PathPlan::Unreachable,
    }
}

/// Single-list form of [`plan_path`]: an empty result means either
/// `start == goal` or no route. Callers that need to tell the two apart
/// should use [`plan_path`].
pub fn find_path<M>(map: &M, start: TilePos, goal: TilePos) -> Vec<TilePos>
where
    M: MapOracle + ?Sized,
{
    plan_path(map, start, goal).into_tiles()
}

/// Maps each tile of a route to its world-space center.
pub fn path_to_world(grid: &TileGrid, tiles: &[TilePos]) -> Vec<Vec2> {
    tiles.iter().map(|&tile| grid.tile_center(tile)).collect()
}
