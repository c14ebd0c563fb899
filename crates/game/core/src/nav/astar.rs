use crate::env::{MapDimensions, MapOracle};
use crate::state::TilePos;

#[derive(Clone, Copy, Debug)]
struct OpenNode {
    tile: TilePos,
    cost: u32,
    estimate: u32,
}

impl OpenNode {
    fn score(&self) -> u32 {
        self.cost + self.estimate
    }
}

/// Dense per-tile bookkeeping for one search.
struct SearchTable {
    dimensions: MapDimensions,
    best_cost: Vec<u32>,
    came_from: Vec<Option<TilePos>>,
    closed: Vec<bool>,
}

impl SearchTable {
    fn new(dimensions: MapDimensions) -> Self {
        let count = dimensions.tile_count();
        Self {
            dimensions,
            best_cost: vec![u32::MAX; count],
            came_from: vec![None; count],
            closed: vec![false; count],
        }
    }

    fn index(&self, tile: TilePos) -> usize {
        tile.y as usize * self.dimensions.width as usize + tile.x as usize
    }
}

/// Four-directional A* with unit step cost and a Manhattan heuristic.
///
/// The open set is a plain vector scanned linearly for the lowest score; among
/// equal scores the node discovered first wins. Returns the tiles after `start`
/// up to and including `goal`, or `None` when the goal cannot be reached.
/// `start` and `goal` must both be walkable and distinct.
pub(super) fn search<M>(map: &M, start: TilePos, goal: TilePos) -> Option<Vec<TilePos>>
where
    M: MapOracle + ?Sized,
{
    let mut table = SearchTable::new(map.dimensions());
    let mut open = vec![OpenNode {
        tile: start,
        cost: 0,
        estimate: start.manhattan(goal),
    }];
    let start_index = table.index(start);
    table.best_cost[start_index] = 0;

    while !open.is_empty() {
        let mut best = 0;
        for (i, node) in open.iter().enumerate().skip(1) {
            if node.score() < open[best].score() {
                best = i;
            }
        }
        // `remove` keeps discovery order for the tie-break above
        let current = open.remove(best);
        if current.tile == goal {
            return Some(reconstruct(&table, start, goal));
        }

        let current_index = table.index(current.tile);
        if table.closed[current_index] {
            continue;
        }
        table.closed[current_index] = true;

        for neighbor in current.tile.cardinal_neighbors() {
            if !map.is_walkable(neighbor) {
                continue;
            }
            let index = table.index(neighbor);
            let cost = current.cost + 1;
            if table.closed[index] || cost >= table.best_cost[index] {
                continue;
            }
            table.best_cost[index] = cost;
            table.came_from[index] = Some(current.tile);

            match open.iter_mut().find(|node| node.tile == neighbor) {
                Some(node) => node.cost = cost,
                None => open.push(OpenNode {
                    tile: neighbor,
                    cost,
                    estimate: neighbor.manhattan(goal),
                }),
            }
        }
    }

    None
}

fn reconstruct(table: &SearchTable, start: TilePos, goal: TilePos) -> Vec<TilePos> {
    let mut path = Vec::new();
    let mut cursor = goal;
    while cursor != start {
        path.push(cursor);
        match table.came_from[table.index(cursor)] {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    path.reverse();
    path
}
