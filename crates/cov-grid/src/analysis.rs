//! Static reachability analysis over the wall mask.
//!
//! Agents ignore each other here: these are properties of the empty region,
//! used to size runs (`n` = reachable cells) and to pick a good source cell.

use std::collections::VecDeque;

use cov_core::Cell;

use crate::GridMap;

impl GridMap {
    /// Breadth-first step distance from `start` to every cell, row-major.
    ///
    /// Walls and cells unreachable from `start` are `None`.  If `start` is a
    /// wall every entry is `None`.
    pub fn distances_from(&self, start: Cell) -> Vec<Option<u32>> {
        let mut dist: Vec<Option<u32>> = vec![None; self.width() * self.height()];
        if self.is_wall(start) {
            return dist;
        }
        let index = |c: Cell| c.y as usize * self.width() + c.x as usize;

        dist[index(start)] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            let d = dist[index(cell)].unwrap_or(0);
            for next in cell.neighbours() {
                if self.is_wall(next) || dist[index(next)].is_some() {
                    continue;
                }
                dist[index(next)] = Some(d + 1);
                queue.push_back(next);
            }
        }
        dist
    }

    /// Number of non-wall cells reachable from the source, the source
    /// included.  Upper bound on how many agents the region can hold.
    pub fn reachable_free_cells(&self) -> usize {
        self.distances_from(self.source())
            .iter()
            .filter(|d| d.is_some())
            .count()
    }

    /// The reachable cell whose farthest reachable cell is closest.
    ///
    /// Ties are broken by row-major order.  Quadratic in the number of open
    /// cells; intended for map preparation, not the tick loop.
    pub fn geometric_center(&self) -> Option<Cell> {
        let reachable: Vec<Cell> = self
            .distances_from(self.source())
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_some())
            .map(|(i, _)| self.cell_at(i))
            .collect();

        let mut best: Option<(u32, Cell)> = None;
        for &candidate in &reachable {
            let eccentricity = self
                .distances_from(candidate)
                .iter()
                .filter_map(|d| *d)
                .max()
                .unwrap_or(0);
            if best.is_none_or(|(e, _)| eccentricity < e) {
                best = Some((eccentricity, candidate));
            }
        }
        best.map(|(_, c)| c)
    }
}
