// Turning a leg's parent links into a path, and checking finished paths
// against the grid.
use itertools::Itertools;

use crate::error::SearchError;
use crate::explored::Explored;
use crate::maze::{Cell, Grid};

/// Walks parent links back from `reached` to `leg_start`, and returns the
/// cells in start-to-reached order (both ends included).
pub fn reconstruct(
    reached: Cell, leg_start: Cell, explored: &Explored
    ) -> Result<Vec<Cell>, SearchError> {
    let broken = || SearchError::BrokenChain { from: reached, to: leg_start };
    let mut steps = vec![reached];
    let mut current = reached;
    while current != leg_start {
        // A valid chain can't be longer than the map itself.
        if steps.len() > explored.len() {
            return Err(broken());
        }
        current = explored.parent_of(current)?.ok_or_else(broken)?;
        steps.push(current);
    }
    steps.reverse();
    Ok(steps)
}

/// Checks that `path` starts at the grid's start and only moves between
/// neighbors. An empty path (no solution) is valid.
pub fn validate<G: Grid>(grid: &G, path: &[Cell]) -> Result<(), SearchError> {
    let Some(&first) = path.first() else {
        return Ok(());
    };
    if first != grid.start() {
        return Err(SearchError::WrongStart { expected: grid.start(), found: first });
    }
    for (from, to) in path.iter().copied().tuple_windows() {
        if !grid.neighbors(from)?.contains(&to) {
            return Err(SearchError::InvalidStep { from, to });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    fn chain(cells: &[(u16, u16)]) -> Explored {
        let mut explored = Explored::new(Cell::new(cells[0].0, cells[0].1));
        for pair in cells.windows(2) {
            let parent = Cell::new(pair[0].0, pair[0].1);
            explored.mark_visited(Cell::new(pair[1].0, pair[1].1), Some(parent)).unwrap();
        }
        explored
    }

    #[test]
    fn test_reconstruct() {
        let explored = chain(&[(0, 0), (0, 1), (1, 1), (2, 1)]);
        let path = reconstruct(Cell::new(2, 1), Cell::new(0, 0), &explored).unwrap();
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)]);
        let path = reconstruct(Cell::new(0, 1), Cell::new(0, 0), &explored).unwrap();
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn test_reconstruct_zero_length() {
        let explored = Explored::new(Cell::new(3, 3));
        assert_eq!(reconstruct(Cell::new(3, 3), Cell::new(3, 3), &explored),
                   Ok(vec![Cell::new(3, 3)]));
    }

    #[test]
    fn test_reconstruct_wrong_start() {
        // Walks back to the root (0, 0), which has no parent, without meeting
        // (5, 5).
        let explored = chain(&[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(reconstruct(Cell::new(1, 1), Cell::new(5, 5), &explored),
                   Err(SearchError::BrokenChain { from: Cell::new(1, 1), to: Cell::new(5, 5) }));
    }

    #[test]
    fn test_reconstruct_cycle() {
        let mut explored = Explored::default();
        explored.mark_visited(Cell::new(0, 1), Some(Cell::new(0, 2))).unwrap();
        explored.mark_visited(Cell::new(0, 2), Some(Cell::new(0, 1))).unwrap();
        assert_eq!(reconstruct(Cell::new(0, 1), Cell::new(0, 0), &explored),
                   Err(SearchError::BrokenChain { from: Cell::new(0, 1), to: Cell::new(0, 0) }));
    }

    #[test]
    fn test_reconstruct_unknown_cell() {
        let explored = chain(&[(0, 0), (0, 1)]);
        assert_eq!(reconstruct(Cell::new(4, 4), Cell::new(0, 0), &explored),
                   Err(SearchError::UnknownCell(Cell::new(4, 4))));
    }

    #[test]
    fn test_validate() {
        let maze: Maze = "P %\n  .\n".parse().unwrap();
        let good = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)];
        assert_eq!(validate(&maze, &good), Ok(()));
        assert_eq!(validate(&maze, &[]), Ok(()));
        assert_eq!(validate(&maze, &good[1..]),
                   Err(SearchError::WrongStart { expected: Cell::new(0, 0), found: Cell::new(1, 0) }));
        let jump = [Cell::new(0, 0), Cell::new(1, 1)];
        assert_eq!(validate(&maze, &jump),
                   Err(SearchError::InvalidStep { from: Cell::new(0, 0), to: Cell::new(1, 1) }));
        let into_wall = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)];
        assert_eq!(validate(&maze, &into_wall),
                   Err(SearchError::InvalidStep { from: Cell::new(0, 1), to: Cell::new(0, 2) }));
        let stutter = [Cell::new(0, 0), Cell::new(0, 0)];
        assert_eq!(validate(&maze, &stutter),
                   Err(SearchError::InvalidStep { from: Cell::new(0, 0), to: Cell::new(0, 0) }));
    }
}
