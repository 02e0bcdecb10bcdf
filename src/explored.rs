use rustc_hash::FxHashMap;

use crate::error::SearchError;
use crate::maze::Cell;

// Cells expanded in the current leg, each mapped to the cell it was reached
// from. The leg's start maps to None. Doubles as the closed set.
#[derive(Debug, Default)]
pub struct Explored {
    came_from: FxHashMap<Cell, Option<Cell>>,
}

impl Explored {
    // A fresh leg anchored at `start`.
    pub fn new(start: Cell) -> Self {
        let mut came_from = FxHashMap::default();
        came_from.insert(start, None);
        Explored { came_from }
    }

    pub fn mark_visited(
        &mut self, cell: Cell, parent: Option<Cell>
        ) -> Result<(), SearchError> {
        if self.came_from.contains_key(&cell) {
            return Err(SearchError::AlreadyVisited(cell));
        }
        self.came_from.insert(cell, parent);
        Ok(())
    }

    #[inline]
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.came_from.contains_key(&cell)
    }

    pub fn parent_of(&self, cell: Cell) -> Result<Option<Cell>, SearchError> {
        self.came_from.get(&cell).copied().ok_or(SearchError::UnknownCell(cell))
    }

    pub fn len(&self) -> usize {
        self.came_from.len()
    }

    pub fn is_empty(&self) -> bool {
        self.came_from.is_empty()
    }
}
