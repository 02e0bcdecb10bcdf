// Open sets for the search driver: a FIFO queue for breadth-first search and a
// decrease-key priority queue for informed search.
use priority_queue::PriorityQueue;
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::error::SearchError;
use crate::maze::Cell;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Entry {
    // f = g + h for informed search, g alone (the depth) for breadth-first.
    pub priority: u32,
    pub cell: Cell,
    pub parent: Cell,
}

/// Discovered cells waiting to be expanded. Holds at most one entry per cell.
pub trait Frontier {
    /// Fails with `DuplicateEntry` if the cell is already queued, use
    /// `decrease` to replace an entry.
    fn insert(&mut self, entry: Entry) -> Result<(), SearchError>;

    /// Next entry to expand. `FrontierEmpty` means there is nothing left to
    /// explore.
    fn pop_min(&mut self) -> Result<Entry, SearchError>;

    /// Priority and parent of the queued entry for `cell`, if any.
    fn contains(&self, cell: Cell) -> Option<(u32, Cell)>;

    /// Replaces the entry for `cell` with a strictly cheaper one.
    fn decrease(
        &mut self, cell: Cell, priority: u32, parent: Cell
        ) -> Result<(), SearchError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Expansion order is insertion order. Since breadth-first depths only grow,
// a queued entry is never beaten by a later candidate and `decrease` always
// fails.
#[derive(Default)]
pub struct FifoFrontier {
    queue: VecDeque<Entry>,
    queued: FxHashMap<Cell, (u32, Cell)>,
}

impl Frontier for FifoFrontier {
    fn insert(&mut self, entry: Entry) -> Result<(), SearchError> {
        if self.queued.contains_key(&entry.cell) {
            return Err(SearchError::DuplicateEntry(entry.cell));
        }
        self.queued.insert(entry.cell, (entry.priority, entry.parent));
        self.queue.push_back(entry);
        Ok(())
    }

    fn pop_min(&mut self) -> Result<Entry, SearchError> {
        let entry = self.queue.pop_front().ok_or(SearchError::FrontierEmpty)?;
        self.queued.remove(&entry.cell);
        Ok(entry)
    }

    fn contains(&self, cell: Cell) -> Option<(u32, Cell)> {
        self.queued.get(&cell).copied()
    }

    fn decrease(
        &mut self, cell: Cell, priority: u32, _parent: Cell
        ) -> Result<(), SearchError> {
        match self.queued.get(&cell) {
            Some(&(queued, _)) => Err(SearchError::IllegalDecrease {
                cell, queued, proposed: priority }),
            None => Err(SearchError::UnknownCell(cell)),
        }
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

// Lowest f first. Equal f-values come out in insertion order, with a decrease
// counting as a new insertion. The sequence number is part of the key so the
// order never depends on the heap's internals.
pub struct PriorityFrontier {
    queue: PriorityQueue<Cell, Reverse<(u32, u64)>>,
    parents: FxHashMap<Cell, Cell>,
    sequence: u64,
}

impl Default for PriorityFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityFrontier {
    pub fn new() -> Self {
        PriorityFrontier {
            queue: PriorityQueue::new(),
            parents: FxHashMap::default(),
            sequence: 0,
        }
    }

    fn next_key(&mut self, priority: u32) -> Reverse<(u32, u64)> {
        self.sequence += 1;
        Reverse((priority, self.sequence))
    }
}

impl Frontier for PriorityFrontier {
    fn insert(&mut self, entry: Entry) -> Result<(), SearchError> {
        if self.queue.get_priority(&entry.cell).is_some() {
            return Err(SearchError::DuplicateEntry(entry.cell));
        }
        let key = self.next_key(entry.priority);
        self.queue.push(entry.cell, key);
        self.parents.insert(entry.cell, entry.parent);
        Ok(())
    }

    fn pop_min(&mut self) -> Result<Entry, SearchError> {
        let (cell, Reverse((priority, _))) = self.queue.pop()
            .ok_or(SearchError::FrontierEmpty)?;
        let parent = self.parents.remove(&cell)
            .ok_or(SearchError::UnknownCell(cell))?;
        Ok(Entry { priority, cell, parent })
    }

    fn contains(&self, cell: Cell) -> Option<(u32, Cell)> {
        let Reverse((priority, _)) = self.queue.get_priority(&cell)?;
        self.parents.get(&cell).map(|&parent| (*priority, parent))
    }

    fn decrease(
        &mut self, cell: Cell, priority: u32, parent: Cell
        ) -> Result<(), SearchError> {
        let (queued, _) = self.contains(cell).ok_or(SearchError::UnknownCell(cell))?;
        if priority >= queued {
            return Err(SearchError::IllegalDecrease { cell, queued, proposed: priority });
        }
        let key = self.next_key(priority);
        self.queue.change_priority(&cell, key);
        self.parents.insert(cell, parent);
        Ok(())
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
