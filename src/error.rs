use thiserror::Error;

use crate::maze::{Cell, MazeError};

// Apart from FrontierEmpty, which the search driver turns into an empty path,
// all of these mean a caller or an internal invariant is broken.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("The frontier is empty")]
    FrontierEmpty,
    #[error("No objectives to search for")]
    EmptyObjectives,
    #[error("Cell {0} was never visited in this leg")]
    UnknownCell(Cell),
    #[error("Cell {0} was already visited in this leg")]
    AlreadyVisited(Cell),
    #[error("Cell {0} already has an entry in the frontier")]
    DuplicateEntry(Cell),
    #[error("Cannot move {cell} from priority {queued} to {proposed}, only decreases are allowed")]
    IllegalDecrease { cell: Cell, queued: u32, proposed: u32 },
    #[error("Parent chain from {from} never reaches {to}")]
    BrokenChain { from: Cell, to: Cell },
    #[error("Path steps from {from} to {to}, which are not neighbors")]
    InvalidStep { from: Cell, to: Cell },
    #[error("Path starts at {found} instead of {expected}")]
    WrongStart { expected: Cell, found: Cell },
    #[error("Grid error ({0})")]
    Grid(#[from] MazeError),
}
