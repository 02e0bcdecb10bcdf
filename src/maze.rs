// Grid adapter consumed by the search engine, and a text maze implementing it.
use arrayvec::ArrayVec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Ord, PartialOrd, Copy, Clone)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

impl Cell {
    pub fn new(row: u16, col: u16) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// Room for 8-connected adapters, the text maze only fills 4.
pub type Neighbors = ArrayVec<Cell, 8>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MazeError {
    #[error("Cell {0} is outside of the maze")]
    OutOfBounds(Cell),
    #[error("Unexpected character {found:?} at row {row}, column {col}")]
    UnexpectedCharacter { found: char, row: usize, col: usize },
    #[error("Row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("The maze has no start cell ('P')")]
    MissingStart,
    #[error("The maze has more than one start cell, second one at {0}")]
    MultipleStarts(Cell),
    #[error("The maze has no objectives ('.')")]
    MissingObjectives,
    #[error("The maze is empty")]
    Empty,
    #[error("The maze is too large: {rows}x{cols}")]
    TooLarge { rows: usize, cols: usize },
    #[error("Need {needed} open cells, only {available} available")]
    NotEnoughFloor { needed: usize, available: usize },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed reading {path} ({source})")]
    Read { path: String, #[source] source: io::Error },
    #[error(transparent)]
    Invalid(#[from] MazeError),
}

/// What the search engine needs to know about the terrain.
///
/// `neighbors` must be symmetric for returned paths to be walkable both ways,
/// the engine does not check it.
pub trait Grid {
    fn start(&self) -> Cell;

    // Non-empty. Duplicates are tolerated and treated as one objective.
    fn objectives(&self) -> Vec<Cell>;

    fn neighbors(&self, cell: Cell) -> Result<Neighbors, MazeError>;
}

const WALL: char = '%';
const START: char = 'P';
const OBJECTIVE: char = '.';
const FLOOR: char = ' ';
const TRAIL: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: u16,
    cols: u16,
    // walls[row][col]
    walls: Vec<Vec<bool>>,
    start: Cell,
    objectives: Vec<Cell>,
}

impl Maze {
    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| LoadError::Read { path: path.to_string(), source })?;
        Ok(text.parse()?)
    }

    // Random maze with a wall border. Some objectives may end up walled off.
    pub fn generate(
        rows: u16, cols: u16, wall_ratio: f32, objectives: usize, seed: u64
        ) -> Result<Self, MazeError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let walls: Vec<Vec<bool>> = (0..rows).map(|row| (0..cols).map(|col| {
            let border = row == 0 || col == 0 || row + 1 == rows || col + 1 == cols;
            border || rng.gen::<f32>() < wall_ratio
        }).collect()).collect();

        let mut floor: Vec<Cell> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .filter(|cell| !walls[cell.row as usize][cell.col as usize])
            .collect();
        if floor.len() < objectives + 1 {
            return Err(MazeError::NotEnoughFloor {
                needed: objectives + 1, available: floor.len() });
        }
        floor.shuffle(&mut rng);
        Ok(Maze {
            rows,
            cols,
            walls,
            start: floor[0],
            objectives: floor[1..=objectives].to_vec(),
        })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    // Anything outside the maze counts as wall.
    pub fn is_wall(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.walls[cell.row as usize][cell.col as usize]
    }

    pub fn render(&self, path: &[Cell]) -> String {
        let mut canvas: Vec<Vec<char>> = self.walls.iter()
            .map(|row| row.iter().map(|&wall| if wall { WALL } else { FLOOR }).collect())
            .collect();
        for cell in path {
            canvas[cell.row as usize][cell.col as usize] = TRAIL;
        }
        for cell in &self.objectives {
            canvas[cell.row as usize][cell.col as usize] = OBJECTIVE;
        }
        canvas[self.start.row as usize][self.start.col as usize] = START;
        canvas.iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Grid for Maze {
    fn start(&self) -> Cell {
        self.start
    }

    fn objectives(&self) -> Vec<Cell> {
        self.objectives.clone()
    }

    fn neighbors(&self, cell: Cell) -> Result<Neighbors, MazeError> {
        if !self.in_bounds(cell) {
            return Err(MazeError::OutOfBounds(cell));
        }
        // up, down, left, right
        const DELTAS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        Ok(DELTAS.iter().filter_map(|&(dr, dc)| {
            let row = cell.row as i32 + dr;
            let col = cell.col as i32 + dc;
            if row < 0 || col < 0 {
                return None;
            }
            let neighbor = Cell::new(row as u16, col as u16);
            if !self.is_wall(neighbor) {
                Some(neighbor)
            } else {
                None
            }
        }).collect())
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        // A row of spaces is open floor, only truly empty trailing lines go.
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().map_or(false, |line| line.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(MazeError::Empty);
        }
        let width = lines[0].chars().count();
        if lines.len() > u16::MAX as usize || width > u16::MAX as usize {
            return Err(MazeError::TooLarge { rows: lines.len(), cols: width });
        }

        let mut walls = Vec::with_capacity(lines.len());
        let mut start: Option<Cell> = None;
        let mut objectives = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeError::RaggedRow { row, expected: width, found });
            }
            let mut row_walls = Vec::with_capacity(width);
            for (col, c) in line.chars().enumerate() {
                let cell = Cell::new(row as u16, col as u16);
                match c {
                    WALL => {},
                    START => {
                        if start.is_some() {
                            return Err(MazeError::MultipleStarts(cell));
                        }
                        start = Some(cell);
                    },
                    OBJECTIVE => objectives.push(cell),
                    FLOOR => {},
                    found => return Err(
                        MazeError::UnexpectedCharacter { found, row, col }),
                }
                row_walls.push(c == WALL);
            }
            walls.push(row_walls);
        }

        let start = start.ok_or(MazeError::MissingStart)?;
        if objectives.is_empty() {
            return Err(MazeError::MissingObjectives);
        }
        Ok(Maze {
            rows: lines.len() as u16,
            cols: width as u16,
            walls,
            start,
            objectives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
%%%%%
%P  %
% %.%
%%%%%
";

    #[test]
    fn test_parse() {
        let maze: Maze = SMALL.parse().unwrap();
        assert_eq!(maze.rows(), 4);
        assert_eq!(maze.cols(), 5);
        assert_eq!(maze.start(), Cell::new(1, 1));
        assert_eq!(maze.objectives(), vec![Cell::new(2, 3)]);
        assert!(maze.is_wall(Cell::new(2, 2)));
        assert!(!maze.is_wall(Cell::new(2, 1)));
        assert!(maze.is_wall(Cell::new(4, 0)));
        assert!(maze.is_wall(Cell::new(0, 9)));
    }

    #[test]
    fn test_parse_keeps_trailing_floor_rows() {
        let maze: Maze = "P .\n   \n   \n\n".parse().unwrap();
        assert_eq!(maze.rows(), 3);
        assert_eq!(maze.cols(), 3);
        assert!(!maze.is_wall(Cell::new(2, 1)));
        let maze: Maze = "P .\r\n   \r\n".parse().unwrap();
        assert_eq!(maze.rows(), 2);
    }

    #[test]
    fn test_from_file() {
        let maze = Maze::from_file("mazes/single.txt").unwrap();
        assert_eq!(maze.objectives().len(), 1);
        let err = Maze::from_file("mazes/does_not_exist.txt").unwrap_err();
        assert!(matches!(&err, LoadError::Read { path, .. } if path == "mazes/does_not_exist.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse_windows_line_endings() {
        let maze: Maze = SMALL.replace('\n', "\r\n").parse().unwrap();
        assert_eq!(maze.cols(), 5);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Maze>(), Err(MazeError::Empty));
        assert_eq!("%%%\n%P.%\n".parse::<Maze>(),
                   Err(MazeError::RaggedRow { row: 1, expected: 3, found: 4 }));
        assert_eq!("%%%\n% .\n".parse::<Maze>(), Err(MazeError::MissingStart));
        assert_eq!("P P\n...\n".parse::<Maze>(),
                   Err(MazeError::MultipleStarts(Cell::new(0, 2))));
        assert_eq!("P  \n".parse::<Maze>(), Err(MazeError::MissingObjectives));
        assert_eq!("P#.\n".parse::<Maze>(),
                   Err(MazeError::UnexpectedCharacter { found: '#', row: 0, col: 1 }));
    }

    #[test]
    fn test_neighbors_order_and_walls() {
        let maze: Maze = SMALL.parse().unwrap();
        let neighbors = maze.neighbors(Cell::new(1, 2)).unwrap();
        // up and down are walls
        assert_eq!(neighbors.as_slice(), &[Cell::new(1, 1), Cell::new(1, 3)]);
        let neighbors = maze.neighbors(Cell::new(1, 3)).unwrap();
        assert_eq!(neighbors.as_slice(), &[Cell::new(2, 3), Cell::new(1, 2)]);
    }

    #[test]
    fn test_neighbors_at_edges() {
        let maze: Maze = "P .\n   \n".parse().unwrap();
        let neighbors = maze.neighbors(Cell::new(0, 0)).unwrap();
        assert_eq!(neighbors.as_slice(), &[Cell::new(1, 0), Cell::new(0, 1)]);
        assert_eq!(maze.neighbors(Cell::new(2, 0)),
                   Err(MazeError::OutOfBounds(Cell::new(2, 0))));
    }

    #[test]
    fn test_render() {
        let maze: Maze = SMALL.parse().unwrap();
        let path = [Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 3), Cell::new(2, 3)];
        assert_eq!(maze.render(&path), "%%%%%\n%P**%\n% %.%\n%%%%%");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = Maze::generate(12, 20, 0.2, 3, 7).unwrap();
        let b = Maze::generate(12, 20, 0.2, 3, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.objectives().len(), 3);
        assert!(!a.is_wall(a.start()));
        assert!(a.objectives().iter().all(|&o| !a.is_wall(o) && o != a.start()));
        assert!((0..a.cols()).all(|col| a.is_wall(Cell::new(0, col))));
    }

    #[test]
    fn test_generate_not_enough_floor() {
        assert_eq!(Maze::generate(3, 3, 0.0, 1, 0),
                   Err(MazeError::NotEnoughFloor { needed: 2, available: 1 }));
    }
}
