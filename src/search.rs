// Multi-objective search driver.
//
// A run is a chain of legs. Each leg is a single-goal search anchored at the
// last objective reached (the grid's start for the first leg). As soon as a
// leg pops a pending objective, its path is reconstructed and appended to the
// route, the frontier and parent map are thrown away, and a new leg starts
// from that objective. Objectives are consumed in whatever order the legs
// reach them: this is greedy, not a tour optimizer.
use clap::ValueEnum;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::time::Instant;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::explored::Explored;
use crate::frontier::{Entry, FifoFrontier, Frontier, PriorityFrontier};
use crate::maze::{Cell, Grid};
use crate::path::reconstruct;

#[derive(ValueEnum, Serialize, Debug, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Breadth-first search.
    #[value(alias = "bfs")]
    BreadthFirst,
    /// A* guided by the full objective set.
    #[value(alias = "astar")]
    InformedSingleGoal,
    /// A* guided by the objectives not reached yet.
    #[value(alias = "astar-corner", alias = "astar-multi", alias = "fast")]
    InformedShrinkingGoal,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::InformedSingleGoal => "informed-single-goal",
            Strategy::InformedShrinkingGoal => "informed-shrinking-goal",
        }
    }

    pub fn goal_policy(&self) -> GoalPolicy {
        match self {
            Strategy::BreadthFirst | Strategy::InformedSingleGoal => GoalPolicy::Static,
            Strategy::InformedShrinkingGoal => GoalPolicy::Shrinking,
        }
    }

    fn informed(&self) -> bool {
        !matches!(self, Strategy::BreadthFirst)
    }
}

/// What happens to an objective once a leg reaches it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GoalPolicy {
    /// The objective set never changes, reached objectives are tracked on the
    /// side. The heuristic keeps pointing at every declared objective.
    Static,
    /// Reached objectives leave the set the heuristic is computed against.
    Shrinking,
}

/// Where the driver is after one pop from the frontier.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum LegState {
    LegActive,
    // An objective was reached and a new leg is anchored on it.
    LegComplete(Cell),
    AllObjectivesSatisfied,
    // No path from the current anchor to any remaining objective.
    FrontierExhausted,
}

#[derive(Serialize, Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct SearchStats {
    // Legs completed, including a zero-length one when the start is an
    // objective.
    pub legs: usize,
    // Entries popped from the frontier, over all legs.
    pub expanded: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Solution {
    // Empty when some objective can't be reached.
    pub path: Vec<Cell>,
    pub stats: SearchStats,
}

impl Solution {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    // Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

struct Objectives {
    policy: GoalPolicy,
    declared: Vec<Cell>,
    remaining: Vec<Cell>,
    unreached: FxHashSet<Cell>,
}

impl Objectives {
    fn new(policy: GoalPolicy, cells: Vec<Cell>) -> Result<Self, SearchError> {
        let mut seen = FxHashSet::default();
        let declared: Vec<Cell> = cells.into_iter().filter(|&cell| seen.insert(cell)).collect();
        if declared.is_empty() {
            return Err(SearchError::EmptyObjectives);
        }
        Ok(Objectives {
            policy,
            remaining: declared.clone(),
            declared,
            unreached: seen,
        })
    }

    fn is_pending(&self, cell: Cell) -> bool {
        self.unreached.contains(&cell)
    }

    fn satisfy(&mut self, cell: Cell) {
        self.unreached.remove(&cell);
        if self.policy == GoalPolicy::Shrinking {
            self.remaining.retain(|&objective| objective != cell);
        }
    }

    fn all_satisfied(&self) -> bool {
        self.unreached.is_empty()
    }

    // Cells the heuristic measures against.
    fn targets(&self) -> &[Cell] {
        match self.policy {
            GoalPolicy::Static => &self.declared,
            GoalPolicy::Shrinking => &self.remaining,
        }
    }
}

struct Scorer {
    informed: bool,
    config: SearchConfig,
}

impl Scorer {
    // h for a cell. Always 0 for breadth-first, so priorities are plain
    // depths there.
    fn estimate(&self, cell: Cell, targets: &[Cell]) -> Result<u32, SearchError> {
        if !self.informed {
            return Ok(0);
        }
        self.config.estimate.score(cell, targets, self.config.distance)
    }
}

// State owned by a single leg, dropped when the leg completes.
struct Leg<F> {
    start: Cell,
    frontier: F,
    explored: Explored,
}

impl<F: Frontier + Default> Leg<F> {
    fn new(start: Cell) -> Self {
        Leg { start, frontier: F::default(), explored: Explored::new(start) }
    }
}

struct Driver<'a, G, F> {
    grid: &'a G,
    scorer: Scorer,
    objectives: Objectives,
    leg: Leg<F>,
    path: Vec<Cell>,
    stats: SearchStats,
}

impl<'a, G: Grid, F: Frontier + Default> Driver<'a, G, F> {
    fn new(
        grid: &'a G, strategy: Strategy, config: SearchConfig
        ) -> Result<Self, SearchError> {
        let objectives = Objectives::new(strategy.goal_policy(), grid.objectives())?;
        let start = grid.start();
        Ok(Driver {
            grid,
            scorer: Scorer { informed: strategy.informed(), config },
            objectives,
            leg: Leg::new(start),
            path: vec![start],
            stats: SearchStats::default(),
        })
    }

    fn run(mut self) -> Result<Solution, SearchError> {
        let start = self.leg.start;
        if self.objectives.is_pending(start) {
            self.complete_leg(start)?;
        }
        if self.objectives.all_satisfied() {
            return Ok(Solution { path: self.path, stats: self.stats });
        }
        self.expand(start, 0)?;
        loop {
            match self.step()? {
                LegState::LegActive => {},
                LegState::LegComplete(anchor) => {
                    debug!("Leg {} done at {anchor}, {} objective(s) left",
                           self.stats.legs, self.objectives.unreached.len());
                },
                LegState::AllObjectivesSatisfied => {
                    return Ok(Solution { path: self.path, stats: self.stats });
                },
                LegState::FrontierExhausted => {
                    warn!("Frontier exhausted from {}, {} objective(s) unreachable",
                          self.leg.start, self.objectives.unreached.len());
                    return Ok(Solution { path: Vec::new(), stats: self.stats });
                },
            }
        }
    }

    fn step(&mut self) -> Result<LegState, SearchError> {
        let entry = match self.leg.frontier.pop_min() {
            Ok(entry) => entry,
            Err(SearchError::FrontierEmpty) => return Ok(LegState::FrontierExhausted),
            Err(err) => return Err(err),
        };
        self.stats.expanded += 1;
        // Priorities mix g and h, recover g to carry it to the neighbors.
        let h = self.scorer.estimate(entry.cell, self.objectives.targets())?;
        let mut cost = entry.priority.saturating_sub(h);
        self.leg.explored.mark_visited(entry.cell, Some(entry.parent))?;

        let mut state = LegState::LegActive;
        if self.objectives.is_pending(entry.cell) {
            self.complete_leg(entry.cell)?;
            if self.objectives.all_satisfied() {
                return Ok(LegState::AllObjectivesSatisfied);
            }
            cost = 0;
            state = LegState::LegComplete(entry.cell);
        }
        self.expand(entry.cell, cost)?;
        Ok(state)
    }

    // Appends the current leg's path and re-anchors on `reached`.
    fn complete_leg(&mut self, reached: Cell) -> Result<(), SearchError> {
        let steps = reconstruct(reached, self.leg.start, &self.leg.explored)?;
        // The junction cell is already the last one of the route.
        self.path.extend(steps.into_iter().skip(1));
        self.objectives.satisfy(reached);
        self.stats.legs += 1;
        self.leg = Leg::new(reached);
        Ok(())
    }

    fn expand(&mut self, cell: Cell, cost: u32) -> Result<(), SearchError> {
        let targets = self.objectives.targets();
        for neighbor in self.grid.neighbors(cell)? {
            if self.leg.explored.is_visited(neighbor) {
                continue;
            }
            let h = self.scorer.estimate(neighbor, targets)?;
            let f = cost.saturating_add(1).saturating_add(h);
            match self.leg.frontier.contains(neighbor) {
                None => self.leg.frontier.insert(
                    Entry { priority: f, cell: neighbor, parent: cell })?,
                Some((queued, _)) if f < queued => {
                    self.leg.frontier.decrease(neighbor, f, cell)?
                },
                Some(_) => {},
            }
        }
        Ok(())
    }
}

pub struct Search<'a, G> {
    grid: &'a G,
    config: SearchConfig,
}

impl<'a, G: Grid> Search<'a, G> {
    pub fn new(grid: &'a G, config: SearchConfig) -> Self {
        Search { grid, config }
    }

    pub fn run(&self, strategy: Strategy) -> Result<Solution, SearchError> {
        let start = Instant::now();
        let solution = match strategy {
            Strategy::BreadthFirst => {
                Driver::<G, FifoFrontier>::new(self.grid, strategy, self.config)?.run()?
            },
            Strategy::InformedSingleGoal | Strategy::InformedShrinkingGoal => {
                Driver::<G, PriorityFrontier>::new(self.grid, strategy, self.config)?.run()?
            },
        };
        info!("Search {} took {:?}", strategy.name(), start.elapsed());
        if solution.found() {
            info!("Search {} found a path of {} steps over {} leg(s), expanding {} cells",
                  strategy.name(), solution.steps(), solution.stats.legs,
                  solution.stats.expanded);
        } else {
            info!("Search {} did NOT find a path.", strategy.name());
        }
        Ok(solution)
    }
}

/// Path from the grid's start through every objective, or an empty path when
/// there is none. Uses the default configuration.
pub fn run<G: Grid>(strategy: Strategy, grid: &G) -> Result<Vec<Cell>, SearchError> {
    Search::new(grid, SearchConfig::default()).run(strategy)
        .map(|solution| solution.path)
}
