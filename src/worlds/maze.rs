use crate::error::SearchError;
use crate::heuristic::Heuristic;
use crate::problem::{SearchProblem, Transition};
use crate::worlds::layout::{Direction, Layout, Position};
use std::cell::{Cell, RefCell};
use std::str::FromStr;

/// Cost of stepping onto a cell.
pub type CostFn = fn(Position) -> f64;

/// Every step costs one.
pub fn unit_cost(_position: Position) -> f64 {
    1.0
}

/// Cheap on the east side of the maze, expensive on the west.
pub fn stay_east_cost(position: Position) -> f64 {
    0.5f64.powi(position.x as i32)
}

/// Cheap on the west side of the maze, expensive on the east.
pub fn stay_west_cost(position: Position) -> f64 {
    2.0f64.powi(position.x as i32)
}

/// Find a path from one cell to another through the maze.
///
/// Counts how many states get expanded and in which order, so searches can be compared on the
/// same maze.
pub struct PositionSearchProblem<'a> {
    layout: &'a Layout,
    start: Position,
    goal: Position,
    cost_fn: CostFn,
    expanded: Cell<usize>,
    visit_order: RefCell<Vec<Position>>,
}

impl<'a> PositionSearchProblem<'a> {
    pub fn new(layout: &'a Layout, start: Position, goal: Position) -> Self {
        Self {
            layout,
            start,
            goal,
            cost_fn: unit_cost,
            expanded: Cell::new(0),
            visit_order: RefCell::new(Vec::new()),
        }
    }

    /// From the agent's start to the only food pellet of the layout.
    ///
    /// Returns `None` unless the layout holds exactly one pellet.
    pub fn to_food(layout: &'a Layout) -> Option<Self> {
        match layout.food() {
            [goal] => Some(Self::new(layout, layout.agent_start(), *goal)),
            _ => None,
        }
    }

    pub fn with_cost_fn(mut self, cost_fn: CostFn) -> Self {
        self.cost_fn = cost_fn;
        self
    }

    pub fn layout(&self) -> &Layout {
        self.layout
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Number of calls to `next_states` so far.
    pub fn expanded(&self) -> usize {
        self.expanded.get()
    }

    /// Expanded positions, in expansion order.
    pub fn visit_order(&self) -> Vec<Position> {
        self.visit_order.borrow().clone()
    }

    /// Where `actions` lead from the start, or `None` if one of them walks into a wall.
    pub fn walk(&self, actions: &[Direction]) -> Option<Position> {
        self.walk_with_cost(actions).map(|(position, _)| position)
    }

    fn walk_with_cost(&self, actions: &[Direction]) -> Option<(Position, f64)> {
        let mut position = self.start;
        let mut cost = 0.0;
        for action in actions {
            position = action
                .step(position)
                .filter(|next| !self.layout.is_wall(*next))?;
            cost += (self.cost_fn)(position);
        }
        Some((position, cost))
    }
}

impl SearchProblem for PositionSearchProblem<'_> {
    type State = Position;
    type Action = Direction;

    fn initial_state(&self) -> Position {
        self.start
    }

    fn is_final(&self, state: &Position) -> bool {
        *state == self.goal
    }

    fn next_states(&self, state: &Position) -> Vec<Transition<Position, Direction>> {
        self.expanded.set(self.expanded.get() + 1);
        self.visit_order.borrow_mut().push(*state);

        self.layout
            .neighbours(*state)
            .into_iter()
            .map(|(direction, next)| Transition::new(next, direction, (self.cost_fn)(next)))
            .collect()
    }

    /// Walking into a wall makes the sequence infinitely expensive.
    fn action_cost(&self, actions: &[Direction]) -> f64 {
        self.walk_with_cost(actions)
            .map(|(_, cost)| cost)
            .unwrap_or(f64::INFINITY)
    }
}

/// Grid distance to the goal, ignoring walls.
pub fn manhattan_heuristic(state: &Position, problem: &PositionSearchProblem<'_>) -> f64 {
    state.manhattan(&problem.goal()) as f64
}

/// Straight-line distance to the goal.
pub fn euclidean_heuristic(state: &Position, problem: &PositionSearchProblem<'_>) -> f64 {
    state.euclidean(&problem.goal())
}

/// Grid heuristics selectable by name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridHeuristic {
    #[default]
    Null,
    Manhattan,
    Euclidean,
}

impl<'a> Heuristic<PositionSearchProblem<'a>> for GridHeuristic {
    fn estimate(&self, state: &Position, problem: &PositionSearchProblem<'a>) -> f64 {
        match self {
            GridHeuristic::Null => 0.0,
            GridHeuristic::Manhattan => manhattan_heuristic(state, problem),
            GridHeuristic::Euclidean => euclidean_heuristic(state, problem),
        }
    }
}

impl FromStr for GridHeuristic {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" | "nullheuristic" => Ok(GridHeuristic::Null),
            "manhattan" | "manhattanheuristic" => Ok(GridHeuristic::Manhattan),
            "euclidean" | "euclideanheuristic" => Ok(GridHeuristic::Euclidean),
            _ => Err(SearchError::UnknownHeuristic(s.to_string())),
        }
    }
}
