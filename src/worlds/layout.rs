use crate::error::LayoutError;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

/// A cell of the grid. `y` grows downwards, row 0 is the first line of the layout text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn euclidean(&self, other: &Position) -> f64 {
        let dx = self.x.abs_diff(other.x) as f64;
        let dy = self.y.abs_diff(other.y) as f64;
        dx.hypot(dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A move on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// The four moves that change position, in the order successors are generated.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The neighbouring position in this direction, or `None` past the top/left edge.
    pub fn step(self, from: Position) -> Option<Position> {
        match self {
            Direction::North => from.y.checked_sub(1).map(|y| Position::new(from.x, y)),
            Direction::South => Some(Position::new(from.x, from.y + 1)),
            Direction::East => Some(Position::new(from.x + 1, from.y)),
            Direction::West => from.x.checked_sub(1).map(|x| Position::new(x, from.y)),
            Direction::Stop => Some(from),
        }
    }
}

/// A parsed maze: walls plus the starting placement of food, capsules and agents.
///
/// Tiles: `%` wall, `.` food, `o` capsule, `P` controlled agent, `G` ghost, space empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    agent_start: Position,
    ghost_starts: Vec<Position>,
}

impl Layout {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells outside the grid count as walls.
    pub fn is_wall(&self, position: Position) -> bool {
        if position.x >= self.width || position.y >= self.height {
            return true;
        }
        self.walls[position.y * self.width + position.x]
    }

    pub fn food(&self) -> &[Position] {
        &self.food
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn agent_start(&self) -> Position {
        self.agent_start
    }

    pub fn ghost_starts(&self) -> &[Position] {
        &self.ghost_starts
    }

    /// Open neighbours of `position`, with the direction leading to each.
    pub fn neighbours(&self, position: Position) -> Vec<(Direction, Position)> {
        Direction::CARDINAL
            .iter()
            .filter_map(|&direction| {
                direction
                    .step(position)
                    .filter(|next| !self.is_wall(*next))
                    .map(|next| (direction, next))
            })
            .collect()
    }

    /// Grid distance from `origin` to every reachable open cell.
    pub fn distances_from(&self, origin: Position) -> HashMap<Position, usize> {
        let mut distances = HashMap::new();
        if self.is_wall(origin) {
            return distances;
        }

        let mut queue = VecDeque::from([origin]);
        distances.insert(origin, 0);
        while let Some(current) = queue.pop_front() {
            let next_distance = distances[&current] + 1;
            for (_, next) in self.neighbours(current) {
                if !distances.contains_key(&next) {
                    distances.insert(next, next_distance);
                    queue.push_back(next);
                }
            }
        }
        distances
    }

    /// Shortest walking distance between two cells, or `None` if walls separate them.
    pub fn maze_distance(&self, from: Position, to: Position) -> Option<usize> {
        self.distances_from(from).get(&to).copied()
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().ok_or(LayoutError::Empty)?.chars().count();

        let mut walls = Vec::with_capacity(width * rows.len());
        let mut food = Vec::new();
        let mut capsules = Vec::new();
        let mut agent_start = None;
        let mut ghost_starts = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, tile) in row.chars().enumerate() {
                let position = Position::new(x, y);
                walls.push(tile == '%');
                match tile {
                    '%' | ' ' => {}
                    '.' => food.push(position),
                    'o' => capsules.push(position),
                    'G' => ghost_starts.push(position),
                    'P' => {
                        if agent_start.replace(position).is_some() {
                            return Err(LayoutError::DuplicateAgent);
                        }
                    }
                    _ => {
                        return Err(LayoutError::UnknownTile {
                            tile,
                            row: y,
                            column: x,
                        });
                    }
                }
            }
        }

        Ok(Layout {
            width,
            height: rows.len(),
            walls,
            food,
            capsules,
            agent_start: agent_start.ok_or(LayoutError::MissingAgent)?,
            ghost_starts,
        })
    }
}
