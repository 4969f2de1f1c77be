use crate::adversarial::AdversarialAgent;
use crate::error::{LayoutError, Result};
use crate::evaluation::{Evaluator, GhostFeature, StateFeatures};
use crate::game::{AgentIndex, CONTROLLED_AGENT, GameState};
use crate::random::RandomGenerator;
use crate::worlds::layout::{Direction, Layout, Position};
use log::debug;
use std::rc::Rc;
use std::str::FromStr;

const TIME_PENALTY: f64 = 1.0;
const FOOD_SCORE: f64 = 10.0;
const WIN_SCORE: f64 = 500.0;
const LOSE_PENALTY: f64 = 500.0;
const GHOST_EATEN_SCORE: f64 = 200.0;
const SCARED_TIME: u32 = 40;

/// Where a chase currently stands, from the controlled agent's point of view.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    InProgress,
    /// All food has been eaten.
    Win,
    /// An active ghost caught the controlled agent.
    Lose,
}

#[derive(Debug, Clone, PartialEq)]
struct Ghost {
    position: Position,
    start: Position,
    scared_timer: u32,
}

/// A pursuit game on a maze: the controlled agent eats food while ghosts chase it.
///
/// Agent 0 is the eater, agents `1..` are the ghosts in layout order. Moving into a wall leaves
/// an agent where it is. Terminal states have no legal actions.
#[derive(Debug, Clone)]
pub struct ChaseState {
    layout: Rc<Layout>,
    agent: Position,
    ghosts: Vec<Ghost>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    score: f64,
    outcome: GameOutcome,
}

impl ChaseState {
    /// The starting position described by `layout`.
    pub fn new(layout: Layout) -> Self {
        let ghosts = layout
            .ghost_starts()
            .iter()
            .map(|&start| Ghost {
                position: start,
                start,
                scared_timer: 0,
            })
            .collect();
        Self {
            agent: layout.agent_start(),
            food: layout.food().to_vec(),
            capsules: layout.capsules().to_vec(),
            ghosts,
            score: 0.0,
            outcome: GameOutcome::InProgress,
            layout: Rc::new(layout),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn agent_position(&self) -> Position {
        self.agent
    }

    pub fn ghost_positions(&self) -> Vec<Position> {
        self.ghosts.iter().map(|ghost| ghost.position).collect()
    }

    pub fn scared_timers(&self) -> Vec<u32> {
        self.ghosts.iter().map(|ghost| ghost.scared_timer).collect()
    }

    pub fn food(&self) -> &[Position] {
        &self.food
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    fn moved(&self, from: Position, direction: Direction) -> Position {
        direction
            .step(from)
            .filter(|next| !self.layout.is_wall(*next))
            .unwrap_or(from)
    }

    fn move_agent(&mut self, direction: Direction) {
        self.score -= TIME_PENALTY;
        self.agent = self.moved(self.agent, direction);

        if let Some(index) = self.food.iter().position(|&food| food == self.agent) {
            self.food.remove(index);
            self.score += FOOD_SCORE;
        }
        if let Some(index) = self.capsules.iter().position(|&c| c == self.agent) {
            self.capsules.remove(index);
            for ghost in &mut self.ghosts {
                ghost.scared_timer = SCARED_TIME;
            }
        }

        for index in 0..self.ghosts.len() {
            self.check_contact(index);
        }
        if self.outcome == GameOutcome::InProgress && self.food.is_empty() {
            self.score += WIN_SCORE;
            self.outcome = GameOutcome::Win;
        }
    }

    fn move_ghost(&mut self, index: usize, direction: Direction) {
        let next = self.moved(self.ghosts[index].position, direction);
        let ghost = &mut self.ghosts[index];
        ghost.position = next;
        ghost.scared_timer = ghost.scared_timer.saturating_sub(1);
        self.check_contact(index);
    }

    fn check_contact(&mut self, index: usize) {
        if self.outcome != GameOutcome::InProgress {
            return;
        }
        let ghost = &mut self.ghosts[index];
        if ghost.position != self.agent {
            return;
        }
        if ghost.scared_timer > 0 {
            self.score += GHOST_EATEN_SCORE;
            ghost.position = ghost.start;
            ghost.scared_timer = 0;
        } else {
            self.score -= LOSE_PENALTY;
            self.outcome = GameOutcome::Lose;
        }
    }

    fn distance_to(&self, target: Position) -> f64 {
        self.layout
            .maze_distance(self.agent, target)
            .unwrap_or_else(|| self.agent.manhattan(&target)) as f64
    }
}

impl FromStr for ChaseState {
    type Err = LayoutError;

    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        text.parse().map(ChaseState::new)
    }
}

impl GameState for ChaseState {
    type Action = Direction;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.outcome != GameOutcome::InProgress {
            return Vec::new();
        }
        if agent == CONTROLLED_AGENT {
            let mut actions: Vec<Direction> = self
                .layout
                .neighbours(self.agent)
                .into_iter()
                .map(|(direction, _)| direction)
                .collect();
            actions.push(Direction::Stop);
            return actions;
        }

        match self.ghosts.get(agent - 1) {
            Some(ghost) => {
                let actions: Vec<Direction> = self
                    .layout
                    .neighbours(ghost.position)
                    .into_iter()
                    .map(|(direction, _)| direction)
                    .collect();
                if actions.is_empty() {
                    vec![Direction::Stop]
                } else {
                    actions
                }
            }
            None => Vec::new(),
        }
    }

    fn successor(&self, agent: AgentIndex, action: &Direction) -> Self {
        let mut next = self.clone();
        if self.outcome != GameOutcome::InProgress {
            return next;
        }
        if agent == CONTROLLED_AGENT {
            next.move_agent(*action);
        } else if agent <= self.ghosts.len() {
            next.move_ghost(agent - 1, *action);
        }
        next
    }

    fn agent_count(&self) -> usize {
        1 + self.ghosts.len()
    }

    fn is_win(&self) -> bool {
        self.outcome == GameOutcome::Win
    }

    fn is_lose(&self) -> bool {
        self.outcome == GameOutcome::Lose
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl StateFeatures for ChaseState {
    fn food_count(&self) -> usize {
        self.food.len()
    }

    fn food_distances(&self) -> Vec<f64> {
        let distances = self.layout.distances_from(self.agent);
        self.food
            .iter()
            .filter_map(|food| distances.get(food).map(|&d| d as f64))
            .collect()
    }

    fn capsule_count(&self) -> usize {
        self.capsules.len()
    }

    fn ghosts(&self) -> Vec<GhostFeature> {
        self.ghosts
            .iter()
            .map(|ghost| GhostFeature {
                distance: self.distance_to(ghost.position),
                scared_timer: ghost.scared_timer,
            })
            .collect()
    }
}

/// How a played-out chase ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// `InProgress` when the move limit was hit first.
    pub outcome: GameOutcome,
    pub score: f64,
    /// Moves made by the controlled agent.
    pub moves: usize,
}

/// Plays a chase to the end or until the controlled agent has made `max_moves` moves.
///
/// The controlled agent moves by adversarial search; every ghost picks one of its legal actions
/// uniformly with `random`.
pub fn play_episode<E, R>(
    mut state: ChaseState,
    agent: &AdversarialAgent<E>,
    random: &mut R,
    max_moves: usize,
) -> Result<Episode>
where
    E: Evaluator<ChaseState>,
    R: RandomGenerator,
{
    let mut moves = 0;
    while moves < max_moves && !state.is_terminal() {
        let action = agent.get_action(&state)?;
        state = state.successor(CONTROLLED_AGENT, &action);
        moves += 1;

        for ghost in 1..state.agent_count() {
            if state.is_terminal() {
                break;
            }
            let actions = state.legal_actions(ghost);
            if let Some(action) = random.choose(&actions) {
                state = state.successor(ghost, action);
            }
        }
    }

    debug!(
        "{} episode ended {:?} with score {} after {moves} moves",
        agent.strategy(),
        state.outcome(),
        state.score()
    );
    Ok(Episode {
        outcome: state.outcome(),
        score: state.score(),
        moves,
    })
}
