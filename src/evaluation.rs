use crate::error::SearchError;
use crate::game::GameState;
use std::fmt;
use std::str::FromStr;

/// A heuristic estimate of the controlled agent's prospects in a state.
///
/// Any `Fn(&G) -> f64` is an evaluator, so plain functions and closures can be passed directly.
pub trait Evaluator<G> {
    fn evaluate(&self, state: &G) -> f64;
}

impl<G, F> Evaluator<G> for F
where
    F: Fn(&G) -> f64,
{
    fn evaluate(&self, state: &G) -> f64 {
        self(state)
    }
}

/// Returns the game's built-in score.
pub fn score_evaluation<G: GameState>(state: &G) -> f64 {
    state.score()
}

/// [`score_evaluation`] as a value, the default evaluator of an agent.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreEvaluator;

impl<G: GameState> Evaluator<G> for ScoreEvaluator {
    fn evaluate(&self, state: &G) -> f64 {
        score_evaluation(state)
    }
}

/// Distance and fright of one adversary, as seen from the controlled agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostFeature {
    /// Distance from the controlled agent.
    pub distance: f64,
    /// Remaining moves during which the adversary can be eaten. Zero when active.
    pub scared_timer: u32,
}

/// Board features that richer evaluation functions combine with the score.
pub trait StateFeatures: GameState {
    /// Number of food pellets still on the board, reachable or not.
    fn food_count(&self) -> usize;

    /// Distance from the controlled agent to every food pellet it can reach.
    fn food_distances(&self) -> Vec<f64>;

    /// Number of capsules still on the board.
    fn capsule_count(&self) -> usize;

    fn ghosts(&self) -> Vec<GhostFeature>;
}

const FOOD_LEFT_PENALTY: f64 = 4.0;
const CAPSULE_LEFT_PENALTY: f64 = 20.0;
const NEAREST_FOOD_REWARD: f64 = 10.0;
const SCARED_GHOST_REWARD: f64 = 200.0;
const ACTIVE_GHOST_PENALTY: f64 = 500.0;

/// Score adjusted by the food, capsules and ghosts around the controlled agent.
///
/// Starting from the score:
/// * every remaining food costs 4 and every remaining capsule costs 20;
/// * the nearest food adds `10 / (1 + distance)`;
/// * a ghost that stays scared for longer than it takes to reach it adds `200 / (1 + distance)`;
/// * an active ghost at distance one or less subtracts `500 / (1 + distance)`.
///
/// Won and lost states are worth exactly their score.
pub fn better_evaluation<G: StateFeatures>(state: &G) -> f64 {
    let score = state.score();
    if state.is_terminal() {
        return score;
    }

    let mut value = score
        - FOOD_LEFT_PENALTY * state.food_count() as f64
        - CAPSULE_LEFT_PENALTY * state.capsule_count() as f64;

    if let Some(nearest) = state.food_distances().into_iter().reduce(f64::min) {
        value += NEAREST_FOOD_REWARD / (1.0 + nearest);
    }

    for ghost in state.ghosts() {
        if f64::from(ghost.scared_timer) > ghost.distance {
            value += SCARED_GHOST_REWARD / (1.0 + ghost.distance);
        } else if ghost.scared_timer == 0 && ghost.distance <= 1.0 {
            value -= ACTIVE_GHOST_PENALTY / (1.0 + ghost.distance);
        }
    }

    value
}

/// Named evaluation functions, resolved once into a function pointer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationFunction {
    /// [`score_evaluation`]
    #[default]
    Score,
    /// [`better_evaluation`]
    Better,
}

impl EvaluationFunction {
    pub fn name(&self) -> &'static str {
        match self {
            EvaluationFunction::Score => "score",
            EvaluationFunction::Better => "better",
        }
    }

    /// Returns the function this name stands for.
    pub fn resolve<G: StateFeatures>(self) -> fn(&G) -> f64 {
        match self {
            EvaluationFunction::Score => score_evaluation::<G>,
            EvaluationFunction::Better => better_evaluation::<G>,
        }
    }
}

impl fmt::Display for EvaluationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvaluationFunction {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" | "scoreevaluationfunction" => Ok(EvaluationFunction::Score),
            "better" | "betterevaluationfunction" => Ok(EvaluationFunction::Better),
            _ => Err(SearchError::UnknownEvaluation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SearchError;
    use crate::evaluation::{
        EvaluationFunction, Evaluator, GhostFeature, ScoreEvaluator, StateFeatures,
        better_evaluation, score_evaluation,
    };
    use crate::game::{AgentIndex, GameState};

    /// A frozen state exposing hand-picked features.
    struct Snapshot {
        score: f64,
        food: Vec<f64>,
        capsules: usize,
        ghosts: Vec<GhostFeature>,
        won: bool,
    }

    impl Snapshot {
        fn new(score: f64) -> Self {
            Self {
                score,
                food: Vec::new(),
                capsules: 0,
                ghosts: Vec::new(),
                won: false,
            }
        }
    }

    impl GameState for Snapshot {
        type Action = ();

        fn legal_actions(&self, _agent: AgentIndex) -> Vec<()> {
            Vec::new()
        }

        fn successor(&self, _agent: AgentIndex, _action: &()) -> Self {
            Snapshot::new(self.score)
        }

        fn agent_count(&self) -> usize {
            1 + self.ghosts.len()
        }

        fn is_win(&self) -> bool {
            self.won
        }

        fn is_lose(&self) -> bool {
            false
        }

        fn score(&self) -> f64 {
            self.score
        }
    }

    impl StateFeatures for Snapshot {
        fn food_count(&self) -> usize {
            self.food.len()
        }

        fn food_distances(&self) -> Vec<f64> {
            self.food.clone()
        }

        fn capsule_count(&self) -> usize {
            self.capsules
        }

        fn ghosts(&self) -> Vec<GhostFeature> {
            self.ghosts.clone()
        }
    }

    #[test]
    fn score_evaluation_returns_score() {
        assert_eq!(score_evaluation(&Snapshot::new(42.0)), 42.0);
        assert_eq!(ScoreEvaluator.evaluate(&Snapshot::new(-3.0)), -3.0);
    }

    #[test]
    fn closures_are_evaluators() {
        let doubled = |state: &Snapshot| state.score * 2.0;
        assert_eq!(doubled.evaluate(&Snapshot::new(3.0)), 6.0);
    }

    #[test]
    fn better_evaluation_combines_features() {
        // arrange
        let mut state = Snapshot::new(100.0);
        state.food = vec![4.0, 1.0];
        state.capsules = 1;
        state.ghosts = vec![
            GhostFeature {
                distance: 1.0,
                scared_timer: 0,
            },
            GhostFeature {
                distance: 3.0,
                scared_timer: 10,
            },
            GhostFeature {
                distance: 6.0,
                scared_timer: 0,
            },
        ];

        // act
        let value = better_evaluation(&state);

        // assert
        let expected = 100.0 - 8.0 - 20.0 + 10.0 / 2.0 - 500.0 / 2.0 + 200.0 / 4.0;
        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn better_evaluation_prefers_closer_food() {
        let mut near = Snapshot::new(0.0);
        near.food = vec![1.0];
        let mut far = Snapshot::new(0.0);
        far.food = vec![5.0];

        assert!(better_evaluation(&near) > better_evaluation(&far));
    }

    #[test]
    fn better_evaluation_of_won_state_is_its_score() {
        let mut state = Snapshot::new(510.0);
        state.won = true;
        state.food = vec![2.0];

        assert_eq!(better_evaluation(&state), 510.0);
    }

    #[test]
    fn evaluation_functions_resolve_by_name() {
        // arrange
        let mut state = Snapshot::new(10.0);
        state.food = vec![1.0];

        // act
        let score: EvaluationFunction = "scoreEvaluationFunction".parse().unwrap();
        let better: EvaluationFunction = "better".parse().unwrap();

        // assert
        assert_eq!(score.resolve::<Snapshot>()(&state), 10.0);
        assert_eq!(better.resolve::<Snapshot>()(&state), 10.0 - 4.0 + 5.0);
        assert_eq!(
            "smartest".parse::<EvaluationFunction>(),
            Err(SearchError::UnknownEvaluation("smartest".to_string()))
        );
    }
}
