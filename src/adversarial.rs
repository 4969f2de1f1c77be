use crate::error::{Result, SearchError};
use crate::evaluation::{EvaluationFunction, Evaluator, ScoreEvaluator, StateFeatures};
use crate::game::{AgentIndex, CONTROLLED_AGENT, GameState};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Default lookahead, in full rounds of agent moves.
pub const DEFAULT_DEPTH: u32 = 2;

/// The adversarial search variants. They share the max rule for the controlled agent and differ
/// in how adversary nodes are valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Adversaries minimize. Every node is explored.
    Minimax,
    /// Adversaries minimize, with alpha-beta cutoffs.
    AlphaBeta,
    /// Adversaries pick uniformly at random among their legal actions.
    Expectimax,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax];

    /// Short name, also accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Expectimax => "expectimax",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" | "minimaxagent" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" | "alphabetaagent" => Ok(Strategy::AlphaBeta),
            "expectimax" | "expectimaxagent" => Ok(Strategy::Expectimax),
            _ => Err(SearchError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Work done while reaching one decision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecisionStats {
    /// Successor states generated, root children included.
    pub generated: usize,
    /// Calls made to the evaluator.
    pub evaluations: usize,
}

/// The chosen root action together with its backed-up value.
#[derive(Debug, Clone)]
pub struct Decision<A> {
    pub action: A,
    pub value: f64,
    pub stats: DecisionStats,
}

/// An agent that picks the controlled agent's next action by searching the game tree.
///
/// ```rust
/// use search_agents::adversarial::{AdversarialAgent, Strategy};
/// use search_agents::evaluation::better_evaluation;
/// use search_agents::worlds::chase::ChaseState;
///
/// let state: ChaseState = "%%%%%%\n%P .G%\n%%%%%%".parse().unwrap();
/// let agent = AdversarialAgent::builder(Strategy::AlphaBeta)
///     .with_depth(2)
///     .with_evaluator(better_evaluation::<ChaseState>)
///     .build();
///
/// let decision = agent.decide(&state).unwrap();
/// println!("best action: {:?} ({})", decision.action, decision.value);
/// ```
pub struct AdversarialAgent<E = ScoreEvaluator> {
    strategy: Strategy,
    depth: u32,
    evaluator: E,
}

/// A builder for creating instances of [`AdversarialAgent`].
pub struct AdversarialAgentBuilder<E> {
    strategy: Strategy,
    depth: u32,
    evaluator: E,
}

impl<E> AdversarialAgentBuilder<E> {
    /// Sets the lookahead in full rounds (one round is one move by every agent).
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the function used to score leaves of the search.
    pub fn with_evaluator<F>(self, evaluator: F) -> AdversarialAgentBuilder<F> {
        AdversarialAgentBuilder {
            strategy: self.strategy,
            depth: self.depth,
            evaluator,
        }
    }

    /// Scores leaves with a named evaluation function, resolved once for games of type `G`.
    pub fn with_evaluation_function<G: StateFeatures>(
        self,
        function: EvaluationFunction,
    ) -> AdversarialAgentBuilder<fn(&G) -> f64> {
        self.with_evaluator(function.resolve::<G>())
    }

    pub fn build(self) -> AdversarialAgent<E> {
        AdversarialAgent {
            strategy: self.strategy,
            depth: self.depth,
            evaluator: self.evaluator,
        }
    }
}

impl AdversarialAgent<ScoreEvaluator> {
    /// Returns a new builder with depth 2 and the score evaluator.
    pub fn builder(strategy: Strategy) -> AdversarialAgentBuilder<ScoreEvaluator> {
        AdversarialAgentBuilder {
            strategy,
            depth: DEFAULT_DEPTH,
            evaluator: ScoreEvaluator,
        }
    }
}

impl<E> AdversarialAgent<E> {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Searches the tree below `state` and returns the best root action with its value.
    pub fn decide<G>(&self, state: &G) -> Result<Decision<G::Action>>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        Lookahead::new(self.strategy, self.depth, &self.evaluator).decide(state)
    }

    /// Like [`decide`](Self::decide), keeping only the action.
    pub fn get_action<G>(&self, state: &G) -> Result<G::Action>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.decide(state).map(|decision| decision.action)
    }
}

/// Picks the controlled agent's action assuming adversaries minimize its value.
pub fn minimax_decision<G, E>(state: &G, evaluator: &E, depth: u32) -> Result<G::Action>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    decision(Strategy::Minimax, state, evaluator, depth)
}

/// Same choice as [`minimax_decision`], skipping branches that cannot change it.
pub fn alpha_beta_decision<G, E>(state: &G, evaluator: &E, depth: u32) -> Result<G::Action>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    decision(Strategy::AlphaBeta, state, evaluator, depth)
}

/// Picks the controlled agent's action assuming adversaries move uniformly at random.
pub fn expectimax_decision<G, E>(state: &G, evaluator: &E, depth: u32) -> Result<G::Action>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    decision(Strategy::Expectimax, state, evaluator, depth)
}

fn decision<G, E>(strategy: Strategy, state: &G, evaluator: &E, depth: u32) -> Result<G::Action>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    Lookahead::new(strategy, depth, evaluator)
        .decide(state)
        .map(|decision| decision.action)
}

/// Returns who moves after `agent` and at which depth.
fn next_turn(agent: AgentIndex, depth: u32, agent_count: usize) -> (AgentIndex, u32) {
    if agent + 1 >= agent_count {
        (CONTROLLED_AGENT, depth + 1)
    } else {
        (agent + 1, depth)
    }
}

/// One decision's worth of recursive search state. Nodes of the game tree are the
/// `(state, agent, depth)` triples passed through `value`; none of them outlive the call.
struct Lookahead<'a, E: ?Sized> {
    strategy: Strategy,
    depth: u32,
    evaluator: &'a E,
    stats: DecisionStats,
}

impl<'a, E: ?Sized> Lookahead<'a, E> {
    fn new(strategy: Strategy, depth: u32, evaluator: &'a E) -> Self {
        Self {
            strategy,
            depth,
            evaluator,
            stats: DecisionStats::default(),
        }
    }

    fn prunes(&self) -> bool {
        self.strategy == Strategy::AlphaBeta
    }

    fn decide<G>(mut self, root: &G) -> Result<Decision<G::Action>>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let actions = root.legal_actions(CONTROLLED_AGENT);
        let (next_agent, next_depth) = next_turn(CONTROLLED_AGENT, 0, root.agent_count());

        let mut best: Option<(G::Action, f64)> = None;
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        for action in actions {
            let child = self.child(root, CONTROLLED_AGENT, &action);
            let score = self.value(&child, next_agent, next_depth, alpha, beta);
            // strictly greater: the first of equally valued actions wins
            if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
                best = Some((action, score));
            }
            if self.prunes() {
                if score > beta {
                    break;
                }
                alpha = alpha.max(score);
            }
        }

        let (action, value) = best.ok_or(SearchError::NoLegalActions)?;
        debug!(
            "{} decided at depth {} with value {value} ({} states generated, {} evaluations)",
            self.strategy, self.depth, self.stats.generated, self.stats.evaluations
        );
        Ok(Decision {
            action,
            value,
            stats: self.stats,
        })
    }

    fn value<G>(&mut self, state: &G, agent: AgentIndex, depth: u32, alpha: f64, beta: f64) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        if depth >= self.depth || state.is_win() || state.is_lose() {
            return self.evaluate(state);
        }

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return self.evaluate(state);
        }

        let (next_agent, next_depth) = next_turn(agent, depth, state.agent_count());
        let turn = Turn {
            agent,
            next_agent,
            next_depth,
        };
        if agent == CONTROLLED_AGENT {
            self.max_value(state, &actions, turn, alpha, beta)
        } else if self.strategy == Strategy::Expectimax {
            self.expected_value(state, &actions, turn)
        } else {
            self.min_value(state, &actions, turn, alpha, beta)
        }
    }

    fn max_value<G>(
        &mut self,
        state: &G,
        actions: &[G::Action],
        turn: Turn,
        mut alpha: f64,
        beta: f64,
    ) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let mut v = f64::NEG_INFINITY;
        for action in actions {
            let child = self.child(state, turn.agent, action);
            v = v.max(self.value(&child, turn.next_agent, turn.next_depth, alpha, beta));
            if self.prunes() {
                if v > beta {
                    return v;
                }
                alpha = alpha.max(v);
            }
        }
        v
    }

    fn min_value<G>(
        &mut self,
        state: &G,
        actions: &[G::Action],
        turn: Turn,
        alpha: f64,
        mut beta: f64,
    ) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let mut v = f64::INFINITY;
        for action in actions {
            let child = self.child(state, turn.agent, action);
            v = v.min(self.value(&child, turn.next_agent, turn.next_depth, alpha, beta));
            if self.prunes() {
                if v < alpha {
                    return v;
                }
                beta = beta.min(v);
            }
        }
        v
    }

    fn expected_value<G>(&mut self, state: &G, actions: &[G::Action], turn: Turn) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let probability = 1.0 / actions.len() as f64;
        let mut v = 0.0;
        for action in actions {
            let child = self.child(state, turn.agent, action);
            v += probability
                * self.value(
                    &child,
                    turn.next_agent,
                    turn.next_depth,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                );
        }
        v
    }

    fn child<G: GameState>(&mut self, state: &G, agent: AgentIndex, action: &G::Action) -> G {
        self.stats.generated += 1;
        state.successor(agent, action)
    }

    fn evaluate<G>(&mut self, state: &G) -> f64
    where
        E: Evaluator<G>,
    {
        self.stats.evaluations += 1;
        self.evaluator.evaluate(state)
    }
}

#[derive(Debug, Clone, Copy)]
struct Turn {
    agent: AgentIndex,
    next_agent: AgentIndex,
    next_depth: u32,
}

#[cfg(test)]
mod tests {
    use crate::adversarial::{
        AdversarialAgent, Strategy, alpha_beta_decision, expectimax_decision, minimax_decision,
        next_turn,
    };
    use crate::error::SearchError;
    use crate::evaluation::score_evaluation;
    use crate::game::{AgentIndex, GameState};
    use proptest::collection::vec;
    use proptest::prelude::{Just, ProptestConfig, prop_assert, prop_assert_eq, proptest};
    use proptest::strategy::Strategy as _;
    use std::rc::Rc;

    struct TreeNode {
        value: f64,
        children: Vec<usize>,
    }

    /// An explicit game tree. Actions are child indices and a node's score is its value.
    #[derive(Clone)]
    struct TreeGame {
        nodes: Rc<Vec<TreeNode>>,
        at: usize,
        agents: usize,
    }

    #[derive(Default)]
    struct TreeBuilder {
        nodes: Vec<TreeNode>,
    }

    impl TreeBuilder {
        fn leaf(&mut self, value: f64) -> usize {
            self.node(value, Vec::new())
        }

        fn branch(&mut self, children: Vec<usize>) -> usize {
            self.node(0.0, children)
        }

        fn node(&mut self, value: f64, children: Vec<usize>) -> usize {
            self.nodes.push(TreeNode { value, children });
            self.nodes.len() - 1
        }

        fn game(self, root: usize, agents: usize) -> TreeGame {
            TreeGame {
                nodes: Rc::new(self.nodes),
                at: root,
                agents,
            }
        }
    }

    impl GameState for TreeGame {
        type Action = usize;

        fn legal_actions(&self, _agent: AgentIndex) -> Vec<usize> {
            (0..self.nodes[self.at].children.len()).collect()
        }

        fn successor(&self, _agent: AgentIndex, action: &usize) -> Self {
            TreeGame {
                nodes: Rc::clone(&self.nodes),
                at: self.nodes[self.at].children[*action],
                agents: self.agents,
            }
        }

        fn agent_count(&self) -> usize {
            self.agents
        }

        fn is_win(&self) -> bool {
            false
        }

        fn is_lose(&self) -> bool {
            false
        }

        fn score(&self) -> f64 {
            self.nodes[self.at].value
        }
    }

    /// Root with one min/chance node per entry of `leaves`, each holding those leaves.
    fn two_ply(leaves: &[&[f64]]) -> TreeGame {
        let mut tree = TreeBuilder::default();
        let replies: Vec<usize> = leaves
            .iter()
            .map(|values| {
                let children = values.iter().map(|&v| tree.leaf(v)).collect();
                tree.branch(children)
            })
            .collect();
        let root = tree.branch(replies);
        tree.game(root, 2)
    }

    /// A complete tree with `branching` children per node, `plies` levels and the given leaves.
    fn complete(branching: usize, plies: u32, leaves: &[i32]) -> TreeGame {
        let mut tree = TreeBuilder::default();
        let mut level: Vec<usize> = leaves.iter().map(|&v| tree.leaf(f64::from(v))).collect();
        for _ in 0..plies {
            level = level
                .chunks(branching)
                .map(|children| tree.branch(children.to_vec()))
                .collect();
        }
        let root = level[0];
        tree.game(root, 2)
    }

    fn agent(strategy: Strategy, depth: u32) -> AdversarialAgent {
        AdversarialAgent::builder(strategy).with_depth(depth).build()
    }

    #[test]
    fn every_strategy_picks_the_better_reply() {
        // arrange
        let game = two_ply(&[&[3.0], &[7.0]]);

        for strategy in Strategy::ALL {
            // act
            let decision = agent(strategy, 1).decide(&game).unwrap();

            // assert
            assert_eq!(decision.action, 1, "{strategy}");
            assert_eq!(decision.value, 7.0, "{strategy}");
        }
    }

    #[test]
    fn free_functions_agree_with_the_agent() {
        let game = two_ply(&[&[3.0], &[7.0]]);
        let evaluator = score_evaluation::<TreeGame>;

        assert_eq!(minimax_decision(&game, &evaluator, 1), Ok(1));
        assert_eq!(alpha_beta_decision(&game, &evaluator, 1), Ok(1));
        assert_eq!(expectimax_decision(&game, &evaluator, 1), Ok(1));
    }

    #[test]
    fn expectimax_averages_adversary_replies() {
        let game = two_ply(&[&[0.0, 10.0]]);

        let decision = agent(Strategy::Expectimax, 2).decide(&game).unwrap();

        assert_eq!(decision.value, 5.0);
    }

    #[test]
    fn minimax_and_expectimax_disagree_on_risky_branch() {
        // arrange
        let game = two_ply(&[&[0.0, 10.0], &[4.0, 4.0]]);

        // act
        let minimax = agent(Strategy::Minimax, 1).decide(&game).unwrap();
        let expectimax = agent(Strategy::Expectimax, 1).decide(&game).unwrap();

        // assert
        assert_eq!((minimax.action, minimax.value), (1, 4.0));
        assert_eq!((expectimax.action, expectimax.value), (0, 5.0));
    }

    #[test]
    fn alpha_beta_prunes_without_changing_the_choice() {
        // arrange
        let game = two_ply(&[&[3.0, 12.0, 8.0], &[2.0, 4.0, 6.0], &[14.0, 5.0, 2.0]]);

        // act
        let minimax = agent(Strategy::Minimax, 1).decide(&game).unwrap();
        let alpha_beta = agent(Strategy::AlphaBeta, 1).decide(&game).unwrap();

        // assert
        assert_eq!(minimax.action, 0);
        assert_eq!(minimax.value, 3.0);
        assert_eq!(alpha_beta.action, minimax.action);
        assert_eq!(alpha_beta.value, minimax.value);
        assert_eq!(minimax.stats.evaluations, 9);
        assert_eq!(alpha_beta.stats.evaluations, 7);
        assert!(alpha_beta.stats.generated < minimax.stats.generated);
    }

    #[test]
    fn ties_keep_the_first_action() {
        let game = two_ply(&[&[5.0], &[5.0], &[5.0]]);

        for strategy in Strategy::ALL {
            assert_eq!(agent(strategy, 1).get_action(&game), Ok(0), "{strategy}");
        }
    }

    #[test]
    fn no_root_actions_is_an_error() {
        let mut tree = TreeBuilder::default();
        let root = tree.leaf(1.0);
        let game = tree.game(root, 2);

        for strategy in Strategy::ALL {
            assert_eq!(
                agent(strategy, 2).get_action(&game),
                Err(SearchError::NoLegalActions)
            );
        }
    }

    #[test]
    fn depth_limit_evaluates_after_full_rounds() {
        // arrange: the controlled agent's second move would reach 100, but depth 1 stops before it
        let mut tree = TreeBuilder::default();
        let deep = tree.leaf(100.0);
        let shallow = tree.node(1.0, vec![deep]);
        let reply = tree.branch(vec![shallow]);
        let other = tree.leaf(2.0);
        let other_reply = tree.branch(vec![other]);
        let root = tree.branch(vec![reply, other_reply]);
        let game = tree.game(root, 2);

        // act
        let shallow_search = agent(Strategy::Minimax, 1).decide(&game).unwrap();
        let deep_search = agent(Strategy::Minimax, 2).decide(&game).unwrap();

        // assert
        assert_eq!((shallow_search.action, shallow_search.value), (1, 2.0));
        assert_eq!((deep_search.action, deep_search.value), (0, 100.0));
    }

    #[test]
    fn every_adversary_moves_before_the_round_ends() {
        // arrange: three agents, so two adversary plies sit between controlled moves
        let mut tree = TreeBuilder::default();
        let (a, b, c, d) = (tree.leaf(4.0), tree.leaf(8.0), tree.leaf(6.0), tree.leaf(6.0));
        let first = tree.branch(vec![a, b]);
        let second = tree.branch(vec![c, d]);
        let risky = tree.branch(vec![first, second]);
        let (e, f) = (tree.leaf(5.0), tree.leaf(5.0));
        let only = tree.branch(vec![e, f]);
        let safe = tree.branch(vec![only]);
        let root = tree.branch(vec![risky, safe]);
        let game = tree.game(root, 3);

        // act
        let minimax = agent(Strategy::Minimax, 1).decide(&game).unwrap();
        let expectimax = agent(Strategy::Expectimax, 1).decide(&game).unwrap();

        // assert
        assert_eq!((minimax.action, minimax.value), (1, 5.0));
        assert_eq!((expectimax.action, expectimax.value), (0, 6.0));
    }

    #[test]
    fn turns_rotate_through_every_agent() {
        assert_eq!(next_turn(0, 0, 3), (1, 0));
        assert_eq!(next_turn(1, 0, 3), (2, 0));
        assert_eq!(next_turn(2, 0, 3), (0, 1));
        assert_eq!(next_turn(0, 4, 1), (0, 5));
    }

    #[test]
    fn strategies_resolve_by_name() {
        assert_eq!("MinimaxAgent".parse(), Ok(Strategy::Minimax));
        assert_eq!("alpha-beta".parse(), Ok(Strategy::AlphaBeta));
        assert_eq!("expectimax".parse(), Ok(Strategy::Expectimax));
        assert_eq!(
            "mcts".parse::<Strategy>(),
            Err(SearchError::UnknownStrategy("mcts".to_string()))
        );
    }

    fn complete_trees() -> impl proptest::strategy::Strategy<Value = (usize, u32, Vec<i32>)> {
        (1usize..=3, 1u32..=4).prop_flat_map(|(branching, plies)| {
            let leaves = branching.pow(plies);
            (
                Just(branching),
                Just(plies),
                vec(0i32..10, leaves),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_alpha_beta_matches_minimax((branching, plies, leaves) in complete_trees()) {
            let game = complete(branching, plies, &leaves);

            let minimax = agent(Strategy::Minimax, plies).decide(&game).unwrap();
            let alpha_beta = agent(Strategy::AlphaBeta, plies).decide(&game).unwrap();

            prop_assert_eq!(alpha_beta.action, minimax.action);
            prop_assert_eq!(alpha_beta.value, minimax.value);
            prop_assert!(alpha_beta.stats.evaluations <= minimax.stats.evaluations);
        }
    }
}
