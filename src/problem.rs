use std::hash::Hash;

/// The central trait for graph search, describing a state-transition problem.
///
/// To run any of the search algorithms on a custom world, this trait must be implemented.
/// None of the methods have default bodies, so a problem that forgets one is rejected by the
/// compiler instead of failing at run time.
pub trait SearchProblem {
    /// A configuration of the world. States are never mutated once produced; they are cloned
    /// into routes and hashed into the visited set.
    type State: Clone + Eq + Hash;

    /// A single move from one state to one of its successors.
    type Action: Clone;

    /// Returns the state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Returns `true` if and only if `state` satisfies the goal condition.
    fn is_final(&self, state: &Self::State) -> bool;

    /// Returns every legal one-step expansion of `state`.
    ///
    /// The list must be finite and the same for repeated calls with the same state.
    fn next_states(&self, state: &Self::State) -> Vec<Transition<Self::State, Self::Action>>;

    /// Returns the total cost of executing `actions` from the initial state.
    ///
    /// Only legal, self-consistent sequences are ever passed in by the engine; the result for
    /// anything else is up to the implementation.
    fn action_cost(&self, actions: &[Self::Action]) -> f64;
}

/// One step produced by expanding a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, A> {
    /// The state reached by taking `action`.
    pub state: S,
    /// The action that leads to `state`.
    pub action: A,
    /// The non-negative cost of this single step.
    pub cost: f64,
}

impl<S, A> Transition<S, A> {
    /// Creates a step reaching `state` through `action` at `cost`.
    pub fn new(state: S, action: A, cost: f64) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}
