use crate::problem::Transition;

/// A path through the state space, from the initial state to the node currently considered.
///
/// The route starts with a synthetic entry holding only the initial state (no action, zero cost),
/// followed by the transitions taken so far. Extending a route produces a new one; the original
/// is left untouched so that siblings in the frontier can share the same prefix by value.
#[derive(Debug, Clone)]
pub struct Route<S, A> {
    origin: S,
    steps: Vec<Transition<S, A>>,
}

impl<S: Clone, A: Clone> Route<S, A> {
    /// Creates a route holding only the initial state.
    pub fn new(origin: S) -> Self {
        Self {
            origin,
            steps: Vec::new(),
        }
    }

    /// Returns a new route made of this one followed by `step`.
    pub fn extended(&self, step: Transition<S, A>) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend(self.steps.iter().cloned());
        steps.push(step);
        Self {
            origin: self.origin.clone(),
            steps,
        }
    }

    /// The state at the end of the route.
    pub fn current_state(&self) -> &S {
        self.steps
            .last()
            .map(|step| &step.state)
            .unwrap_or(&self.origin)
    }

    /// The actions along the route, excluding the synthetic leading entry.
    pub fn actions(&self) -> Vec<A> {
        self.steps.iter().map(|step| step.action.clone()).collect()
    }

    /// Number of transitions taken.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` while the route still sits at the initial state.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
