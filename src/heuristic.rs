use crate::problem::SearchProblem;

/// An estimate of the remaining cost from a state to the nearest final state.
///
/// The engine never checks admissibility or consistency. A* only returns cost-optimal paths
/// when the caller supplies a heuristic that has both properties.
pub trait Heuristic<P: SearchProblem + ?Sized> {
    fn estimate(&self, state: &P::State, problem: &P) -> f64;
}

impl<P, F> Heuristic<P> for F
where
    P: SearchProblem + ?Sized,
    F: Fn(&P::State, &P) -> f64,
{
    fn estimate(&self, state: &P::State, problem: &P) -> f64 {
        self(state, problem)
    }
}

/// The trivial heuristic. With it, A* orders the frontier exactly like uniform-cost search.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHeuristic;

impl<P: SearchProblem + ?Sized> Heuristic<P> for NullHeuristic {
    fn estimate(&self, _state: &P::State, _problem: &P) -> f64 {
        0.0
    }
}

/// Function form of [`NullHeuristic`].
pub fn null_heuristic<P: SearchProblem + ?Sized>(_state: &P::State, _problem: &P) -> f64 {
    0.0
}
