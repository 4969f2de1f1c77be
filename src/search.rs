use crate::error::{Result, SearchError};
use crate::frontier::{Frontier, PriorityFrontier, QueueFrontier, StackFrontier};
use crate::heuristic::{Heuristic, NullHeuristic};
use crate::problem::SearchProblem;
use crate::route::Route;
use log::{debug, trace};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The four graph-search algorithms. They share one skeleton and differ only in frontier
/// discipline and in how an extended route is prioritized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAlgorithm {
    /// Stack frontier, deepest routes first.
    DepthFirst,
    /// FIFO frontier, shallowest routes first.
    BreadthFirst,
    /// Priority frontier keyed by the cumulative path cost.
    UniformCost,
    /// Priority frontier keyed by path cost plus the heuristic estimate of the successor.
    AStar,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 4] = [
        SearchAlgorithm::DepthFirst,
        SearchAlgorithm::BreadthFirst,
        SearchAlgorithm::UniformCost,
        SearchAlgorithm::AStar,
    ];

    /// Short name, also accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            SearchAlgorithm::DepthFirst => "dfs",
            SearchAlgorithm::BreadthFirst => "bfs",
            SearchAlgorithm::UniformCost => "ucs",
            SearchAlgorithm::AStar => "astar",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depthfirstsearch" | "depth-first" => Ok(SearchAlgorithm::DepthFirst),
            "bfs" | "breadthfirstsearch" | "breadth-first" => Ok(SearchAlgorithm::BreadthFirst),
            "ucs" | "uniformcostsearch" | "uniform-cost" => Ok(SearchAlgorithm::UniformCost),
            "astar" | "astarsearch" | "a*" => Ok(SearchAlgorithm::AStar),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Counters collected during one search run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// States taken off the frontier and expanded.
    pub expanded: usize,
    /// Frontier entries discarded because their state had already been expanded.
    pub stale: usize,
}

/// A successful search result.
#[derive(Debug, Clone)]
pub struct Solution<A> {
    /// Actions leading from the initial state to a final state.
    pub actions: Vec<A>,
    /// `action_cost` of `actions` as reported by the problem.
    pub cost: f64,
    pub stats: SearchStats,
}

/// A configured graph search.
///
/// ```rust
/// use search_agents::search::{GraphSearch, SearchAlgorithm};
/// use search_agents::worlds::layout::Layout;
/// use search_agents::worlds::maze::{PositionSearchProblem, manhattan_heuristic};
///
/// let layout: Layout = "%%%%%\n%P .%\n%%%%%".parse().unwrap();
/// let problem = PositionSearchProblem::to_food(&layout).unwrap();
///
/// let search = GraphSearch::builder(SearchAlgorithm::AStar)
///     .with_heuristic(manhattan_heuristic)
///     .build();
/// let solution = search.solve(&problem).unwrap();
/// assert_eq!(solution.actions.len(), 2);
/// ```
pub struct GraphSearch<H = NullHeuristic> {
    algorithm: SearchAlgorithm,
    heuristic: H,
}

/// A builder for creating instances of [`GraphSearch`].
pub struct GraphSearchBuilder<H> {
    algorithm: SearchAlgorithm,
    heuristic: H,
}

impl<H> GraphSearchBuilder<H> {
    /// Sets the heuristic consulted by A*. Other algorithms ignore it.
    pub fn with_heuristic<G>(self, heuristic: G) -> GraphSearchBuilder<G> {
        GraphSearchBuilder {
            algorithm: self.algorithm,
            heuristic,
        }
    }

    pub fn build(self) -> GraphSearch<H> {
        GraphSearch {
            algorithm: self.algorithm,
            heuristic: self.heuristic,
        }
    }
}

impl GraphSearch<NullHeuristic> {
    /// Returns a new builder for `GraphSearch`, starting with the null heuristic.
    pub fn builder(algorithm: SearchAlgorithm) -> GraphSearchBuilder<NullHeuristic> {
        GraphSearchBuilder {
            algorithm,
            heuristic: NullHeuristic,
        }
    }
}

impl<H> GraphSearch<H> {
    /// Runs the configured algorithm on `problem`.
    pub fn solve<P>(&self, problem: &P) -> Result<Solution<P::Action>>
    where
        P: SearchProblem,
        H: Heuristic<P>,
    {
        let (actions, stats) = match self.algorithm {
            SearchAlgorithm::DepthFirst => {
                explore(problem, StackFrontier::default(), self.algorithm, |_| 0.0)
            }
            SearchAlgorithm::BreadthFirst => {
                explore(problem, QueueFrontier::default(), self.algorithm, |_| 0.0)
            }
            SearchAlgorithm::UniformCost => explore(
                problem,
                PriorityFrontier::default(),
                self.algorithm,
                |route| path_cost(problem, route),
            ),
            SearchAlgorithm::AStar => explore(
                problem,
                PriorityFrontier::default(),
                self.algorithm,
                |route| {
                    path_cost(problem, route)
                        + self.heuristic.estimate(route.current_state(), problem)
                },
            ),
        }?;
        let cost = problem.action_cost(&actions);
        Ok(Solution {
            actions,
            cost,
            stats,
        })
    }
}

/// Searches the deepest nodes first.
pub fn depth_first_search<P: SearchProblem>(problem: &P) -> Result<Vec<P::Action>> {
    explore(
        problem,
        StackFrontier::default(),
        SearchAlgorithm::DepthFirst,
        |_| 0.0,
    )
    .map(|(actions, _)| actions)
}

/// Searches the shallowest nodes first.
pub fn breadth_first_search<P: SearchProblem>(problem: &P) -> Result<Vec<P::Action>> {
    explore(
        problem,
        QueueFrontier::default(),
        SearchAlgorithm::BreadthFirst,
        |_| 0.0,
    )
    .map(|(actions, _)| actions)
}

/// Searches the route of least total cost first.
pub fn uniform_cost_search<P: SearchProblem>(problem: &P) -> Result<Vec<P::Action>> {
    explore(
        problem,
        PriorityFrontier::default(),
        SearchAlgorithm::UniformCost,
        |route| path_cost(problem, route),
    )
    .map(|(actions, _)| actions)
}

/// Searches the route with the lowest path cost plus heuristic estimate first.
pub fn a_star_search<P, H>(problem: &P, heuristic: &H) -> Result<Vec<P::Action>>
where
    P: SearchProblem,
    H: Heuristic<P> + ?Sized,
{
    explore(
        problem,
        PriorityFrontier::default(),
        SearchAlgorithm::AStar,
        |route| path_cost(problem, route) + heuristic.estimate(route.current_state(), problem),
    )
    .map(|(actions, _)| actions)
}

fn path_cost<P: SearchProblem>(problem: &P, route: &Route<P::State, P::Action>) -> f64 {
    problem.action_cost(&route.actions())
}

/// The graph-search skeleton shared by every algorithm.
///
/// `priority` is asked for the priority of each extended route right before it is pushed.
fn explore<P, F, K>(
    problem: &P,
    mut frontier: F,
    algorithm: SearchAlgorithm,
    priority: K,
) -> Result<(Vec<P::Action>, SearchStats)>
where
    P: SearchProblem,
    F: Frontier<Route<P::State, P::Action>>,
    K: Fn(&Route<P::State, P::Action>) -> f64,
{
    let mut visited: HashSet<P::State> = HashSet::new();
    let mut stats = SearchStats::default();

    frontier.push(Route::new(problem.initial_state()), 0.0);

    while let Some(route) = frontier.pop() {
        let state = route.current_state();
        if visited.contains(state) {
            stats.stale += 1;
            continue;
        }

        if problem.is_final(state) {
            debug!(
                "{algorithm} reached a final state after expanding {} states ({} actions)",
                stats.expanded,
                route.len()
            );
            return Ok((route.actions(), stats));
        }

        visited.insert(state.clone());
        stats.expanded += 1;

        let successors = problem.next_states(state);
        trace!(
            "{algorithm} expansion #{}: {} successors, frontier size {}",
            stats.expanded,
            successors.len(),
            frontier.len()
        );
        for transition in successors {
            if visited.contains(&transition.state) {
                continue;
            }
            let extended = route.extended(transition);
            let key = priority(&extended);
            frontier.push(extended, key);
        }
    }

    debug!(
        "{algorithm} exhausted the frontier after expanding {} states",
        stats.expanded
    );
    Err(SearchError::NoPath)
}
