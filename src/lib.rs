//! A small library of classic search agents.
//!
//! Graph search (depth-first, breadth-first, uniform-cost and A*) runs over any type implementing
//! [`SearchProblem`](problem::SearchProblem). Adversarial search (minimax, alpha-beta and
//! expectimax) picks moves for agent 0 of any multi-agent [`GameState`](game::GameState).
//! Both come with grid worlds to try them on.
//!
//! # Example
//!
//! ```rust
//! use search_agents::adversarial::{AdversarialAgent, Strategy};
//! use search_agents::search::{GraphSearch, SearchAlgorithm};
//! use search_agents::worlds::chase::ChaseState;
//! use search_agents::worlds::layout::{Direction, Layout};
//! use search_agents::worlds::maze::{GridHeuristic, PositionSearchProblem};
//!
//! // Find the only food pellet of a maze
//! let layout: Layout = "%%%%%%\n%P  .%\n%%%%%%".parse().unwrap();
//! let problem = PositionSearchProblem::to_food(&layout).unwrap();
//! let search = GraphSearch::builder(SearchAlgorithm::AStar)
//!     .with_heuristic(GridHeuristic::Manhattan)
//!     .build();
//! let solution = search.solve(&problem).unwrap();
//! assert_eq!(solution.actions, vec![Direction::East; 3]);
//!
//! // Choose a move in the same maze with a ghost around
//! let state: ChaseState = "%%%%%%\n%P .G%\n%%%%%%".parse().unwrap();
//! let agent = AdversarialAgent::builder(Strategy::AlphaBeta)
//!     .with_depth(2)
//!     .build();
//! let action = agent.get_action(&state).unwrap();
//! println!("The best move is: {:?}", action);
//! ```

/// Minimax, alpha-beta and expectimax agents.
pub mod adversarial;
/// Error types shared by the whole crate.
pub mod error;
/// Evaluation functions scoring game states at the search horizon.
pub mod evaluation;
/// Stack, queue and priority frontiers.
pub mod frontier;
/// Contains the `GameState` trait that defines the interface for a multi-agent game.
pub mod game;
/// Contains the `Heuristic` trait and the null heuristic.
pub mod heuristic;
/// Contains the `SearchProblem` trait that defines the interface for a graph search problem.
pub mod problem;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Partial paths kept on the frontier.
pub mod route;
/// The core graph search module, containing `GraphSearch` and the four algorithms.
pub mod search;
/// Contains pre-made worlds implementing the search and game traits.
pub mod worlds;
