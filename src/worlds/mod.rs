//! Contains pre-made grid worlds for the search and game traits.

/// Parsing of maze layouts and movement on the grid.
pub mod layout;
/// A `SearchProblem` for walking a maze to a goal cell.
pub mod maze;
/// A `GameState` where one agent eats food while ghosts chase it.
pub mod chase;
