use thiserror::Error;

/// Failures reported by the search and decision entry points.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// The frontier ran dry before any final state was reached.
    #[error("no path to a final state was found")]
    NoPath,

    /// The controlled agent has nothing to play at the root of the game tree.
    #[error("the controlled agent has no legal actions")]
    NoLegalActions,

    #[error("unknown search algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown adversarial strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown evaluation function: {0}")]
    UnknownEvaluation(String),

    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),
}

/// Failures while parsing a text layout.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {tile:?} at row {row}, column {column}")]
    UnknownTile { tile: char, row: usize, column: usize },

    #[error("layout has no controlled agent ('P')")]
    MissingAgent,

    #[error("layout has more than one controlled agent ('P')")]
    DuplicateAgent,
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
