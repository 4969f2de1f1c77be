/// Index of an agent taking part in a game.
pub type AgentIndex = usize;

/// The agent whose move the adversarial search decides. Every other index is an adversary.
pub const CONTROLLED_AGENT: AgentIndex = 0;

/// The central trait for adversarial search, describing a multi-agent, turn-taking game state.
///
/// Agents move in index order: the controlled agent first, then every adversary, then the
/// controlled agent again. Successor states are new values; the original state is never changed.
pub trait GameState: Sized {
    /// The type representing a move in the game.
    type Action: Clone;

    /// Returns the moves available to `agent` in this state. Terminal states have none.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// Returns the state reached after `agent` plays `action`.
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;

    /// Returns the number of agents, the controlled one included.
    fn agent_count(&self) -> usize;

    /// Returns `true` if the controlled agent has won.
    fn is_win(&self) -> bool;

    /// Returns `true` if the controlled agent has lost.
    fn is_lose(&self) -> bool;

    /// Returns the game's own score of the state, from the controlled agent's point of view.
    fn score(&self) -> f64;

    /// Returns `true` for won or lost states.
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}
