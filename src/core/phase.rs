//! Game status, turn phases and the special-phase queue.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Overall session status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Normal play: intents are accepted.
    GameOn,
    /// Terminal: a winner has been declared.
    Ended,
    /// Map editing; no player intents are accepted.
    #[default]
    Editor,
}

/// Regular phase of a player's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    #[default]
    Move,
    Attack,
}

/// Interrupt-like sub-phase resolving the consequences of a combat.
///
/// `AttackerRetreat` and `DefenderRetreat` exist for save-data compatibility
/// and are never queued by the current rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialPhase {
    AttackerRetreat,
    DefenderRetreat,
    Advance,
    AttackerDamage,
}

/// FIFO queue of pending special phases.
///
/// The front entry is the current special phase; while the queue is
/// non-empty it takes priority over regular phase input handling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPhaseQueue {
    queue: VecDeque<SpecialPhase>,
}

impl SpecialPhaseQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current (front) special phase, if any.
    #[must_use]
    pub fn current(&self) -> Option<SpecialPhase> {
        self.queue.front().copied()
    }

    /// Append a phase at the back.
    pub fn push(&mut self, phase: SpecialPhase) {
        self.queue.push_back(phase);
    }

    /// Remove and return the current phase.
    pub fn pop(&mut self) -> Option<SpecialPhase> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Iterate front to back.
    pub fn iter(&self) -> impl Iterator<Item = SpecialPhase> + '_ {
        self.queue.iter().copied()
    }

    /// Count queued entries of one kind.
    #[must_use]
    pub fn count(&self, phase: SpecialPhase) -> usize {
        self.queue.iter().filter(|&&p| p == phase).count()
    }
}

impl FromIterator<SpecialPhase> for SpecialPhaseQueue {
    fn from_iter<I: IntoIterator<Item = SpecialPhase>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}
