pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A treatment plan omits a patient that the evaluated collection contains.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("missing treatment assignment for {name:?} ({id})")]
pub struct MissingAssignmentError {
    /// Identity of the unassigned patient.
    pub id: PatientId,
    /// Display name of the unassigned patient.
    pub name: String,
}

/// Errors raised by [`PatientCollection::optimal_treatment`](crate::PatientCollection::optimal_treatment).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    /// A patient's belief table is empty, so no treatment can be chosen for it.
    #[display("patient {name:?} ({id}) has no candidate treatments")]
    InfeasiblePatient {
        /// Identity of the untreatable patient.
        id: PatientId,
        /// Display name of the untreatable patient.
        name: String,
    },
    /// No full assignment fits within the budget.
    #[display("no treatment assignment for collection {identifier} fits within budget {budget}")]
    BudgetInfeasible {
        /// Identifier of the collection being solved.
        identifier: usize,
        /// The budget that could not be met.
        budget: Budget,
    },
}

/// Errors raised by [`Round::play`](crate::Round::play).
///
/// Every failure leaves the round unchanged; a failed `play` can be retried
/// with a corrected plan.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PlayError {
    /// The round was already played and must be reset before replaying.
    #[display("round {identifier} was already played; reset it to reassign treatments")]
    AlreadyPlayed {
        /// Identifier of the round.
        identifier: usize,
    },
    /// The plan does not cover every patient in the round.
    #[display("invalid plan: {_0}")]
    MissingAssignment(MissingAssignmentError),
    /// The plan's total cost exceeds the round's budget.
    #[display("assigned treatments cost {cost}, which exceeds the budget {max_cost}")]
    BudgetExceeded {
        /// Total cost of the submitted plan, restricted to the round's patients.
        cost: u64,
        /// The round's spending limit.
        max_cost: Budget,
    },
}

impl From<MissingAssignmentError> for PlayError {
    fn from(err: MissingAssignmentError) -> Self {
        PlayError::MissingAssignment(err)
    }
}

/// Errors raised by [`Game`](crate::Game) lifecycle operations.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// `start_new_round` was called while a round is still pending.
    #[display("an unfinished round already exists; access it through current_round")]
    RoundInProgress,
    /// A round operation was requested but no round is pending.
    #[display("no current round exists; start a new one with start_new_round")]
    NoCurrentRound,
    /// The game has ended; only `reset` is allowed.
    #[display("game has already ended; reset it to start again")]
    GameEnded,
    /// `get_round` was called with an index past the played-round history.
    #[display("no played round at index {index} (rounds played: {len})")]
    RoundIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of rounds played so far.
        len: usize,
    },
    /// The pending round rejected the submitted plan.
    #[display("{_0}")]
    Play(PlayError),
}
