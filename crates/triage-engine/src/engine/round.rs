use serde::{Deserialize, Serialize};

use crate::{
    PlayError, SolveError,
    core::{
        collection::PatientCollection,
        patient::Patient,
        plan::TreatmentPlan,
        solver::{Budget, OptimalTreatment},
    },
};

/// Scores of a played round.
///
/// Immutable once computed: the only way back is [`Round::reset`], which
/// discards the record wholesale. `expected_life_gain` is what the
/// classifier anticipated; `true_life_gain` is what the hidden diseases
/// actually paid out. Comparing the two across rounds is the point of the
/// game.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoundResults {
    cost: u64,
    expected_life_gain: f64,
    true_life_gain: f64,
}

impl RoundResults {
    /// Total cost of the assigned treatments.
    #[must_use]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Classifier-anticipated total life gain of the assignment.
    #[must_use]
    pub fn expected_life_gain(&self) -> f64 {
        self.expected_life_gain
    }

    /// Life gain actually realized by the assignment.
    #[must_use]
    pub fn true_life_gain(&self) -> f64 {
        self.true_life_gain
    }
}

/// The outcome slot of a played round.
///
/// Holding plan and results in one record makes "assigned iff scored"
/// structural: neither can exist without the other.
#[derive(Debug, Clone)]
struct PlayedOutcome {
    plan: TreatmentPlan,
    results: RoundResults,
}

/// A patient collection bound to a budget, playable exactly once.
///
/// A round starts unplayed. [`Round::play`] validates and scores a plan
/// atomically: on any failure the round is left untouched, on success the
/// restricted plan and its [`RoundResults`] are stored together and the
/// round refuses further plays until [`Round::reset`].
#[derive(Debug, Clone)]
pub struct Round {
    collection: PatientCollection,
    max_cost: Budget,
    outcome: Option<PlayedOutcome>,
}

impl Round {
    /// Creates an unplayed round over `collection` with the given budget.
    #[must_use]
    pub fn new(collection: PatientCollection, max_cost: Budget) -> Self {
        Self {
            collection,
            max_cost,
            outcome: None,
        }
    }

    /// Returns the round's identifier (assigned by its creator).
    #[must_use]
    pub fn identifier(&self) -> usize {
        self.collection.identifier()
    }

    /// Returns the underlying patient collection.
    #[must_use]
    pub fn collection(&self) -> &PatientCollection {
        &self.collection
    }

    /// Number of patients in the round.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Returns `true` if the round holds no patients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Returns the round's patients in order.
    #[must_use]
    pub fn patients(&self) -> &[Patient] {
        self.collection.patients()
    }

    /// Returns the round's spending limit.
    #[must_use]
    pub fn max_cost(&self) -> Budget {
        self.max_cost
    }

    /// Returns `true` once the round has been played.
    #[must_use]
    pub fn was_played(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns the stored plan of a played round, restricted to the round's
    /// patients.
    #[must_use]
    pub fn assigned_treatment(&self) -> Option<&TreatmentPlan> {
        self.outcome.as_ref().map(|outcome| &outcome.plan)
    }

    /// Returns the scores of a played round.
    #[must_use]
    pub fn results(&self) -> Option<&RoundResults> {
        self.outcome.as_ref().map(|outcome| &outcome.results)
    }

    /// Clears the assignment and results, making the round playable again.
    ///
    /// The patient set and budget are untouched.
    pub fn reset(&mut self) {
        self.outcome = None;
    }

    /// Computes the best possible plan for this round under its own budget.
    ///
    /// Useful as a benchmark for a human- or policy-supplied plan; does not
    /// change the round's state.
    pub fn optimal_treatment(&self) -> Result<OptimalTreatment, SolveError> {
        self.collection.optimal_treatment(self.max_cost)
    }

    /// Plays the round: validates the plan, computes the scores, and stores
    /// both.
    ///
    /// The plan may cover a superset of the round's patients; surplus
    /// assignments are dropped with a logged warning. State is unchanged on
    /// every failure path.
    ///
    /// # Errors
    ///
    /// * [`PlayError::AlreadyPlayed`] if the round was played and not reset.
    /// * [`PlayError::MissingAssignment`] if the plan omits a round patient.
    /// * [`PlayError::BudgetExceeded`] if the restricted plan's cost exceeds
    ///   the budget.
    pub fn play(&mut self, plan: &TreatmentPlan) -> Result<&RoundResults, PlayError> {
        if self.was_played() {
            return Err(PlayError::AlreadyPlayed {
                identifier: self.identifier(),
            });
        }

        let mut assigned = TreatmentPlan::new();
        for patient in &self.collection {
            let treated =
                plan.treated_disease(patient.id())
                    .ok_or_else(|| crate::MissingAssignmentError {
                        id: patient.id(),
                        name: patient.name().to_owned(),
                    })?;
            assigned.assign(patient.id(), treated);
        }
        if plan.len() > assigned.len() {
            log::warn!(
                "round {}: plan assigns {} patients outside the round; ignoring them",
                self.identifier(),
                plan.len() - assigned.len()
            );
        }

        let cost = self.collection.treatment_cost(&assigned)?;
        if !self.max_cost.allows(cost) {
            return Err(PlayError::BudgetExceeded {
                cost,
                max_cost: self.max_cost,
            });
        }

        let results = RoundResults {
            cost,
            expected_life_gain: self.collection.expected_life_gain(&assigned)?,
            true_life_gain: self.collection.true_life_gain(&assigned)?,
        };
        let outcome = self.outcome.insert(PlayedOutcome {
            plan: assigned,
            results,
        });
        Ok(&outcome.results)
    }
}
