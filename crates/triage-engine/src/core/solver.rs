//! Budget-constrained optimal treatment assignment.
//!
//! Finding the best plan for a [`PatientCollection`] is a multiple-choice
//! knapsack: each patient is a group, each disease in its belief table a
//! choice with a `(cost, expected gain)` pair, exactly one choice is taken
//! per group, and the total cost must stay within the budget.
//!
//! With an unlimited budget the problem decouples into independent
//! per-patient maximizations. With a limited budget it is solved by dynamic
//! programming over cost levels `0..=budget`, one layer per patient, with a
//! backpointer table to recover the concrete assignment. Costs are integral
//! by construction of the cost table, so the DP table is finite.
//!
//! The solver is a pure function of the collection and the budget; it is
//! independent of [`Round::play`](crate::Round::play) and can benchmark a
//! human- or policy-supplied plan against the best possible outcome.

use serde::{Deserialize, Serialize};

use crate::SolveError;

use super::{
    collection::PatientCollection, disease::Disease, patient::Patient, plan::TreatmentPlan,
};

/// Spending limit for a solver call or a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    /// No spending limit.
    Unlimited,
    /// Total treatment cost must not exceed the given amount.
    Limited(u64),
}

impl Budget {
    /// Returns `true` if a total cost fits within this budget.
    #[must_use]
    pub const fn allows(self, cost: u64) -> bool {
        match self {
            Budget::Unlimited => true,
            Budget::Limited(max_cost) => cost <= max_cost,
        }
    }
}

impl From<u64> for Budget {
    fn from(max_cost: u64) -> Self {
        Budget::Limited(max_cost)
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Budget::Unlimited => f.write_str("unlimited"),
            Budget::Limited(max_cost) => write!(f, "{max_cost}"),
        }
    }
}

/// Best feasible assignment found by [`PatientCollection::optimal_treatment`].
#[derive(Debug, Clone)]
pub struct OptimalTreatment {
    plan: TreatmentPlan,
    expected_life_gain: f64,
    cost: u64,
}

impl OptimalTreatment {
    /// The optimal plan; assigns exactly one disease to every patient of the
    /// solved collection.
    #[must_use]
    pub fn plan(&self) -> &TreatmentPlan {
        &self.plan
    }

    /// Consumes the result, returning the optimal plan.
    #[must_use]
    pub fn into_plan(self) -> TreatmentPlan {
        self.plan
    }

    /// Total expected life gain of the optimal plan.
    #[must_use]
    pub fn expected_life_gain(&self) -> f64 {
        self.expected_life_gain
    }

    /// Total treatment cost of the optimal plan.
    #[must_use]
    pub fn cost(&self) -> u64 {
        self.cost
    }
}

/// One candidate treatment for one patient.
#[derive(Debug, Clone, Copy)]
struct Choice {
    treated: Disease,
    cost: u64,
    gain: f64,
}

fn choices(patient: &Patient) -> impl Iterator<Item = Choice> + '_ {
    patient.treatment_options().map(|treated| Choice {
        treated,
        cost: treated.treatment_cost(),
        gain: patient.expected_life_gain(treated),
    })
}

/// Partial solution value: total gain, and the total cost that achieved it.
///
/// Ordering is lexicographic: higher gain wins, equal gains prefer lower
/// cost, full ties keep the incumbent (first discovered in patient/choice
/// iteration order). The tie-break is deterministic but not load-bearing.
#[derive(Debug, Clone, Copy)]
struct Value {
    gain: f64,
    cost: u64,
}

impl Value {
    const ZERO: Value = Value { gain: 0.0, cost: 0 };

    fn improves(self, incumbent: Option<Value>) -> bool {
        match incumbent {
            None => true,
            Some(v) => self.gain > v.gain || (self.gain == v.gain && self.cost < v.cost),
        }
    }
}

impl PatientCollection {
    /// Computes an assignment of one treatment per patient, drawn from each
    /// patient's belief-table keys, maximizing total expected life gain
    /// subject to the budget.
    ///
    /// # Errors
    ///
    /// * [`SolveError::InfeasiblePatient`] if a patient's belief table is
    ///   empty (it has no candidate treatment to choose from).
    /// * [`SolveError::BudgetInfeasible`] if no full assignment fits within
    ///   the budget.
    pub fn optimal_treatment(&self, budget: Budget) -> Result<OptimalTreatment, SolveError> {
        for patient in self {
            if patient.treatment_options().next().is_none() {
                return Err(SolveError::InfeasiblePatient {
                    id: patient.id(),
                    name: patient.name().to_owned(),
                });
            }
        }

        match budget {
            Budget::Unlimited => Ok(self.optimal_unbounded()),
            Budget::Limited(max_cost) => {
                // If even the most expensive choice of every patient fits,
                // the constraint is inactive and the problem decouples.
                let spend_cap: u64 = self
                    .iter()
                    .map(|patient| {
                        choices(patient)
                            .map(|choice| choice.cost)
                            .max()
                            .unwrap_or(0)
                    })
                    .sum();
                if max_cost >= spend_cap {
                    Ok(self.optimal_unbounded())
                } else {
                    self.optimal_bounded(max_cost)
                }
            }
        }
    }

    /// Per-patient independent maximization; valid when the budget can never
    /// bind.
    fn optimal_unbounded(&self) -> OptimalTreatment {
        let mut plan = TreatmentPlan::new();
        let mut total = Value::ZERO;
        for patient in self {
            let mut best: Option<Choice> = None;
            for choice in choices(patient) {
                let improves = match best {
                    None => true,
                    Some(b) => {
                        choice.gain > b.gain || (choice.gain == b.gain && choice.cost < b.cost)
                    }
                };
                if improves {
                    best = Some(choice);
                }
            }
            let best = best.expect("patients without options are rejected up front");
            plan.assign(patient.id(), best.treated);
            total.gain += best.gain;
            total.cost += best.cost;
        }
        OptimalTreatment {
            plan,
            expected_life_gain: total.gain,
            cost: total.cost,
        }
    }

    /// Dynamic program over cost levels `0..=max_cost`.
    ///
    /// `best[b]` holds the best attainable value with total cost at most
    /// `b` after the patients processed so far; each patient layer applies
    /// the transition `best_new[b] = max(best_new[b], best_old[b - cost(d)]
    /// + gain(d))` over its choices. Backpointers record the choice and the
    /// prior cost level that set each cell, for assignment recovery.
    ///
    /// Complexity is O(patients × choices × `max_cost`).
    fn optimal_bounded(&self, max_cost: u64) -> Result<OptimalTreatment, SolveError> {
        let width = usize::try_from(max_cost)
            .ok()
            .and_then(|w| w.checked_add(1))
            .expect("budget below the aggregate cost cap fits in memory");

        let mut best: Vec<Option<Value>> = vec![Some(Value::ZERO); width];
        let mut back: Vec<Vec<Option<(Disease, usize)>>> = Vec::with_capacity(self.len());

        for patient in self {
            let mut next: Vec<Option<Value>> = vec![None; width];
            let mut layer: Vec<Option<(Disease, usize)>> = vec![None; width];
            for choice in choices(patient) {
                let Ok(step) = usize::try_from(choice.cost) else {
                    continue; // cannot fit in any budget level
                };
                if step >= width {
                    continue;
                }
                for level in step..width {
                    let Some(prior) = best[level - step] else {
                        continue;
                    };
                    let value = Value {
                        gain: prior.gain + choice.gain,
                        cost: prior.cost + choice.cost,
                    };
                    if value.improves(next[level]) {
                        next[level] = Some(value);
                        layer[level] = Some((choice.treated, level - step));
                    }
                }
            }
            best = next;
            back.push(layer);
        }

        let Some(total) = best[width - 1] else {
            return Err(SolveError::BudgetInfeasible {
                identifier: self.identifier(),
                budget: Budget::Limited(max_cost),
            });
        };

        let mut plan = TreatmentPlan::new();
        let mut level = width - 1;
        for (patient, layer) in self.iter().zip(&back).rev() {
            let (treated, prior_level) =
                layer[level].expect("backpointers cover every reachable cell");
            plan.assign(patient.id(), treated);
            level = prior_level;
        }

        Ok(OptimalTreatment {
            plan,
            expected_life_gain: total.gain,
            cost: total.cost,
        })
    }
}
