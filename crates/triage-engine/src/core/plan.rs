use std::collections::HashMap;

use super::{disease::Disease, patient::PatientId};

/// A treatment decision: which disease to treat for each patient.
///
/// A plan may cover a superset of a collection's patients; evaluation and
/// play restrict it to the patients at hand. Assigning a patient twice
/// replaces the earlier choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatmentPlan {
    assignments: HashMap<PatientId, Disease>,
}

impl TreatmentPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a treatment to a patient, returning the replaced choice if
    /// the patient was already assigned.
    pub fn assign(&mut self, patient: PatientId, treated: Disease) -> Option<Disease> {
        self.assignments.insert(patient, treated)
    }

    /// Returns the disease assigned for treatment to `patient`, if any.
    #[must_use]
    pub fn treated_disease(&self, patient: PatientId) -> Option<Disease> {
        self.assignments.get(&patient).copied()
    }

    /// Returns `true` if the plan assigns a treatment to `patient`.
    #[must_use]
    pub fn contains(&self, patient: PatientId) -> bool {
        self.assignments.contains_key(&patient)
    }

    /// Number of assigned patients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` if no patient is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates over `(patient, treated disease)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (PatientId, Disease)> + '_ {
        self.assignments.iter().map(|(&id, &d)| (id, d))
    }
}

impl FromIterator<(PatientId, Disease)> for TreatmentPlan {
    fn from_iter<I: IntoIterator<Item = (PatientId, Disease)>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}

impl Extend<(PatientId, Disease)> for TreatmentPlan {
    fn extend<I: IntoIterator<Item = (PatientId, Disease)>>(&mut self, iter: I) {
        self.assignments.extend(iter);
    }
}
