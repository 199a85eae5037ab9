use crate::MissingAssignmentError;

use super::{disease::Disease, patient::Patient, plan::TreatmentPlan};

/// An ordered, identified set of patients.
///
/// Insertion order is significant: it is the iteration order of every
/// evaluator and the patient-level tie-break order of the solver. The
/// collection holds no assignment state of its own; cost and gain are pure
/// functions of its patients and a submitted plan.
#[derive(Debug, Clone)]
pub struct PatientCollection {
    identifier: usize,
    patients: Vec<Patient>,
}

impl PatientCollection {
    /// Creates a collection from patients in the given order.
    #[must_use]
    pub fn new(patients: Vec<Patient>, identifier: usize) -> Self {
        Self {
            identifier,
            patients,
        }
    }

    /// Returns the identifier assigned by the collection's creator.
    #[must_use]
    pub fn identifier(&self) -> usize {
        self.identifier
    }

    /// Number of patients in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// Returns `true` if the collection holds no patients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Returns the patients in insertion order.
    #[must_use]
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Iterates over the patients in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Patient> {
        self.patients.iter()
    }

    /// Resolves a plan against this collection: one treated disease per
    /// patient, in patient order.
    pub(crate) fn resolve(
        &self,
        plan: &TreatmentPlan,
    ) -> Result<Vec<Disease>, MissingAssignmentError> {
        self.patients
            .iter()
            .map(|patient| {
                plan.treated_disease(patient.id())
                    .ok_or_else(|| MissingAssignmentError {
                        id: patient.id(),
                        name: patient.name().to_owned(),
                    })
            })
            .collect()
    }

    /// Total cost of the plan, restricted to this collection's patients.
    pub fn treatment_cost(&self, plan: &TreatmentPlan) -> Result<u64, MissingAssignmentError> {
        let treated = self.resolve(plan)?;
        Ok(treated.iter().map(|d| d.treatment_cost()).sum())
    }

    /// Total classifier-anticipated life gain of the plan over this
    /// collection.
    pub fn expected_life_gain(&self, plan: &TreatmentPlan) -> Result<f64, MissingAssignmentError> {
        let treated = self.resolve(plan)?;
        Ok(self
            .iter()
            .zip(treated)
            .map(|(patient, d)| patient.expected_life_gain(d))
            .sum())
    }

    /// Total life gain actually realized by the plan over this collection.
    pub fn true_life_gain(&self, plan: &TreatmentPlan) -> Result<f64, MissingAssignmentError> {
        let treated = self.resolve(plan)?;
        Ok(self
            .iter()
            .zip(treated)
            .map(|(patient, d)| patient.true_life_gain(d))
            .sum())
    }
}

impl<'a> IntoIterator for &'a PatientCollection {
    type Item = &'a Patient;
    type IntoIter = std::slice::Iter<'a, Patient>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
