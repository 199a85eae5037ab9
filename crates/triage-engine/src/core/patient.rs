use std::{
    collections::BTreeMap,
    hash::{Hash, Hasher},
    sync::atomic::{AtomicU64, Ordering},
};

use super::disease::Disease;

static NEXT_PATIENT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique patient identity.
///
/// Allocated at patient construction and never reused within a process.
/// Patient equality and hashing go through this id alone, so two patients
/// with identical visible fields remain distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("patient#{_0}")]
pub struct PatientId(u64);

impl PatientId {
    fn next() -> Self {
        PatientId(NEXT_PATIENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A synthetic patient: a hidden true disease, a classifier's belief
/// distribution over diseases, and a per-disease benefit table.
///
/// Patients are immutable value entities. All fields are set at construction
/// and no mutators exist; a patient lives read-only for the lifetime of its
/// round.
///
/// The belief table's key set defines the patient's *treatable options*:
/// treatments outside it are not meaningful choices for optimization. Both
/// tables default absent keys to zero.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use triage_engine::{Disease, Patient};
///
/// let patient = Patient::new(
///     "John",
///     Disease::Cold,
///     BTreeMap::from([(Disease::Healthy, 0.0), (Disease::Cold, 3.0)]),
///     BTreeMap::from([(Disease::Healthy, 0.3), (Disease::Cold, 0.7)]),
/// );
///
/// assert_eq!(patient.true_life_gain(Disease::Cold), 3.0);
/// assert_eq!(patient.expected_life_gain(Disease::Cold), 0.7 * 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct Patient {
    id: PatientId,
    name: String,
    true_disease: Disease,
    benefit: BTreeMap<Disease, f64>,
    belief: BTreeMap<Disease, f64>,
}

impl Patient {
    /// Creates a patient with a fresh unique id.
    ///
    /// `benefit` holds the non-negative life-gain realized if the patient is
    /// correctly treated for each disease; `belief` holds the classifier's
    /// confidence that the patient has each disease.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        true_disease: Disease,
        benefit: BTreeMap<Disease, f64>,
        belief: BTreeMap<Disease, f64>,
    ) -> Self {
        Self {
            id: PatientId::next(),
            name: name.into(),
            true_disease,
            benefit,
            belief,
        }
    }

    /// Returns the patient's unique identity.
    #[must_use]
    pub fn id(&self) -> PatientId {
        self.id
    }

    /// Returns the patient's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the patient's actual (hidden) disease.
    #[must_use]
    pub fn true_disease(&self) -> Disease {
        self.true_disease
    }

    /// Returns the life-gain realized if `disease` is the patient's true
    /// disease and is treated. Absent table entries are zero.
    #[must_use]
    pub fn benefit(&self, disease: Disease) -> f64 {
        self.benefit.get(&disease).copied().unwrap_or(0.0)
    }

    /// Returns the classifier's confidence that the patient has `disease`.
    /// Absent table entries are zero.
    #[must_use]
    pub fn belief(&self, disease: Disease) -> f64 {
        self.belief.get(&disease).copied().unwrap_or(0.0)
    }

    /// Returns the diseases the patient can be treated for, in deterministic
    /// (canonical disease) order.
    ///
    /// This is the belief table's key set; its order is the solver's
    /// tie-break order.
    pub fn treatment_options(&self) -> impl Iterator<Item = Disease> + '_ {
        self.belief.keys().copied()
    }

    /// Life-gain actually realized by treating the patient for `treated`.
    ///
    /// Treating the wrong disease never yields benefit, even if the benefit
    /// table has a nonzero entry for it.
    #[must_use]
    pub fn true_life_gain(&self, treated: Disease) -> f64 {
        if treated == self.true_disease {
            self.benefit(treated)
        } else {
            0.0
        }
    }

    /// Classifier-weighted anticipated benefit of treating `treated`: the
    /// probability the classifier assigns to `treated` being correct, times
    /// the benefit realized if so.
    #[must_use]
    pub fn expected_life_gain(&self, treated: Disease) -> f64 {
        self.belief(treated) * self.benefit(treated)
    }
}

impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Patient {}

impl Hash for Patient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> Patient {
        Patient::new(
            "John",
            Disease::Cold,
            BTreeMap::from([(Disease::Healthy, 0.0), (Disease::Cold, 3.0)]),
            BTreeMap::from([(Disease::Healthy, 0.3), (Disease::Cold, 0.7)]),
        )
    }

    fn jane() -> Patient {
        Patient::new(
            "Jane",
            Disease::Healthy,
            BTreeMap::from([(Disease::Healthy, 0.0), (Disease::LungCancer, 10.0)]),
            BTreeMap::from([(Disease::Healthy, 0.2), (Disease::LungCancer, 0.8)]),
        )
    }

    mod valuation {
        use super::*;

        #[test]
        fn test_true_life_gain_only_for_true_disease() {
            let patient = john();
            assert_eq!(patient.true_life_gain(Disease::Healthy), 0.0);
            assert_eq!(patient.true_life_gain(Disease::LungCancer), 0.0);
            assert_eq!(patient.true_life_gain(Disease::Cold), 3.0);
        }

        #[test]
        fn test_wrong_treatment_ignores_nonzero_benefit_entry() {
            // Jane's benefit table has 10.0 for lung cancer, but she is healthy.
            let patient = jane();
            assert_eq!(patient.benefit(Disease::LungCancer), 10.0);
            assert_eq!(patient.true_life_gain(Disease::LungCancer), 0.0);
        }

        #[test]
        fn test_expected_life_gain_is_belief_times_benefit() {
            let patient = john();
            assert_eq!(patient.expected_life_gain(Disease::Healthy), 0.0);
            assert_eq!(patient.expected_life_gain(Disease::LungCancer), 0.0);
            assert_eq!(patient.expected_life_gain(Disease::Cold), 0.7 * 3.0);
        }

        #[test]
        fn test_absent_table_entries_default_to_zero() {
            let patient = john();
            assert_eq!(patient.belief(Disease::Flu), 0.0);
            assert_eq!(patient.benefit(Disease::Flu), 0.0);
            assert_eq!(patient.expected_life_gain(Disease::Flu), 0.0);
        }
    }

    mod identity {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn test_distinct_patients_are_never_equal() {
            let a = john();
            let b = john();
            assert_ne!(a.id(), b.id());
            assert_ne!(a, b);
        }

        #[test]
        fn test_hashing_follows_identity() {
            let a = john();
            let b = john();
            let set: HashSet<Patient> = [a.clone(), b].into_iter().collect();
            assert_eq!(set.len(), 2);
            assert!(set.contains(&a));
        }

        #[test]
        fn test_clone_preserves_identity() {
            let a = jane();
            let b = a.clone();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_treatment_options_follow_belief_keys() {
        let patient = jane();
        let options: Vec<_> = patient.treatment_options().collect();
        assert_eq!(options, vec![Disease::Healthy, Disease::LungCancer]);
    }
}
