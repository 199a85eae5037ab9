use std::collections::BTreeMap;

use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use triage_engine::{Disease, Patient, PatientProvider};

use crate::{
    classifier::DirichletClassifier,
    seed::ClassifierSeed,
    transform::{Identity, SimplexTransform},
};

/// Typical life-gain from correctly treating each disease.
///
/// A reference table for providers only; the engine core never consults it.
/// Per-patient benefit tables are drawn around these values.
#[must_use]
pub const fn typical_benefit(disease: Disease) -> f64 {
    match disease {
        Disease::Healthy => 0.0,
        Disease::Cold => 3.0,
        Disease::Flu => 5.0,
        Disease::LungCancer => 10.0,
    }
}

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Clara", "Daan", "Elif", "Femke", "Greta", "Hugo", "Ines", "Jonas", "Klara",
    "Lars", "Mira", "Noor", "Otto", "Pia",
];

const LAST_NAMES: &[&str] = &[
    "Albrecht", "Bakker", "Conti", "Dreyer", "Eriksen", "Fischer", "Garcia", "Hoffmann",
    "Ivanova", "Jansen", "Keller", "Lindgren", "Moretti", "Novak", "Okafor", "Petrov",
];

/// A [`PatientProvider`] backed by a [`DirichletClassifier`].
///
/// Each patient gets a name from a fixed pool, a `(true disease, belief)`
/// pair from the classifier, and a benefit table drawn per disease as
/// `round(typical_benefit × U(0, 2))`, adding per-patient variance to how
/// useful medicine is.
///
/// The provider owns a second RNG for names and benefits so that classifier
/// streams and patient dressing stay independently reproducible.
#[derive(Debug, Clone)]
pub struct SampledPatientProvider<T = Identity> {
    classifier: DirichletClassifier<T>,
    rng: Pcg32,
}

impl SampledPatientProvider<Identity> {
    /// A provider over a calibrated uniform-Dirichlet classifier, randomly
    /// seeded.
    #[must_use]
    pub fn uniform() -> Self {
        Self::new(DirichletClassifier::uniform())
    }
}

impl<T: SimplexTransform> SampledPatientProvider<T> {
    /// Creates a provider with a randomly seeded dressing RNG.
    #[must_use]
    pub fn new(classifier: DirichletClassifier<T>) -> Self {
        Self::with_seed(classifier, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for names and benefit
    /// variance.
    #[must_use]
    pub fn with_seed(classifier: DirichletClassifier<T>, seed: ClassifierSeed) -> Self {
        Self {
            classifier,
            rng: Pcg32::from_seed(seed.to_bytes()),
        }
    }

    fn next_patient(&mut self) -> Patient {
        let first = FIRST_NAMES
            .choose(&mut self.rng)
            .expect("name pool is non-empty");
        let last = LAST_NAMES
            .choose(&mut self.rng)
            .expect("name pool is non-empty");
        let (true_disease, confidences) = self.classifier.sample();

        let mut belief = BTreeMap::new();
        let mut benefit = BTreeMap::new();
        for (i, disease) in Disease::ALL.into_iter().enumerate() {
            belief.insert(disease, confidences[i]);
            let effect = (typical_benefit(disease) * self.rng.random_range(0.0..2.0)).round();
            benefit.insert(disease, effect);
        }

        Patient::new(format!("{first} {last}"), true_disease, benefit, belief)
    }
}

impl<T: SimplexTransform> PatientProvider for SampledPatientProvider<T> {
    fn provide(&mut self, n: usize) -> Vec<Patient> {
        (0..n).map(|_| self.next_patient()).collect()
    }
}
