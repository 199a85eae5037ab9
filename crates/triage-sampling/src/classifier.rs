use rand::{
    Rng as _, SeedableRng as _,
    distr::{Distribution, weighted::WeightedIndex},
};
use rand_distr::Dirichlet;
use rand_pcg::Pcg32;
use triage_engine::Disease;

use crate::{
    InvalidAlphaError,
    seed::ClassifierSeed,
    transform::{Identity, SimplexTransform},
};

/// A stochastic stand-in for a disease classifier.
///
/// Each sample draws a confidence vector over the disease set from a
/// Dirichlet(α) distribution, derives the ground-truth probabilities by
/// applying the classifier's [`SimplexTransform`], and samples the true
/// disease from those. The reported confidences are the *untransformed*
/// vector, so the transform alone controls the classifier's miscalibration.
///
/// The classifier owns its RNG; construct it [`with_seed`](Self::with_seed)
/// for reproducible streams.
#[derive(Debug, Clone)]
pub struct DirichletClassifier<T = Identity> {
    rng: Pcg32,
    dirichlet: Dirichlet<f64, { Disease::LEN }>,
    transform: T,
}

impl DirichletClassifier<Identity> {
    /// A calibrated classifier with uniform concentration (α = 1, ..., 1)
    /// and a random seed.
    #[must_use]
    pub fn uniform() -> Self {
        Self::with_seed(rand::rng().random(), [1.0; Disease::LEN], Identity)
            .expect("uniform concentration parameters are valid")
    }
}

impl<T: SimplexTransform> DirichletClassifier<T> {
    /// Creates a classifier with a random seed.
    ///
    /// # Errors
    ///
    /// [`InvalidAlphaError`] if any entry of `alpha` is not positive and
    /// finite.
    pub fn new(alpha: [f64; Disease::LEN], transform: T) -> Result<Self, InvalidAlphaError> {
        Self::with_seed(rand::rng().random(), alpha, transform)
    }

    /// Like [`Self::new`], but with a specific seed for deterministic
    /// sampling.
    ///
    /// # Errors
    ///
    /// [`InvalidAlphaError`] if any entry of `alpha` is not positive and
    /// finite.
    pub fn with_seed(
        seed: ClassifierSeed,
        alpha: [f64; Disease::LEN],
        transform: T,
    ) -> Result<Self, InvalidAlphaError> {
        let dirichlet = Dirichlet::new(alpha).map_err(|_| InvalidAlphaError { alpha })?;
        Ok(Self {
            rng: Pcg32::from_seed(seed.to_bytes()),
            dirichlet,
            transform,
        })
    }

    /// Draws one `(true disease, confidence vector)` pair.
    ///
    /// The confidence vector is indexed by [`Disease::ALL`] order and sums
    /// to one.
    pub fn sample(&mut self) -> (Disease, [f64; Disease::LEN]) {
        let confidences: [f64; Disease::LEN] = self.dirichlet.sample(&mut self.rng);
        let mut truth = confidences;
        self.transform.transform(&mut truth);
        let label = WeightedIndex::new(truth)
            .expect("transformed probabilities stay on the simplex")
            .sample(&mut self.rng);
        (Disease::ALL[label], confidences)
    }
}
