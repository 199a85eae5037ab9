use triage_engine::Disease;

/// A map of the probability simplex onto itself, used to distort a
/// classifier's beliefs.
///
/// The fake classifier reports its sampled confidences unchanged but draws
/// the ground-truth label from the *transformed* vector. With the identity
/// transform the classifier is perfectly calibrated; any other transform
/// makes it miscalibrated in a controlled way.
///
/// Implementations must keep the vector on the simplex: entries non-negative
/// and summing to one.
pub trait SimplexTransform {
    /// Transforms `probabilities` in place.
    fn transform(&self, probabilities: &mut [f64; Disease::LEN]);
}

/// Leaves beliefs untouched: a perfectly calibrated classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl SimplexTransform for Identity {
    fn transform(&self, _probabilities: &mut [f64; Disease::LEN]) {}
}

/// Raises every entry to a fixed exponent and renormalizes.
///
/// An exponent above one moves mass toward the largest entry, simulating a
/// classifier that is *under*confident (the truth is sharper than it
/// believes); an exponent below one flattens the vector, simulating an
/// *over*confident classifier.
#[derive(Debug, Clone, Copy)]
pub struct Sharpen {
    exponent: f64,
}

impl Sharpen {
    /// Creates a sharpening transform.
    ///
    /// # Panics
    ///
    /// Panics if `exponent` is not positive and finite.
    #[must_use]
    pub fn new(exponent: f64) -> Self {
        assert!(
            exponent > 0.0 && exponent.is_finite(),
            "sharpen exponent must be positive and finite"
        );
        Self { exponent }
    }

    /// Returns the transform's exponent.
    #[must_use]
    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl SimplexTransform for Sharpen {
    fn transform(&self, probabilities: &mut [f64; Disease::LEN]) {
        for p in probabilities.iter_mut() {
            *p = p.powf(self.exponent);
        }
        let sum: f64 = probabilities.iter().sum();
        if sum > 0.0 {
            for p in probabilities.iter_mut() {
                *p /= sum;
            }
        } else {
            // All mass vanished (every entry was zero); fall back to uniform.
            *probabilities = [1.0 / Disease::LEN as f64; Disease::LEN];
        }
    }
}
