use std::fmt::Write as _;

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic patient sampling.
///
/// A 128-bit (16-byte) seed used to initialize the random number generators
/// of the classifier and the provider. The same seed produces the same
/// sample stream, enabling reproducible experiments; per the explicit-RNG
/// design rule, no sampler in this crate ever touches process-wide random
/// state except to draw an initial seed.
///
/// Serializes as a 32-character hex string.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use triage_sampling::{ClassifierSeed, DirichletClassifier, Identity};
///
/// let seed: ClassifierSeed = rand::rng().random();
///
/// let mut a = DirichletClassifier::with_seed(seed, [1.0; 4], Identity).unwrap();
/// let mut b = DirichletClassifier::with_seed(seed, [1.0; 4], Identity).unwrap();
/// assert_eq!(a.sample(), b.sample());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierSeed([u8; 16]);

impl ClassifierSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the seed's raw bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<ClassifierSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ClassifierSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ClassifierSeed(seed)
    }
}

impl Serialize for ClassifierSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for ClassifierSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_random_seed() {
        let seed: ClassifierSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: ClassifierSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_format_is_32_char_hex_string() {
        let seed: ClassifierSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let hex_str = serialized.trim_matches('"');
        assert_eq!(hex_str.len(), 32);
        assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_known_value_serialization() {
        let seed = ClassifierSeed::from_bytes(1u128.to_be_bytes());
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"00000000000000000000000000000001\"");
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let result: Result<ClassifierSeed, _> = serde_json::from_str("\"abc\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_hex_is_rejected() {
        let result: Result<ClassifierSeed, _> =
            serde_json::from_str("\"zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz\"");
        assert!(result.is_err());
    }
}
