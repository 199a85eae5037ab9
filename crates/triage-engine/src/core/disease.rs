use serde::{Deserialize, Serialize};

/// A diagnosable condition, including the no-disease tag [`Disease::Healthy`].
///
/// The disease set is closed: costs, benefits, and beliefs are all keyed by
/// this enum, so unknown disease labels cannot enter the system. The derived
/// `Ord` follows declaration order and is the canonical iteration order used
/// for deterministic tie-breaking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Disease {
    /// No disease. Its "treatment" is a no-op and costs nothing.
    Healthy = 0,
    /// Common cold.
    Cold = 1,
    /// Flu.
    Flu = 2,
    /// Lung cancer.
    LungCancer = 3,
}

impl Disease {
    /// Number of disease tags.
    pub const LEN: usize = 4;

    /// All diseases in canonical order.
    pub const ALL: [Disease; Disease::LEN] = [
        Disease::Healthy,
        Disease::Cold,
        Disease::Flu,
        Disease::LungCancer,
    ];

    /// Cost of treating this disease.
    ///
    /// Costs are integral by table construction, which keeps the
    /// budget-constrained solver's DP table finite without a scaling pass.
    #[must_use]
    pub const fn treatment_cost(self) -> u64 {
        match self {
            Disease::Healthy => 0,
            Disease::Cold => 2,
            Disease::Flu => 2,
            Disease::LungCancer => 3,
        }
    }

    /// Returns the snake_case label of this disease.
    ///
    /// # Examples
    ///
    /// ```
    /// use triage_engine::Disease;
    ///
    /// assert_eq!(Disease::Healthy.as_str(), "healthy");
    /// assert_eq!(Disease::LungCancer.as_str(), "lung_cancer");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Disease::Healthy => "healthy",
            Disease::Cold => "cold",
            Disease::Flu => "flu",
            Disease::LungCancer => "lung_cancer",
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
