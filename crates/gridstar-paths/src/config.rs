//! Search configuration: movement costs, diagonal movement and heuristic.

use std::fmt;

use crate::heuristic::Heuristic;

/// Parameters of a search, fixed for the lifetime of a [`SearchEngine`].
///
/// The step costs are not required to be consistent with each other or with
/// the heuristic; an inadmissible combination simply loses the optimality
/// guarantee.
///
/// [`SearchEngine`]: crate::SearchEngine
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Also relax the four diagonal neighbours of every settled cell.
    pub allow_diagonal: bool,
    /// Cost of a step left, right, up or down.
    pub orthogonal_cost: f64,
    /// Cost of a diagonal step.
    pub diagonal_cost: f64,
    /// Multiplier applied to H when forming F. Values above 1 favour speed
    /// over optimality.
    pub heuristic_weight: f64,
    pub heuristic: Heuristic,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            allow_diagonal: false,
            orthogonal_cost: 1.0,
            diagonal_cost: std::f64::consts::SQRT_2,
            heuristic_weight: 1.0,
            heuristic: Heuristic::Euclidean,
        }
    }
}

impl SearchConfig {
    /// Enable or disable diagonal movement (builder).
    #[inline]
    pub const fn with_diagonal(mut self, allow: bool) -> Self {
        self.allow_diagonal = allow;
        self
    }

    /// Set the orthogonal and diagonal step costs (builder).
    #[inline]
    pub const fn with_costs(mut self, orthogonal: f64, diagonal: f64) -> Self {
        self.orthogonal_cost = orthogonal;
        self.diagonal_cost = diagonal;
        self
    }

    /// Set the heuristic weight (builder).
    #[inline]
    pub const fn with_heuristic_weight(mut self, weight: f64) -> Self {
        self.heuristic_weight = weight;
        self
    }

    /// Set the heuristic (builder).
    #[inline]
    pub const fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Check that every cost and the weight are finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, cost) in [
            ("orthogonal_cost", self.orthogonal_cost),
            ("diagonal_cost", self.diagonal_cost),
        ] {
            if !is_positive(cost) {
                return Err(ConfigError::NonPositiveCost { name, value: cost });
            }
        }
        if !is_positive(self.heuristic_weight) {
            return Err(ConfigError::NonPositiveWeight(self.heuristic_weight));
        }
        Ok(())
    }
}

#[inline]
fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Rejected [`SearchConfig`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A step cost is zero, negative, infinite or NaN.
    NonPositiveCost { name: &'static str, value: f64 },
    /// The heuristic weight is zero, negative, infinite or NaN.
    NonPositiveWeight(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveCost { name, value } => {
                write!(f, "search config: {name} must be finite and > 0, got {value}")
            }
            Self::NonPositiveWeight(w) => {
                write!(f, "search config: heuristic_weight must be finite and > 0, got {w}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SearchConfig::default();
        assert!(!c.allow_diagonal);
        assert_eq!(c.orthogonal_cost, 1.0);
        assert!((c.diagonal_cost - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(c.heuristic_weight, 1.0);
        assert_eq!(c.heuristic, Heuristic::Euclidean);
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn builders() {
        let c = SearchConfig::default()
            .with_diagonal(true)
            .with_costs(10.0, 14.0)
            .with_heuristic_weight(2.5)
            .with_heuristic(Heuristic::Chebyshev);
        assert!(c.allow_diagonal);
        assert_eq!(c.orthogonal_cost, 10.0);
        assert_eq!(c.diagonal_cost, 14.0);
        assert_eq!(c.heuristic_weight, 2.5);
        assert_eq!(c.heuristic, Heuristic::Chebyshev);
    }

    #[test]
    fn rejects_bad_costs() {
        let c = SearchConfig::default().with_costs(0.0, 1.0);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonPositiveCost { name: "orthogonal_cost", .. })
        ));
        let c = SearchConfig::default().with_costs(1.0, f64::NAN);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonPositiveCost { name: "diagonal_cost", .. })
        ));
    }

    #[test]
    fn rejects_bad_weight() {
        let c = SearchConfig::default().with_heuristic_weight(-1.0);
        assert_eq!(c.validate(), Err(ConfigError::NonPositiveWeight(-1.0)));
        let c = SearchConfig::default().with_heuristic_weight(f64::INFINITY);
        assert!(c.validate().is_err());
    }

    #[test]
    fn error_display() {
        let err = ConfigError::NonPositiveWeight(0.0);
        assert_eq!(
            err.to_string(),
            "search config: heuristic_weight must be finite and > 0, got 0"
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_document_uses_defaults() {
        let c: SearchConfig =
            serde_json::from_str(r#"{"allow_diagonal":true,"heuristic":"Manhattan"}"#).unwrap();
        assert!(c.allow_diagonal);
        assert_eq!(c.heuristic, Heuristic::Manhattan);
        assert_eq!(c.orthogonal_cost, 1.0);
        assert_eq!(c.heuristic_weight, 1.0);
    }

    #[test]
    fn round_trip() {
        let c = SearchConfig::default()
            .with_diagonal(true)
            .with_heuristic_weight(1.5);
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
