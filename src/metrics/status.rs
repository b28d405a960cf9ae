//! Score to category classification.
//!
//! Each classifier is a pure function over ordered range checks.

use serde::Serialize;
use std::fmt;

/// Where a module sits on the stable/unstable axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityBand {
    Stable,
    Balanced,
    Unstable,
}

impl StabilityBand {
    pub fn classify(instability: f64) -> Self {
        if instability < 0.3 {
            Self::Stable
        } else if instability < 0.7 {
            Self::Balanced
        } else {
            Self::Unstable
        }
    }
}

/// Quality of a community partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModularityRating {
    Weak,
    Moderate,
    Strong,
}

impl ModularityRating {
    pub fn classify(modularity: f64) -> Self {
        if modularity < 0.3 {
            Self::Weak
        } else if modularity < 0.5 {
            Self::Moderate
        } else {
            Self::Strong
        }
    }
}

/// How many direct connections a module has in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CouplingLoad {
    Low,
    Moderate,
    High,
}

impl CouplingLoad {
    pub fn classify(total_coupling: usize) -> Self {
        match total_coupling {
            0..=5 => Self::Low,
            6..=15 => Self::Moderate,
            _ => Self::High,
        }
    }
}

impl fmt::Display for StabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stable => "stable",
            Self::Balanced => "balanced",
            Self::Unstable => "unstable",
        };
        f.write_str(label)
    }
}

impl fmt::Display for ModularityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        };
        f.write_str(label)
    }
}

impl fmt::Display for CouplingLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stability_band_boundaries() {
        assert_eq!(StabilityBand::classify(0.0), StabilityBand::Stable);
        assert_eq!(StabilityBand::classify(0.29), StabilityBand::Stable);
        assert_eq!(StabilityBand::classify(0.3), StabilityBand::Balanced);
        assert_eq!(StabilityBand::classify(0.69), StabilityBand::Balanced);
        assert_eq!(StabilityBand::classify(0.7), StabilityBand::Unstable);
        assert_eq!(StabilityBand::classify(1.0), StabilityBand::Unstable);
    }

    #[test]
    fn test_modularity_rating_boundaries() {
        assert_eq!(ModularityRating::classify(-0.1), ModularityRating::Weak);
        assert_eq!(ModularityRating::classify(0.3), ModularityRating::Moderate);
        assert_eq!(ModularityRating::classify(0.5), ModularityRating::Strong);
    }

    #[test]
    fn test_coupling_load_boundaries() {
        assert_eq!(CouplingLoad::classify(5), CouplingLoad::Low);
        assert_eq!(CouplingLoad::classify(6), CouplingLoad::Moderate);
        assert_eq!(CouplingLoad::classify(16), CouplingLoad::High);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(StabilityBand::Unstable.to_string(), "unstable");
        assert_eq!(ModularityRating::Strong.to_string(), "strong");
        assert_eq!(CouplingLoad::High.to_string(), "high");
    }
}
