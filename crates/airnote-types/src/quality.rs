//! CO2 quality bands and the dashboard insight text.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quality band for a mean CO2 concentration.
///
/// Bands are evaluated over the *mean* CO2 of all recorded measurements,
/// not a single reading.
///
/// # Ordering
///
/// Bands are ordered by severity: `Optimal < Acceptable < Elevated < Severe`,
/// which allows threshold comparisons like `if band >= Co2Band::Elevated`.
///
/// ```
/// use airnote_types::Co2Band;
///
/// assert_eq!(Co2Band::from_mean_ppm(800.0), Co2Band::Acceptable);
/// assert!(Co2Band::from_mean_ppm(1600.0) > Co2Band::Elevated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum Co2Band {
    /// Mean CO2 at or below 600 ppm.
    Optimal,
    /// Mean CO2 above 600 ppm.
    Acceptable,
    /// Mean CO2 above 1000 ppm.
    Elevated,
    /// Mean CO2 above 1500 ppm.
    Severe,
}

impl Co2Band {
    /// Categorise a mean CO2 concentration in ppm.
    #[must_use]
    pub fn from_mean_ppm(mean_ppm: f64) -> Self {
        if mean_ppm > 1500.0 {
            Co2Band::Severe
        } else if mean_ppm > 1000.0 {
            Co2Band::Elevated
        } else if mean_ppm > 600.0 {
            Co2Band::Acceptable
        } else {
            Co2Band::Optimal
        }
    }

    /// Human-readable insight text for the dashboard.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Co2Band::Severe => {
                "Warning: average CO2 is very high, indicating inadequate ventilation. \
                 Opening windows is recommended."
            }
            Co2Band::Elevated => {
                "Alert: average CO2 is above the ideal range for indoor spaces. \
                 Consider improving air circulation."
            }
            Co2Band::Acceptable => {
                "CO2 levels are acceptable but could be improved with periodic ventilation."
            }
            Co2Band::Optimal => "Air quality with respect to CO2 is at optimal levels.",
        }
    }
}

impl fmt::Display for Co2Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Co2Band::Optimal => write!(f, "Optimal"),
            Co2Band::Acceptable => write!(f, "Acceptable"),
            Co2Band::Elevated => write!(f, "Elevated"),
            Co2Band::Severe => write!(f, "Severe"),
        }
    }
}
