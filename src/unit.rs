//! Time units and the unit-resolution policy.
//!
//! Holds the fixed table of reporting units, the ordered auto-scale
//! thresholds, and the lookup that turns a requested unit spec into a
//! scale factor without ever failing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reporting unit for an elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Multiplier converting a duration in seconds to this unit.
    pub fn scale(self) -> f64 {
        match self {
            Self::Nanoseconds => 1e9,
            Self::Microseconds => 1e6,
            Self::Milliseconds => 1e3,
            Self::Seconds => 1.0,
            Self::Minutes => 1.0 / 60.0,
            Self::Hours => 1.0 / 3.6e3,
            Self::Days => 1.0 / 86.5e3,
        }
    }

    /// Canonical label, as printed after a measurement.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "µs",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "hr",
            Self::Days => "dy",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the canonical unit labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized time unit: '{0}'")]
pub struct ParseTimeUnitError(pub String);

impl FromStr for TimeUnit {
    type Err = ParseTimeUnitError;

    /// Parse a canonical unit label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ns" => Ok(Self::Nanoseconds),
            "µs" => Ok(Self::Microseconds),
            "ms" => Ok(Self::Milliseconds),
            "s" => Ok(Self::Seconds),
            "min" => Ok(Self::Minutes),
            "hr" => Ok(Self::Hours),
            "dy" => Ok(Self::Days),
            _ => Err(ParseTimeUnitError(s.to_string())),
        }
    }
}

/// Ordered auto-scale thresholds: the first entry whose threshold
/// strictly exceeds the elapsed seconds wins. The infinite terminal
/// entry guarantees a match for every finite elapsed value.
const AUTO_SCALE_THRESHOLDS: [(f64, TimeUnit); 7] = [
    (1100e-9, TimeUnit::Nanoseconds),
    (1100e-6, TimeUnit::Microseconds),
    (1100e-3, TimeUnit::Milliseconds),
    (120.0, TimeUnit::Seconds), // 2 min
    (7.2e3, TimeUnit::Minutes), // 2 hr
    (345.6e3, TimeUnit::Hours), // 4 dy
    (f64::INFINITY, TimeUnit::Days),
];

/// Select the reporting unit for an elapsed time in seconds.
fn auto_scale(elapsed_secs: f64) -> Option<TimeUnit> {
    AUTO_SCALE_THRESHOLDS
        .iter()
        .find(|&&(threshold, _)| elapsed_secs < threshold)
        .map(|&(_, unit)| unit)
}

/// Outcome of resolving a requested unit spec against an elapsed time.
///
/// Diagnostic lines are destined for the output stream, in order,
/// ahead of the measurement line; an empty list means the spec was
/// honored silently.
pub(crate) struct Resolution {
    pub scale: f64,
    pub unit: TimeUnit,
    pub diagnostics: Vec<String>,
}

impl Resolution {
    fn silent(unit: TimeUnit) -> Self {
        Self {
            scale: unit.scale(),
            unit,
            diagnostics: Vec::new(),
        }
    }
}

/// Resolve a unit spec to a scale factor and canonical unit.
///
/// An explicit recognized label is honored as-is. Anything else falls
/// back to auto-scaling over `elapsed_secs`; an unrecognized label
/// additionally produces a diagnostic echoing the spec verbatim. This
/// never fails.
pub(crate) fn resolve(spec: &str, elapsed_secs: f64) -> Resolution {
    if let Ok(unit) = spec.parse::<TimeUnit>() {
        return Resolution::silent(unit);
    }

    let mut diagnostics = Vec::new();
    if spec.to_lowercase() != "auto" {
        tracing::warn!(unit = spec, "invalid unit spec, falling back to auto-scaling");
        diagnostics.push(format!("Invalid unit spec: '{spec}'. Defaulting to 'auto'."));
    }

    match auto_scale(elapsed_secs) {
        Some(unit) => Resolution {
            scale: unit.scale(),
            unit,
            diagnostics,
        },
        None => {
            diagnostics.push("Auto time scaling failed. Defaulting to 's'.".to_string());
            Resolution {
                scale: 1.0,
                unit: TimeUnit::Seconds,
                diagnostics,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_labels() {
        for unit in [
            TimeUnit::Nanoseconds,
            TimeUnit::Microseconds,
            TimeUnit::Milliseconds,
            TimeUnit::Seconds,
            TimeUnit::Minutes,
            TimeUnit::Hours,
            TimeUnit::Days,
        ] {
            assert_eq!(unit.label().parse::<TimeUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("MS".parse::<TimeUnit>().unwrap(), TimeUnit::Milliseconds);
        assert_eq!("Min".parse::<TimeUnit>().unwrap(), TimeUnit::Minutes);
        assert_eq!("HR".parse::<TimeUnit>().unwrap(), TimeUnit::Hours);
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let err = "fortnight".parse::<TimeUnit>().unwrap_err();
        assert_eq!(err, ParseTimeUnitError("fortnight".to_string()));
    }

    #[test]
    fn test_scale_factors() {
        assert_eq!(TimeUnit::Nanoseconds.scale(), 1e9);
        assert_eq!(TimeUnit::Microseconds.scale(), 1e6);
        assert_eq!(TimeUnit::Milliseconds.scale(), 1e3);
        assert_eq!(TimeUnit::Seconds.scale(), 1.0);
        assert_eq!(TimeUnit::Minutes.scale(), 1.0 / 60.0);
        assert_eq!(TimeUnit::Hours.scale(), 1.0 / 3.6e3);
        assert_eq!(TimeUnit::Days.scale(), 1.0 / 86.5e3);
    }

    #[test]
    fn test_auto_scale_selection() {
        assert_eq!(auto_scale(0.0), Some(TimeUnit::Nanoseconds));
        assert_eq!(auto_scale(500e-9), Some(TimeUnit::Nanoseconds));
        assert_eq!(auto_scale(500e-6), Some(TimeUnit::Microseconds));
        assert_eq!(auto_scale(0.15), Some(TimeUnit::Milliseconds));
        assert_eq!(auto_scale(5.0), Some(TimeUnit::Seconds));
        assert_eq!(auto_scale(5000.0), Some(TimeUnit::Minutes));
        assert_eq!(auto_scale(100_000.0), Some(TimeUnit::Hours));
        assert_eq!(auto_scale(1e9), Some(TimeUnit::Days));
    }

    #[test]
    fn test_auto_scale_thresholds_are_exclusive() {
        // Exactly at a threshold the next unit up wins.
        assert_eq!(auto_scale(1100e-9), Some(TimeUnit::Microseconds));
        assert_eq!(auto_scale(1100e-6), Some(TimeUnit::Milliseconds));
        assert_eq!(auto_scale(120.0), Some(TimeUnit::Minutes));
    }

    #[test]
    fn test_resolve_explicit_unit() {
        let res = resolve("ms", 5000.0);
        assert_eq!(res.unit, TimeUnit::Milliseconds);
        assert_eq!(res.scale, 1e3);
        assert!(res.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_explicit_unit_any_case() {
        let res = resolve("DY", 0.1);
        assert_eq!(res.unit, TimeUnit::Days);
        assert!(res.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_auto() {
        let res = resolve("auto", 5000.0);
        assert_eq!(res.unit, TimeUnit::Minutes);
        assert!(res.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_invalid_unit_degrades_to_auto() {
        let res = resolve("banana", 0.15);
        assert_eq!(res.unit, TimeUnit::Milliseconds);
        assert_eq!(
            res.diagnostics,
            vec!["Invalid unit spec: 'banana'. Defaulting to 'auto'.".to_string()]
        );
    }

    #[test]
    fn test_resolve_non_finite_elapsed_falls_back_to_seconds() {
        let res = resolve("auto", f64::INFINITY);
        assert_eq!(res.unit, TimeUnit::Seconds);
        assert_eq!(res.scale, 1.0);
        assert_eq!(
            res.diagnostics,
            vec!["Auto time scaling failed. Defaulting to 's'.".to_string()]
        );
    }
}
