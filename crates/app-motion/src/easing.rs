//! Easing curves
//!
//! Curves are written the way the design tokens spell them
//! (`cubic-bezier(0.17, 0.73, 0.14, 1)`, `linear`) and evaluated numerically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error parsing an easing string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EasingParseError {
    /// Not `linear` or `cubic-bezier(...)`
    #[error("Unknown easing: {0}")]
    Unknown(String),

    /// Wrong number of control values or a non-numeric value
    #[error("Invalid cubic-bezier arguments: {0}")]
    InvalidArguments(String),

    /// X control points must lie in `[0, 1]`
    #[error("cubic-bezier x values must be within [0, 1]: {0}")]
    OutOfRange(String),
}

/// Timing curve mapping linear time to eased progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    /// Linear
    Linear,
    /// CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Linear
    pub const LINEAR: Easing = Easing::Linear;
    /// Default easing curve
    pub const DEFAULT: Easing = Easing::CubicBezier(0.17, 0.73, 0.14, 1.0);
    /// Ease in
    pub const EASE_IN: Easing = Easing::CubicBezier(0.4, 0.0, 1.0, 1.0);
    /// Ease out
    pub const EASE_OUT: Easing = Easing::CubicBezier(0.0, 0.0, 0.2, 1.0);
    /// Ease in out
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier(0.4, 0.0, 0.2, 1.0);
    /// Slight overshoot, used for spring-like settles
    pub const BOUNCE: Easing = Easing::CubicBezier(0.34, 1.56, 0.64, 1.0);

    /// Eased progress for linear time `t` (clamped to `[0, 1]`)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::CubicBezier(x1, y1, x2, y2) => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let u = solve_for_x(t, x1, x2);
                bezier(u, y1, y2)
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::DEFAULT
    }
}

/// One coordinate of a bezier with endpoints 0 and 1
fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Curve parameter whose x coordinate is `x`
fn solve_for_x(x: f32, x1: f32, x2: f32) -> f32 {
    let mut t = x;
    for _ in 0..8 {
        let error = bezier(t, x1, x2) - x;
        if error.abs() < 1e-6 {
            return t;
        }
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= error / slope;
    }

    // Newton stalled; x(t) is monotonic for x1, x2 in [0, 1] so bisect
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..32 {
        let value = bezier(t, x1, x2);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
        }
    }
}

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "linear" {
            return Ok(Easing::Linear);
        }

        let args = s
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| EasingParseError::Unknown(s.to_string()))?;

        let values = args
            .split(',')
            .map(|v| v.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| EasingParseError::InvalidArguments(s.to_string()))?;

        let [x1, y1, x2, y2] = values[..] else {
            return Err(EasingParseError::InvalidArguments(s.to_string()));
        };

        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(EasingParseError::OutOfRange(s.to_string()));
        }

        Ok(Easing::CubicBezier(x1, y1, x2, y2))
    }
}

impl TryFrom<String> for Easing {
    type Error = EasingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_linear() {
        assert_eq!(Easing::LINEAR.apply(0.25), 0.25);
        assert_eq!(Easing::LINEAR.apply(-1.0), 0.0);
        assert_eq!(Easing::LINEAR.apply(2.0), 1.0);
    }

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in [Easing::DEFAULT, Easing::EASE_IN, Easing::EASE_OUT, Easing::BOUNCE] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let easing = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(close(easing.apply(t), t), "t = {}", t);
        }
    }

    #[test]
    fn test_ease_out_leads_ease_in() {
        assert!(Easing::EASE_OUT.apply(0.3) > 0.3);
        assert!(Easing::EASE_IN.apply(0.3) < 0.3);
    }

    #[test]
    fn test_monotonic_default_curve() {
        let mut last = 0.0;
        for i in 1..=100 {
            let value = Easing::DEFAULT.apply(i as f32 / 100.0);
            assert!(value >= last - 1e-4);
            last = value;
        }
    }

    #[test]
    fn test_bounce_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::BOUNCE.apply(i as f32 / 100.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_parse_token_strings() {
        assert_eq!("linear".parse::<Easing>(), Ok(Easing::Linear));
        assert_eq!(
            "cubic-bezier(0.17, 0.73, 0.14, 1)".parse::<Easing>(),
            Ok(Easing::DEFAULT)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "ease".parse::<Easing>(),
            Err(EasingParseError::Unknown(_))
        ));
        assert!(matches!(
            "cubic-bezier(0.1, 0.2, 0.3)".parse::<Easing>(),
            Err(EasingParseError::InvalidArguments(_))
        ));
        assert!(matches!(
            "cubic-bezier(1.5, 0, 0, 1)".parse::<Easing>(),
            Err(EasingParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_serde_uses_css_form() {
        let json = serde_json::to_string(&Easing::EASE_OUT).unwrap();
        assert_eq!(json, "\"cubic-bezier(0, 0, 0.2, 1)\"");
        let parsed: Easing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Easing::EASE_OUT);
    }
}
