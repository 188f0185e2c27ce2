use crate::error::RubricError;

/// A numeric range written as a short expression.
///
/// Accepted forms: `<N`, `<=N`, `>N`, `>=N`, `N-M` (inclusive) and a bare `N`.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self, RubricError> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(parse_bound(s, val)?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(parse_bound(s, val)?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(parse_bound(s, val)?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(parse_bound(s, val)?))
        } else if s.contains('-') && !s.starts_with('-') {
            // Range format: "111-140"
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() != 2 {
                return Err(invalid(s, "expected exactly one '-' between bounds"));
            }
            let low = parse_bound(s, parts[0])?;
            let high = parse_bound(s, parts[1])?;
            if low > high {
                return Err(invalid(s, "lower bound exceeds upper bound"));
            }
            Ok(RangeOp::Between(low, high))
        } else {
            Ok(RangeOp::Equal(parse_bound(s, s)?))
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

fn parse_bound(range: &str, val: &str) -> Result<f64, RubricError> {
    let parsed: f64 = val
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(range, &e.to_string()))?;
    if !parsed.is_finite() {
        return Err(invalid(range, "bound must be finite"));
    }
    Ok(parsed)
}

fn invalid(range: &str, reason: &str) -> RubricError {
    RubricError::InvalidRange {
        range: range.to_string(),
        reason: reason.to_string(),
    }
}

/// A parsed range paired with whatever the band awards.
#[derive(Debug, Clone)]
pub struct Band<T> {
    /// Range as written in the rubric, kept for feedback text.
    pub label: String,
    pub range: RangeOp,
    pub value: T,
}

impl<T> Band<T> {
    pub fn parse(range: &str, value: T) -> Result<Self, RubricError> {
        Ok(Band {
            label: range.trim().to_string(),
            range: RangeOp::parse(range)?,
            value,
        })
    }
}

/// First band whose range contains `value`. Bands are checked in order.
pub fn first_match<T>(bands: &[Band<T>], value: f64) -> Option<&Band<T>> {
    bands.iter().find(|band| band.range.matches(value))
}
