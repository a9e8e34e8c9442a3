//! Bookmaker quotes on totals lines

use crate::ScannerError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Side of a two-way totals market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Total above the line
    Over,
    /// Total below the line
    Under,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Over => write!(f, "Over"),
            Side::Under => write!(f, "Under"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = ScannerError;

    /// Accepts the feed labels `Over` and `Under` exactly
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Over" => Ok(Side::Over),
            "Under" => Ok(Side::Under),
            _ => Err(ScannerError::DataParsing(format!("Unknown totals side: {}", s))),
        }
    }
}

/// A totals line held as fixed-point hundredths.
///
/// Feed values are rounded to two decimals once, on entry, so `2.499999` and
/// `2.5` share the same line and lines compare without float equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Line(i64);

impl Line {
    /// Round a raw feed point to a line; `None` for non-finite or out-of-range values
    pub fn from_point(point: f64) -> Option<Self> {
        if !point.is_finite() {
            return None;
        }
        let hundredths = (point * 100.0).round();
        if hundredths.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Line(hundredths as i64))
    }

    /// Build a line directly from hundredths (`250` is 2.5)
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Line(hundredths)
    }

    /// Line in hundredths
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Line as a decimal value
    pub fn value(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.sign_plus() && self.0 >= 0 {
            write!(f, "+")?;
        }
        if self.0 % 10 == 0 {
            write!(f, "{:.1}", self.value())
        } else {
            write!(f, "{:.2}", self.value())
        }
    }
}

impl Serialize for Line {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// Decimal odds after the bookmaker commission is taken out
pub fn effective_odds(raw_odds: f64, commission_pct: f64) -> f64 {
    if commission_pct <= 0.0 {
        raw_odds
    } else {
        raw_odds * (1.0 - commission_pct / 100.0)
    }
}

/// One bookmaker's price for one side of one totals line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Bookmaker display name
    pub bookmaker: String,
    /// Over or Under
    pub side: Side,
    /// Raw line value as published by the feed
    pub point: f64,
    /// Raw decimal odds
    pub price: f64,
}

impl Quote {
    /// Create a new quote
    pub fn new(bookmaker: impl Into<String>, side: Side, point: f64, price: f64) -> Self {
        Self {
            bookmaker: bookmaker.into(),
            side,
            point,
            price,
        }
    }

    /// Grouping line of this quote
    pub fn line(&self) -> Option<Line> {
        Line::from_point(self.point)
    }

    /// Whether the quote carries a usable price and line
    pub fn is_usable(&self) -> bool {
        self.price.is_finite() && self.price > 0.0 && self.line().is_some()
    }

    /// Apply the commission, yielding the grouping line and the effective quote
    pub fn effective(&self, commission_pct: f64) -> Option<(Line, EffectiveQuote)> {
        if !self.is_usable() {
            return None;
        }
        let line = self.line()?;
        Some((
            line,
            EffectiveQuote {
                bookmaker: self.bookmaker.clone(),
                raw_odds: self.price,
                odds: effective_odds(self.price, commission_pct),
            },
        ))
    }
}

/// A quote with the commission adjustment applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveQuote {
    /// Bookmaker display name
    pub bookmaker: String,
    /// Price as quoted
    pub raw_odds: f64,
    /// Price after commission
    pub odds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_str() {
        assert_eq!("Over".parse::<Side>().unwrap(), Side::Over);
        assert_eq!("Under".parse::<Side>().unwrap(), Side::Under);
        assert!("Draw".parse::<Side>().is_err());
        assert!("over".parse::<Side>().is_err());
        assert!(" Under ".parse::<Side>().is_err());
    }

    #[test]
    fn test_line_rounding_coalesces_feed_noise() {
        assert_eq!(Line::from_point(2.499999), Line::from_point(2.5));
        assert_eq!(Line::from_point(2.5).unwrap().hundredths(), 250);
        assert_ne!(Line::from_point(2.25), Line::from_point(2.5));
        assert!(Line::from_point(f64::NAN).is_none());
        assert!(Line::from_point(f64::INFINITY).is_none());
    }

    #[test]
    fn test_line_display() {
        assert_eq!(Line::from_hundredths(250).to_string(), "2.5");
        assert_eq!(Line::from_hundredths(225).to_string(), "2.25");
        assert_eq!(format!("{:+}", Line::from_hundredths(250)), "+2.5");
        assert_eq!(format!("{:+}", Line::from_hundredths(-50)), "-0.5");
    }

    #[test]
    fn test_effective_odds_without_commission() {
        assert_eq!(effective_odds(2.1, 0.0), 2.1);
        assert_eq!(effective_odds(2.1, -3.0), 2.1);
    }

    #[test]
    fn test_effective_odds_commission_is_monotonic() {
        let raw = 2.1;
        let low = effective_odds(raw, 1.0);
        let high = effective_odds(raw, 5.0);
        assert!(low < raw);
        assert!(high < low);
        assert!((effective_odds(2.0, 5.0) - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_quote_usability() {
        assert!(Quote::new("BookA", Side::Over, 2.5, 2.1).is_usable());
        assert!(!Quote::new("BookA", Side::Over, 2.5, 0.0).is_usable());
        assert!(!Quote::new("BookA", Side::Over, 2.5, -1.5).is_usable());
        assert!(!Quote::new("BookA", Side::Over, f64::NAN, 2.1).is_usable());
        assert!(Quote::new("BookA", Side::Over, 2.5, 0.0).effective(0.0).is_none());
    }
}
