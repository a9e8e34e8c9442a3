//! Best quotes per totals line

use super::{EffectiveQuote, Line};
use serde::Serialize;
use std::collections::BTreeMap;

/// Winning quote on each side of one line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineQuotes {
    /// Best Over price
    pub over: EffectiveQuote,
    /// Best Under price
    pub under: EffectiveQuote,
}

/// Lines of one event that have a winning quote on both sides.
///
/// Iteration is in ascending line order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineBook {
    lines: BTreeMap<Line, LineQuotes>,
}

impl LineBook {
    /// Quotes for a line
    pub fn get(&self, line: Line) -> Option<&LineQuotes> {
        self.lines.get(&line)
    }

    /// Lines with their quotes, ascending
    pub fn iter(&self) -> impl Iterator<Item = (Line, &LineQuotes)> + '_ {
        self.lines.iter().map(|(line, quotes)| (*line, quotes))
    }

    /// Qualifying lines, ascending
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.lines.keys().copied()
    }

    /// Number of qualifying lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no line qualifies
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromIterator<(Line, LineQuotes)> for LineBook {
    fn from_iter<I: IntoIterator<Item = (Line, LineQuotes)>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
