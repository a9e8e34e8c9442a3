//! Best-price selection per totals line

use crate::data::{EffectiveQuote, Line, LineBook, LineQuotes, Quote, Side};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct SideSlots {
    over: Option<EffectiveQuote>,
    under: Option<EffectiveQuote>,
}

impl SideSlots {
    fn offer(&mut self, side: Side, quote: EffectiveQuote) {
        let slot = match side {
            Side::Over => &mut self.over,
            Side::Under => &mut self.under,
        };
        // Strictly greater only: the first quote seen keeps a tie.
        match slot {
            Some(best) if best.odds >= quote.odds => {}
            _ => *slot = Some(quote),
        }
    }

    fn complete(self) -> Option<LineQuotes> {
        Some(LineQuotes {
            over: self.over?,
            under: self.under?,
        })
    }
}

/// Group quotes by line and keep the best effective price per side.
///
/// Quotes without a positive finite price or a finite line are skipped, and
/// only lines priced on both sides make it into the returned book.
pub fn normalize(quotes: &[Quote], commission_pct: f64) -> LineBook {
    quotes
        .iter()
        .filter_map(|quote| {
            quote
                .effective(commission_pct)
                .map(|(line, effective)| (line, quote.side, effective))
        })
        .fold(BTreeMap::<Line, SideSlots>::new(), |mut book, (line, side, effective)| {
            book.entry(line).or_default().offer(side, effective);
            book
        })
        .into_iter()
        .filter_map(|(line, slots)| slots.complete().map(|quotes| (line, quotes)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(point: f64) -> Line {
        Line::from_point(point).unwrap()
    }

    #[test]
    fn test_best_price_per_side() {
        let quotes = vec![
            Quote::new("BookA", Side::Over, 2.5, 1.95),
            Quote::new("BookB", Side::Over, 2.5, 2.10),
            Quote::new("BookC", Side::Under, 2.5, 1.80),
            Quote::new("BookD", Side::Under, 2.5, 2.05),
        ];

        let book = normalize(&quotes, 0.0);
        let entry = book.get(line(2.5)).unwrap();
        assert_eq!(entry.over.bookmaker, "BookB");
        assert_eq!(entry.over.odds, 2.10);
        assert_eq!(entry.under.bookmaker, "BookD");
        assert_eq!(entry.under.odds, 2.05);
    }

    #[test]
    fn test_one_sided_line_is_dropped() {
        let quotes = vec![
            Quote::new("BookA", Side::Over, 3.5, 2.40),
            Quote::new("BookA", Side::Over, 2.5, 2.10),
            Quote::new("BookB", Side::Under, 2.5, 2.05),
        ];

        let book = normalize(&quotes, 0.0);
        assert_eq!(book.len(), 1);
        assert!(book.get(line(3.5)).is_none());
    }

    #[test]
    fn test_feed_noise_lands_in_same_bucket() {
        let quotes = vec![
            Quote::new("BookA", Side::Over, 2.499999, 2.10),
            Quote::new("BookB", Side::Under, 2.5, 2.05),
        ];

        let book = normalize(&quotes, 0.0);
        assert_eq!(book.len(), 1);
        assert!(book.get(line(2.5)).is_some());
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let quotes = vec![
            Quote::new("Zeta", Side::Over, 2.5, 2.00),
            Quote::new("Alpha", Side::Over, 2.5, 2.00),
            Quote::new("Beta", Side::Under, 2.5, 2.00),
        ];

        let book = normalize(&quotes, 0.0);
        assert_eq!(book.get(line(2.5)).unwrap().over.bookmaker, "Zeta");
    }

    #[test]
    fn test_malformed_quotes_are_skipped() {
        let quotes = vec![
            Quote::new("Broken", Side::Over, 2.5, 0.0),
            Quote::new("Broken", Side::Over, f64::NAN, 5.0),
            Quote::new("Broken", Side::Under, 2.5, f64::INFINITY),
            Quote::new("BookA", Side::Over, 2.5, 1.90),
            Quote::new("BookB", Side::Under, 2.5, 1.95),
        ];

        let book = normalize(&quotes, 0.0);
        let entry = book.get(line(2.5)).unwrap();
        assert_eq!(entry.over.bookmaker, "BookA");
        assert_eq!(entry.under.bookmaker, "BookB");
    }

    #[test]
    fn test_commission_applied_before_comparison() {
        let quotes = vec![
            Quote::new("BookA", Side::Over, 2.5, 2.00),
            Quote::new("BookB", Side::Under, 2.5, 2.20),
        ];

        let book = normalize(&quotes, 5.0);
        let entry = book.get(line(2.5)).unwrap();
        assert!((entry.over.odds - 1.90).abs() < 1e-12);
        assert_eq!(entry.over.raw_odds, 2.00);
        assert!((entry.under.odds - 2.09).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let quotes = vec![
            Quote::new("BookA", Side::Over, 2.5, 2.10),
            Quote::new("BookB", Side::Under, 2.5, 2.05),
            Quote::new("BookC", Side::Over, 1.5, 1.40),
            Quote::new("BookD", Side::Under, 1.5, 3.10),
        ];

        assert_eq!(normalize(&quotes, 2.0), normalize(&quotes, 2.0));
    }

    #[test]
    fn test_no_quotes_yields_empty_book() {
        assert!(normalize(&[], 0.0).is_empty());
    }
}
