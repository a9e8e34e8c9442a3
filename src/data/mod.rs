//! Odds data model: quotes, betting lines and events

pub mod event;
pub mod line_book;
pub mod quote;

pub use event::Event;
pub use line_book::{LineBook, LineQuotes};
pub use quote::{effective_odds, EffectiveQuote, Line, Quote, Side};
