//! # Ranking Strategy
//!
//! Strategies for picking the best provider quote.
//!
//! Every strategy scores a quote (lower is better) and selects the available
//! quote with the lowest score. Ties keep provider order, so the first provider
//! encountered wins.

use crate::domain::entities::ProviderQuote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default price-equivalent of one delivery day in the recommendation score.
pub const DEFAULT_DAY_WEIGHT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Price/speed trade-off score: `price + days × day_weight`. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationScore(Decimal);

impl RecommendationScore {
    /// Scores a quote. Saturates instead of overflowing.
    #[must_use]
    pub fn for_quote(quote: &ProviderQuote, day_weight: Decimal) -> Self {
        let days = Decimal::from(quote.estimated_days);
        let score = days
            .checked_mul(day_weight)
            .and_then(|d| d.checked_add(quote.total_price))
            .unwrap_or(Decimal::MAX);
        Self(score)
    }

    /// Returns the score value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for RecommendationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for ranking strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Score of a quote; lower is better.
    fn score(&self, quote: &ProviderQuote) -> Decimal;

    /// Best available quote; the first one wins a tie.
    fn select<'a>(&self, quotes: &'a [ProviderQuote]) -> Option<&'a ProviderQuote> {
        quotes
            .iter()
            .filter(|q| q.is_available)
            .fold(None::<(&ProviderQuote, Decimal)>, |best, q| {
                let score = self.score(q);
                match best {
                    Some((_, best_score)) if best_score <= score => best,
                    _ => Some((q, score)),
                }
            })
            .map(|(q, _)| q)
    }
}

/// Lowest total price.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestStrategy;

impl RankingStrategy for CheapestStrategy {
    fn score(&self, quote: &ProviderQuote) -> Decimal {
        quote.total_price
    }
}

/// Fewest delivery days.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastestStrategy;

impl RankingStrategy for FastestStrategy {
    fn score(&self, quote: &ProviderQuote) -> Decimal {
        Decimal::from(quote.estimated_days)
    }
}

/// Lowest [`RecommendationScore`].
#[derive(Debug, Clone, Copy)]
pub struct RecommendedStrategy {
    /// Price-equivalent of one delivery day.
    pub day_weight: Decimal,
}

impl Default for RecommendedStrategy {
    fn default() -> Self {
        Self {
            day_weight: DEFAULT_DAY_WEIGHT,
        }
    }
}

impl RecommendedStrategy {
    /// Creates a strategy with a custom day weight.
    #[must_use]
    pub fn new(day_weight: Decimal) -> Self {
        Self { day_weight }
    }
}

impl RankingStrategy for RecommendedStrategy {
    fn score(&self, quote: &ProviderQuote) -> Decimal {
        RecommendationScore::for_quote(quote, self.day_weight).get()
    }
}
