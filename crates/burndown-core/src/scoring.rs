//! Label-based story point scoring.

use crate::board::Card;
use crate::sprint::Metric;

/// Story points of a card: the metric value of every label, summed.
/// Unknown labels score 0; a repeated label counts every time.
///
/// Metric values are `u32` and sums are `u64`, so no realistic board can
/// overflow a total.
pub fn score(card: &Card, metric: &Metric) -> u64 {
    card.labels
        .iter()
        .map(|label| metric.get(&label.name).copied().map_or(0, u64::from))
        .sum()
}

/// Story points of all cards in a list.
pub fn score_list(cards: &[Card], metric: &Metric) -> u64 {
    cards.iter().map(|card| score(card, metric)).sum()
}
