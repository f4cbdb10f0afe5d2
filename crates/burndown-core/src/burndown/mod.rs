//! Burndown projection.
//!
//! Combines a board snapshot, the sprint calendar and card completion times
//! into the ideal and actual remaining series.

pub mod model;

pub use model::{Burndown, ChartRow};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::board::{self, Action, BoardSnapshot, Card, ListTitles};
use crate::error::BurndownResult;
use crate::scoring::{score, score_list};
use crate::sprint::SprintConfig;
use crate::trello::{ActivityResolver, BoardApi};

/// Finds the latest transition of a card into the done list.
#[async_trait]
pub trait DoneResolver: Send + Sync {
    /// `Ok(None)` when the card's history has no done transition.
    async fn latest_done(&self, card: &Card) -> BurndownResult<Option<Action>>;
}

/// Points of one done card and the working day it was completed on.
#[derive(Debug, Clone, Copy)]
struct Completion {
    points: u64,
    day: u32,
}

fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Project the burndown of `snapshot` as seen at `now`.
///
/// Every done card is resolved concurrently. A card whose lookup fails or
/// whose history has no done transition counts as completed on day 0.
pub async fn project(
    snapshot: &BoardSnapshot,
    sprint: &SprintConfig,
    resolver: Arc<dyn DoneResolver>,
    now: DateTime<Utc>,
) -> Burndown {
    let metric = &sprint.metric;
    let length = sprint.length;
    let calendar = sprint.calendar();

    let done_points = score_list(&snapshot.done_cards, metric);
    let total = done_points
        + score_list(&snapshot.doing_cards, metric)
        + score_list(&snapshot.open_cards, metric);
    debug!(total, done_points, "Scored board");

    let ideal_speed = total as f64 / f64::from(length);
    let ideal_remaining: Vec<f64> = (0..length)
        .map(|d| round1(total as f64 - f64::from(d + 1) * ideal_speed))
        .collect();

    let today = calendar.current_day_of_work(now);
    let tracked = (today + 1).min(length) as usize;
    let mut actual_remaining = vec![total; tracked];

    let expected = snapshot.done_cards.len();
    let (tx, mut rx) = mpsc::channel::<Completion>(expected.max(1));
    let mut lookups = JoinSet::new();
    for card in &snapshot.done_cards {
        let card = card.clone();
        let points = score(&card, metric);
        let resolver = Arc::clone(&resolver);
        let tx = tx.clone();
        lookups.spawn(async move {
            let day = match resolver.latest_done(&card).await {
                Ok(Some(action)) => calendar.day_of_work(action.time),
                Ok(None) => 0,
                Err(e) => {
                    warn!(card_id = %card.id, error = %e, "Done lookup failed, counting card from day 0");
                    0
                }
            };
            if tx.send(Completion { points, day }).await.is_err() {
                debug!(card_id = %card.id, "Projection dropped before completion was delivered");
            }
        });
    }
    drop(tx);

    for _ in 0..expected {
        let Some(completion) = rx.recv().await else {
            break;
        };
        debug!(points = completion.points, day = completion.day, "Applying completion");
        let from = (completion.day as usize).min(tracked);
        for remaining in &mut actual_remaining[from..] {
            *remaining -= completion.points;
        }
    }

    let actual_speed = done_points as f64 / f64::from(today.max(1));

    let mut chart_data = Vec::with_capacity(length as usize + 1);
    chart_data.push(ChartRow {
        day: 0,
        ideal: total as f64,
        actual: Some(total),
    });
    for (d, ideal) in ideal_remaining.iter().enumerate() {
        chart_data.push(ChartRow {
            day: d as u32 + 1,
            ideal: *ideal,
            actual: actual_remaining.get(d).copied(),
        });
    }

    Burndown {
        total_story_points: total,
        ideal_remaining,
        actual_remaining,
        ideal_speed,
        actual_speed,
        metric: metric.clone(),
        chart_data,
        begin_of_sprint: sprint.begin,
        length_of_sprint: length,
    }
}

/// Load the board named in `sprint` and project its burndown at `now`.
pub async fn generate_burndown<A: BoardApi + ?Sized + 'static>(
    api: Arc<A>,
    sprint: &SprintConfig,
    titles: &ListTitles,
    now: DateTime<Utc>,
) -> BurndownResult<Burndown> {
    sprint.validate()?;

    let snapshot = board::load_board(api.as_ref(), &sprint.board_id, titles).await?;
    let resolver: Arc<dyn DoneResolver> = Arc::new(ActivityResolver::new(api, titles.done));
    let burndown = project(&snapshot, sprint, resolver, now).await;

    info!(
        board_id = %sprint.board_id,
        total = burndown.total_story_points,
        today = burndown.actual_remaining.len().saturating_sub(1),
        "Computed burndown"
    );
    Ok(burndown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ActionData, Label, List, LIST_TITLES};
    use crate::error::BurndownError;
    use crate::sprint::Metric;
    use chrono::{NaiveDate, TimeZone};
    use std::collections::HashMap;

    /// Resolver with a fixed completion time per card id; unknown cards fail.
    struct FixedResolver {
        done_at: HashMap<String, Option<DateTime<Utc>>>,
    }

    #[async_trait]
    impl DoneResolver for FixedResolver {
        async fn latest_done(&self, card: &Card) -> BurndownResult<Option<Action>> {
            match self.done_at.get(&card.id) {
                Some(Some(time)) => Ok(Some(Action {
                    id: format!("move-{}", card.id),
                    kind: "updateCard".to_string(),
                    time: *time,
                    data: ActionData {
                        list_before: None,
                        list_after: Some(List {
                            id: "done".to_string(),
                            name: LIST_TITLES.done.to_string(),
                        }),
                    },
                })),
                Some(None) => Ok(None),
                None => Err(BurndownError::RemoteStatus {
                    status: 503,
                    endpoint: format!("/1/cards/{}/actions", card.id),
                }),
            }
        }
    }

    fn resolver(entries: &[(&str, Option<DateTime<Utc>>)]) -> Arc<dyn DoneResolver> {
        Arc::new(FixedResolver {
            done_at: entries
                .iter()
                .map(|(id, time)| (id.to_string(), *time))
                .collect(),
        })
    }

    fn card(id: &str, labels: &[&str]) -> Card {
        Card {
            id: id.to_string(),
            name: format!("Card {id}"),
            list_id: String::new(),
            url: String::new(),
            labels: labels
                .iter()
                .map(|name| Label {
                    id: String::new(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn sprint(length: u32) -> SprintConfig {
        SprintConfig {
            board_id: "board-1".to_string(),
            begin: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            length,
            metric: Metric::from([("S".to_string(), 1), ("M".to_string(), 5), ("XL".to_string(), 10)]),
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn assert_monotone(values: &[u64]) {
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1], "not monotone: {values:?}");
        }
    }

    #[tokio::test]
    async fn test_first_day_without_done_cards() {
        let snapshot = BoardSnapshot {
            done_cards: vec![],
            doing_cards: vec![card("g1", &["XL", "XL"])],
            open_cards: vec![card("o1", &["XL", "XL", "XL"])],
        };

        let burndown = project(&snapshot, &sprint(5), resolver(&[]), at(1, 0)).await;

        assert_eq!(burndown.total_story_points, 50);
        assert_eq!(burndown.ideal_remaining, vec![40.0, 30.0, 20.0, 10.0, 0.0]);
        assert_eq!(burndown.actual_remaining, vec![50]);
        assert_eq!(burndown.ideal_speed, 10.0);
        assert_eq!(burndown.actual_speed, 0.0);
    }

    #[tokio::test]
    async fn test_done_card_decrements_from_its_day() {
        let snapshot = BoardSnapshot {
            done_cards: vec![card("d1", &["M"])],
            doing_cards: vec![card("g1", &["XL"])],
            open_cards: vec![card("o1", &["M"])],
        };
        // Completed during the third day after start, evaluated on day 4.
        let resolver = resolver(&[("d1", Some(at(3, 15)))]);

        let burndown = project(&snapshot, &sprint(10), resolver, at(4, 12)).await;

        assert_eq!(burndown.total_story_points, 20);
        assert_eq!(burndown.actual_remaining, vec![20, 20, 20, 15, 15]);
        assert_eq!(burndown.actual_speed, 5.0 / 4.0);
    }

    #[tokio::test]
    async fn test_unresolved_done_cards_fall_into_day_zero() {
        let snapshot = BoardSnapshot {
            done_cards: vec![card("d1", &["S"]), card("d2", &["M"]), card("d3", &["S", "S"])],
            doing_cards: vec![],
            open_cards: vec![card("o1", &["XL"])],
        };
        // d1 has no done transition, d2 and d3 lookups fail.
        let resolver = resolver(&[("d1", None)]);

        let burndown = project(&snapshot, &sprint(5), resolver, at(3, 12)).await;

        assert_eq!(burndown.total_story_points, 18);
        assert_eq!(burndown.actual_remaining, vec![10, 10, 10, 10]);
        assert_eq!(burndown.chart_data.len(), 6);
        assert_eq!(burndown.chart_data[1].actual, Some(10));
    }

    #[tokio::test]
    async fn test_chart_shape() {
        let snapshot = BoardSnapshot {
            done_cards: vec![card("d1", &["M"]), card("d2", &["S"])],
            doing_cards: vec![card("g1", &["M"])],
            open_cards: vec![card("o1", &["XL"])],
        };
        let resolver = resolver(&[("d1", Some(at(2, 9))), ("d2", Some(at(3, 9)))]);

        let burndown = project(&snapshot, &sprint(8), resolver, at(3, 10)).await;

        let total = burndown.total_story_points;
        assert_eq!(burndown.chart_data.len(), 9);
        assert_eq!(
            burndown.chart_data[0],
            ChartRow { day: 0, ideal: total as f64, actual: Some(total) }
        );
        let today = 3;
        for (d, row) in burndown.chart_data.iter().skip(1).enumerate() {
            assert_eq!(row.day, d as u32 + 1);
            assert_eq!(row.actual.is_some(), d <= today, "row {d}");
        }
        assert_monotone(&burndown.actual_remaining);
        assert_eq!(burndown.actual_remaining, vec![21, 21, 16, 15]);
    }

    #[tokio::test]
    async fn test_totals_and_ideal_end() {
        let snapshot = BoardSnapshot {
            done_cards: vec![card("d1", &["S", "M"])],
            doing_cards: vec![card("g1", &["S"]), card("g2", &["unknown"])],
            open_cards: vec![card("o1", &["XL", "S"])],
        };
        let resolver = resolver(&[("d1", Some(at(2, 1)))]);

        let burndown = project(&snapshot, &sprint(7), resolver, at(20, 0)).await;

        let metric = &sprint(7).metric;
        let expected = score_list(&snapshot.done_cards, metric)
            + score_list(&snapshot.doing_cards, metric)
            + score_list(&snapshot.open_cards, metric);
        assert_eq!(burndown.total_story_points, expected);
        assert!(burndown.ideal_remaining[6].abs() <= 0.05);
        // 18 / 7 per day, rounded to one decimal.
        assert_eq!(burndown.ideal_remaining[0], 15.4);
        // Past the sprint end every day is tracked.
        assert_eq!(burndown.actual_remaining.len(), 7);
        assert_eq!(burndown.actual_remaining[0], 18);
        assert_monotone(&burndown.actual_remaining);
    }

    #[tokio::test]
    async fn test_largest_metric_values_keep_exact_totals() {
        let max = u64::from(u32::MAX);
        let mut sprint = sprint(5);
        sprint.metric = Metric::from([("XL".to_string(), u32::MAX)]);
        let snapshot = BoardSnapshot {
            done_cards: vec![card("d1", &["XL", "XL"])],
            doing_cards: vec![],
            open_cards: vec![card("o1", &["XL"])],
        };
        let resolver = resolver(&[("d1", Some(at(2, 9)))]);

        let burndown = project(&snapshot, &sprint, resolver, at(3, 9)).await;

        assert_eq!(burndown.total_story_points, 3 * max);
        assert_eq!(burndown.actual_remaining, vec![3 * max, 3 * max, max, max]);
        assert_monotone(&burndown.actual_remaining);
    }

    #[tokio::test]
    async fn test_completion_past_today_is_ignored() {
        let snapshot = BoardSnapshot {
            done_cards: vec![card("d1", &["M"])],
            doing_cards: vec![],
            open_cards: vec![card("o1", &["M"])],
        };
        // Clock skew: the completion lies after `now`.
        let resolver = resolver(&[("d1", Some(at(5, 9)))]);

        let burndown = project(&snapshot, &sprint(5), resolver, at(2, 9)).await;
        assert_eq!(burndown.actual_remaining, vec![10, 10, 10]);
    }

    #[tokio::test]
    async fn test_many_done_cards() {
        let done_cards: Vec<Card> = (0..40).map(|i| card(&format!("d{i}"), &["S"])).collect();
        let entries: Vec<(String, Option<DateTime<Utc>>)> = (0..40)
            .map(|i| (format!("d{i}"), Some(at(1 + (i % 5) as u32, 12))))
            .collect();
        let resolver: Arc<dyn DoneResolver> = Arc::new(FixedResolver {
            done_at: entries.into_iter().collect(),
        });
        let snapshot = BoardSnapshot {
            done_cards,
            doing_cards: vec![],
            open_cards: vec![],
        };

        let burndown = project(&snapshot, &sprint(5), resolver, at(5, 13)).await;
        assert_eq!(burndown.actual_remaining, vec![40, 32, 24, 16, 8]);
    }

    mod generate {
        use super::*;
        use crate::trello::BoardApi;

        struct StaticBoard;

        #[async_trait]
        impl BoardApi for StaticBoard {
            async fn lists_of(&self, _board_id: &str) -> BurndownResult<HashMap<String, String>> {
                Ok(HashMap::from([
                    ("Offen".to_string(), "open".to_string()),
                    ("In Arbeit".to_string(), "doing".to_string()),
                    ("Erledigt".to_string(), "done".to_string()),
                ]))
            }

            async fn cards_of(&self, list_id: &str) -> BurndownResult<Vec<Card>> {
                Ok(match list_id {
                    "done" => vec![card("d1", &["M"])],
                    "doing" => vec![card("g1", &["S"])],
                    _ => vec![card("o1", &["XL"])],
                })
            }

            async fn actions_of(&self, _card_id: &str) -> BurndownResult<Vec<Action>> {
                Ok(vec![Action {
                    id: "a1".to_string(),
                    kind: "updateCard".to_string(),
                    time: at(2, 10),
                    data: ActionData {
                        list_before: None,
                        list_after: Some(List {
                            id: "done".to_string(),
                            name: "Erledigt".to_string(),
                        }),
                    },
                }])
            }
        }

        #[tokio::test]
        async fn test_generate_end_to_end() {
            let burndown = generate_burndown(Arc::new(StaticBoard), &sprint(5), &LIST_TITLES, at(3, 12))
                .await
                .unwrap();
            assert_eq!(burndown.total_story_points, 16);
            assert_eq!(burndown.actual_remaining, vec![16, 16, 11, 11]);
        }

        #[tokio::test]
        async fn test_generate_rejects_zero_length() {
            let err = generate_burndown(Arc::new(StaticBoard), &sprint(0), &LIST_TITLES, at(3, 12))
                .await
                .unwrap_err();
            assert!(matches!(err, BurndownError::ValidationError(_)));
        }
    }
}
