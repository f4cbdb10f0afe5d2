//! Board domain models as returned by the remote service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A label attached to a card. Its name is the key into the sprint metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A card on one of the board's lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "idList", default)]
    pub list_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// A list (column) on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
}

/// Source and destination list of a card movement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(rename = "listBefore", default)]
    pub list_before: Option<List>,
    #[serde(rename = "listAfter", default)]
    pub list_after: Option<List>,
}

/// A card-history event. `time` is parsed from the remote `date` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "date")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub data: ActionData,
}

impl Action {
    /// Whether this action moved the card into the list titled `done_title`.
    pub fn moved_into(&self, done_title: &str) -> bool {
        self.data
            .list_after
            .as_ref()
            .is_some_and(|list| list.name == done_title)
    }
}

/// Well-known list titles on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTitles {
    pub open: &'static str,
    pub doing: &'static str,
    pub done: &'static str,
    pub backlog: &'static str,
}

/// The fixed titles the board is expected to use.
pub const LIST_TITLES: ListTitles = ListTitles {
    open: "Offen",
    doing: "In Arbeit",
    done: "Erledigt",
    backlog: "Backlog",
};

impl Default for ListTitles {
    fn default() -> Self {
        LIST_TITLES
    }
}

/// Cards of the three tracked lists, fetched once per request.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    pub done_cards: Vec<Card>,
    pub doing_cards: Vec<Card>,
    pub open_cards: Vec<Card>,
}
