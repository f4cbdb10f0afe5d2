//! Board loading: one lists call, then the three tracked lists in parallel.

pub mod model;

pub use model::{
    Action, ActionData, BoardSnapshot, Card, Label, List, ListTitles, LIST_TITLES,
};

use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{BurndownError, BurndownResult};
use crate::trello::BoardApi;

fn list_id<'a>(lists: &'a HashMap<String, String>, title: &str) -> BurndownResult<&'a str> {
    lists
        .get(title)
        .map(String::as_str)
        .ok_or_else(|| BurndownError::ListNotFound(title.to_string()))
}

/// Fetch the done, doing and open cards of a board.
///
/// The three card fetches run concurrently and all must succeed; the first
/// failure is returned. The backlog list is never fetched.
pub async fn load_board<A: BoardApi + ?Sized>(
    api: &A,
    board_id: &str,
    titles: &ListTitles,
) -> BurndownResult<BoardSnapshot> {
    let lists = api.lists_of(board_id).await?;
    debug!(board_id = %board_id, lists = lists.len(), "Fetched board lists");

    let done_id = list_id(&lists, titles.done)?;
    let open_id = list_id(&lists, titles.open)?;
    let doing_id = list_id(&lists, titles.doing)?;

    let (done_cards, open_cards, doing_cards) = futures::future::try_join3(
        api.cards_of(done_id),
        api.cards_of(open_id),
        api.cards_of(doing_id),
    )
    .await?;

    info!(
        board_id = %board_id,
        done = done_cards.len(),
        doing = doing_cards.len(),
        open = open_cards.len(),
        "Loaded board snapshot"
    );

    Ok(BoardSnapshot {
        done_cards,
        doing_cards,
        open_cards,
    })
}
