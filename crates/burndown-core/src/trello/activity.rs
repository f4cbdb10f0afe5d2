//! Resolves when a card last entered the done list.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::BoardApi;
use crate::board::{Action, Card};
use crate::burndown::DoneResolver;
use crate::error::BurndownResult;

/// Looks up a card's move history and picks its latest done transition.
///
/// Holds only shared read-only handles, so one resolver serves many
/// concurrent lookups against distinct cards.
pub struct ActivityResolver<A: ?Sized> {
    api: Arc<A>,
    done_title: String,
}

impl<A: BoardApi + ?Sized> ActivityResolver<A> {
    pub fn new(api: Arc<A>, done_title: impl Into<String>) -> Self {
        Self {
            api,
            done_title: done_title.into(),
        }
    }
}

#[async_trait]
impl<A: BoardApi + ?Sized> DoneResolver for ActivityResolver<A> {
    async fn latest_done(&self, card: &Card) -> BurndownResult<Option<Action>> {
        let actions = self.api.actions_of(&card.id).await?;
        // The remote returns history newest-first.
        let latest = actions
            .into_iter()
            .find(|action| action.moved_into(&self.done_title));

        if latest.is_none() {
            debug!(card_id = %card.id, "No transition into done list found");
        }
        Ok(latest)
    }
}
