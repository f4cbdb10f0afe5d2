//! Trello REST client.
//!
//! Builds authenticated URLs against the configured base URL and parses
//! response bodies into board models. Nothing is cached; every call is a
//! fresh GET.

pub mod activity;

pub use activity::ActivityResolver;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::board::{Action, Card, List};
use crate::config::Credentials;
use crate::error::{BurndownError, BurndownResult};

/// Default timeout for a single outbound GET.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(15);

const LISTS_FIELDS: &str = "name,idList,url,labels";
const CARDS_FIELDS: &str = "labels,id,name,idList";
const ACTIONS_FILTER: &str = "updateCard:idList";

/// Read access to a remote board.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Map of list name to list id. When two lists share a name the last one wins.
    async fn lists_of(&self, board_id: &str) -> BurndownResult<HashMap<String, String>>;

    /// Cards currently on the given list.
    async fn cards_of(&self, list_id: &str) -> BurndownResult<Vec<Card>>;

    /// List-movement history of a card, newest first.
    async fn actions_of(&self, card_id: &str) -> BurndownResult<Vec<Action>>;
}

/// HTTP client for the Trello REST API.
#[derive(Clone)]
pub struct TrelloClient {
    base_url: Url,
    app_key: String,
    api_token: String,
    client: reqwest::Client,
}

impl TrelloClient {
    /// Create a client with the default per-call timeout.
    pub fn new(credentials: &Credentials) -> BurndownResult<Self> {
        Self::with_timeout(credentials, DEFAULT_CALL_TIMEOUT)
    }

    /// Create a client whose outbound calls give up after `timeout`.
    pub fn with_timeout(credentials: &Credentials, timeout: Duration) -> BurndownResult<Self> {
        let base_url = Url::parse(&credentials.domain).map_err(|e| {
            BurndownError::config(format!("Invalid remote base URL '{}': {}", credentials.domain, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BurndownError::config(format!(
                "Remote base URL '{}' cannot carry a path",
                credentials.domain
            )));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            app_key: credentials.app_key.clone(),
            api_token: credentials.api_token.clone(),
            client,
        })
    }

    /// Base URL with `segments` appended as percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> BurndownResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BurndownError::config(format!("Invalid remote base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> BurndownResult<T> {
        let url = self.endpoint(segments)?;
        let endpoint = url.path().to_string();
        debug!(endpoint = %endpoint, "GET remote");

        let response = self
            .client
            .get(url)
            .query(&[("key", self.app_key.as_str()), ("token", self.api_token.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BurndownError::RemoteStatus {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl BoardApi for TrelloClient {
    async fn lists_of(&self, board_id: &str) -> BurndownResult<HashMap<String, String>> {
        let lists: Vec<List> = self
            .get(&["1", "boards", board_id, "lists"], &[("fields", LISTS_FIELDS)])
            .await?;

        let mut by_name = HashMap::with_capacity(lists.len());
        for list in lists {
            by_name.insert(list.name, list.id);
        }
        Ok(by_name)
    }

    async fn cards_of(&self, list_id: &str) -> BurndownResult<Vec<Card>> {
        self.get(&["1", "lists", list_id, "cards"], &[("fields", CARDS_FIELDS)])
            .await
    }

    async fn actions_of(&self, card_id: &str) -> BurndownResult<Vec<Action>> {
        self.get(&["1", "cards", card_id, "actions"], &[("filter", ACTIONS_FILTER)])
            .await
    }
}
