use crate::error::{CatalogError, Result};
use crate::models::session::{Notice, SearchField, SearchSessionState, SessionSnapshot};
use crate::services::search::SearchClient;
use crate::utils::text::clean_query;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

/// What became of one `submit` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The submission was still the latest when its response arrived.
    Applied(SearchSessionState),
    /// A newer submission started first; the response was dropped.
    Stale,
}

/// Drives `Idle -> Loading -> Success | Empty | Failed` for one user session.
///
/// Every accepted submission bumps a generation counter stored alongside
/// the state. A response only lands if the generation is unchanged when it
/// resolves, so the visible state always belongs to the latest submission.
pub struct SearchSession {
    client: SearchClient,
    page_size: u32,
    state: watch::Sender<SessionSnapshot>,
    notices: broadcast::Sender<Notice>,
}

impl SearchSession {
    pub fn new(client: SearchClient, page_size: u32) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        let (notices, _) = broadcast::channel(16);
        Self {
            client,
            page_size: page_size.max(1),
            state,
            notices,
        }
    }

    pub fn client(&self) -> &SearchClient {
        &self.client
    }

    pub fn state(&self) -> SearchSessionState {
        self.state.borrow().state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Starts a search. A blank query is rejected with
    /// [`CatalogError::InvalidQuery`] and leaves the state untouched.
    pub async fn submit(&self, query: &str, field: SearchField) -> Result<SubmitOutcome> {
        let query = match clean_query(query) {
            Some(query) => query,
            None => {
                warn!("Ignoring blank {} search", field);
                return Err(CatalogError::InvalidQuery);
            }
        };

        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.state = SearchSessionState::Loading;
            generation = snapshot.generation;
        });

        let next = match self.client.search(query, field, 1, self.page_size).await {
            Ok(envelope) if envelope.is_empty() => SearchSessionState::Empty,
            Ok(envelope) => SearchSessionState::Success(envelope),
            Err(e) => {
                error!("Search error: {}", e);
                SearchSessionState::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        };

        let applied = self.state.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            snapshot.state = next.clone();
            true
        });

        if !applied {
            info!(
                "Discarding stale response for '{}' (generation {})",
                query, generation
            );
            return Ok(SubmitOutcome::Stale);
        }

        if let Some(notice) = next.notice() {
            info!("{}", notice);
            // No subscribers is fine.
            let _ = self.notices.send(notice);
        }

        Ok(SubmitOutcome::Applied(next))
    }
}
