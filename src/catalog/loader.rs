//! Catalog loading with stale-response protection
//!
//! Every parameter change issues one fetch tagged with a ticket from a
//! monotonically increasing sequence. When a fetch resolves, its result is
//! applied only if no newer fetch has been issued since. Superseded fetches
//! are left to finish and their results are dropped.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use super::error::{CatalogError, Result};
use super::models::{Equipment, Resort};
use super::source::{CatalogSource, EquipmentQuery, ResortQuery};

pub const RESORTS_LOAD_ERROR: &str = "Could not load resorts.";
pub const EQUIPMENT_LOAD_ERROR: &str = "Could not load equipment.";

/// Tag identifying one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Source of request tickets for one kind of fetch
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the most recently issued one
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// What a guarded fetch resolved to
#[derive(Debug)]
pub enum LoadOutcome<T> {
    Loaded(Vec<T>),
    Failed(CatalogError),
    /// A newer fetch was issued before this one resolved
    Superseded,
}

impl<T> LoadOutcome<T> {
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, LoadOutcome::Superseded)
    }
}

async fn guarded<T, F>(sequence: &RequestSequence, ticket: RequestTicket, fetch: F) -> LoadOutcome<T>
where
    F: Future<Output = Result<Vec<T>>>,
{
    let result = fetch.await;
    if !sequence.is_current(ticket) {
        debug!(?ticket, "Dropping superseded catalog response");
        return LoadOutcome::Superseded;
    }
    match result {
        Ok(items) => LoadOutcome::Loaded(items),
        Err(e) => {
            warn!("Catalog fetch failed: {}", e);
            LoadOutcome::Failed(e)
        }
    }
}

/// Issues catalog fetches and discards stale results
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    resorts: RequestSequence,
    equipment: RequestSequence,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            resorts: RequestSequence::new(),
            equipment: RequestSequence::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.source)
    }

    /// Issues a resort fetch. The ticket is taken immediately, so any fetch
    /// issued after this call supersedes it even if polled first.
    pub fn resorts(&self, query: ResortQuery) -> impl Future<Output = LoadOutcome<Resort>> + '_ {
        let ticket = self.resorts.issue();
        debug!(?ticket, ?query, "Issuing resort fetch");
        async move {
            guarded(&self.resorts, ticket, self.source.fetch_resorts(&query)).await
        }
    }

    /// Issues an equipment fetch, see [`CatalogLoader::resorts`]
    pub fn equipment(
        &self,
        query: EquipmentQuery,
    ) -> impl Future<Output = LoadOutcome<Equipment>> + '_ {
        let ticket = self.equipment.issue();
        debug!(?ticket, ?query, "Issuing equipment fetch");
        async move {
            guarded(&self.equipment, ticket, self.source.fetch_equipment(&query)).await
        }
    }
}

/// Items, error message and loading flag behind one finder screen
#[derive(Debug, Clone, PartialEq)]
pub struct FinderState<T> {
    pub items: Vec<T>,
    pub error: Option<String>,
    pub loading: bool,
}

impl<T> Default for FinderState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            loading: false,
        }
    }
}

impl<T> FinderState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Applies a fetch outcome. A failure keeps the previous items and
    /// records `failure_message`; a superseded outcome changes nothing.
    /// Returns whether the state changed.
    pub fn apply(&mut self, outcome: LoadOutcome<T>, failure_message: &str) -> bool {
        match outcome {
            LoadOutcome::Loaded(items) => {
                self.items = items;
                self.error = None;
                self.loading = false;
                true
            }
            LoadOutcome::Failed(_) => {
                self.error = Some(failure_message.to_string());
                self.loading = false;
                true
            }
            LoadOutcome::Superseded => false,
        }
    }
}
