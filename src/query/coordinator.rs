//! Fetch coordination for the notes view
//!
//! The coordinator turns the current [`QueryKey`] into something the view can
//! render. It reads through the shared [`QueryCache`], queues fetches on the
//! worker, and keeps the last displayed page on screen while a new key loads
//! (stale-while-revalidate).
//!
//! # State
//!
//! - `displayed` is the page on screen and the key it belongs to. When that
//!   key differs from `current`, the page is a placeholder.
//! - `is_loading` and `is_success` both derive from `displayed`, so they can
//!   never be true together.
//! - Responses for keys other than `current` go into the cache and nowhere else.

use super::cache::QueryCache;
use super::key::QueryKey;
use super::worker::{WorkerCommand, dispatch};
use crate::api::{ApiError, NotesPage};
use crossbeam_channel::Sender;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Displayed {
    key: QueryKey,
    page: Arc<NotesPage>,
}

/// Snapshot of fetch state for rendering
#[derive(Debug, Clone, Copy)]
pub struct FetchState<'a> {
    /// Page to show, possibly a placeholder from a previous key
    pub data: Option<&'a NotesPage>,
    /// No page at all is available yet
    pub is_loading: bool,
    /// Some page is available
    pub is_success: bool,
    /// `data` belongs to a previous key
    pub is_placeholder: bool,
    /// A request for the current key is in flight
    pub is_fetching: bool,
    /// Last failure for the current key
    pub error: Option<&'a str>,
}

impl FetchState<'_> {
    /// Total pages reported by the displayed page, 1 when nothing is shown
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.data.map_or(1, |page| page.total_pages)
    }
}

/// Coordinates cache reads and worker fetches for one view
#[derive(Debug)]
pub struct FetchCoordinator {
    cache: QueryCache,
    commands: Sender<WorkerCommand>,
    stale_after: Duration,
    current: QueryKey,
    displayed: Option<Displayed>,
    in_flight: HashSet<QueryKey>,
    generation: u64,
    error: Option<String>,
}

impl FetchCoordinator {
    /// Mount the coordinator on its starting key
    ///
    /// `initial_data` is stored as a completed fetch for `initial_key` unless
    /// the cache already holds that key. Nothing is fetched when the key ends
    /// up cached.
    #[must_use]
    pub fn mount(
        initial_key: QueryKey,
        initial_data: Option<NotesPage>,
        cache: QueryCache,
        commands: Sender<WorkerCommand>,
        stale_after: Duration,
    ) -> Self {
        let mut coordinator = Self {
            cache,
            commands,
            stale_after,
            current: initial_key.clone(),
            displayed: None,
            in_flight: HashSet::new(),
            generation: 0,
            error: None,
        };

        if let Some(data) = initial_data {
            tracing::debug!(key = %initial_key, "seeding cache with initial data");
            coordinator.cache.seed(initial_key.clone(), data);
        }

        match coordinator.cache.get(&initial_key) {
            Some(entry) => {
                coordinator.displayed = Some(Displayed {
                    key: initial_key,
                    page: entry.page,
                });
            }
            None => coordinator.queue_fetch(initial_key),
        }

        coordinator
    }

    /// Key currently requested by the view
    #[must_use]
    pub const fn current_key(&self) -> &QueryKey {
        &self.current
    }

    /// Point the coordinator at `key`
    ///
    /// Returns `false` when `key` is already current. Otherwise a cached page
    /// is shown at once (and revalidated if stale); without one, the
    /// previous page stays as a placeholder while the key is fetched.
    pub fn sync(&mut self, key: QueryKey) -> bool {
        if key == self.current {
            return false;
        }
        tracing::debug!(from = %self.current, to = %key, "query key changed");
        self.current = key.clone();
        self.error = None;

        match self.cache.get(&key) {
            Some(entry) => {
                let stale = entry.is_stale(self.stale_after, Instant::now());
                self.displayed = Some(Displayed {
                    key: key.clone(),
                    page: entry.page,
                });
                if stale {
                    self.queue_fetch(key);
                }
            }
            None => self.queue_fetch(key),
        }
        true
    }

    /// Fetch the current key again regardless of the cache
    pub fn refetch(&mut self) {
        self.error = None;
        self.queue_fetch(self.current.clone());
    }

    /// Drop every cached page and refetch the current key
    ///
    /// Requests still in flight belong to the previous generation; their
    /// results are discarded when they arrive. The displayed page stays on
    /// screen as a placeholder until the refetch lands.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        tracing::debug!(generation = self.generation, "invalidating query cache");
        self.in_flight.clear();
        self.cache.invalidate_all();
        self.refetch();
    }

    /// Generation stamped on fetches queued from now on
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply a finished fetch
    ///
    /// Returns `true` when the result belongs to the current key. Results
    /// from a generation before the last [`invalidate`](Self::invalidate)
    /// are neither cached nor shown.
    pub fn handle_fetched(
        &mut self,
        key: QueryKey,
        generation: u64,
        result: Result<NotesPage, ApiError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(%key, generation, "discarding result from before invalidation");
            return false;
        }
        self.in_flight.remove(&key);
        let is_current = key == self.current;

        match result {
            Ok(page) => {
                let page = self.cache.insert(key.clone(), page);
                if is_current {
                    self.displayed = Some(Displayed { key, page });
                    self.error = None;
                }
            }
            Err(e) => {
                if is_current {
                    self.error = Some(e.to_string());
                }
            }
        }

        is_current
    }

    /// Snapshot for rendering
    #[must_use]
    pub fn state(&self) -> FetchState<'_> {
        let data = self.displayed.as_ref().map(|d| d.page.as_ref());
        FetchState {
            data,
            is_loading: data.is_none(),
            is_success: data.is_some(),
            is_placeholder: self
                .displayed
                .as_ref()
                .is_some_and(|d| d.key != self.current),
            is_fetching: self.in_flight.contains(&self.current),
            error: self.error.as_deref(),
        }
    }

    fn queue_fetch(&mut self, key: QueryKey) {
        if self.in_flight.contains(&key) {
            return;
        }
        let command = WorkerCommand::Fetch {
            key: key.clone(),
            generation: self.generation,
        };
        match dispatch(&self.commands, command) {
            Ok(()) => {
                self.in_flight.insert(key);
            }
            Err(reason) => {
                tracing::warn!(%key, "could not queue fetch: {reason}");
                if key == self.current {
                    self.error = Some(reason);
                }
            }
        }
    }
}
