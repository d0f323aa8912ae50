//! Query pipeline: debounce → cache key → cache / worker → view state
//!
//! ```text
//! keystrokes ──▶ Debouncer ──▶ QueryKey ──▶ FetchCoordinator ──▶ FetchState
//!                                              │        ▲
//!                                    QueryCache│        │WorkerEvent
//!                                              ▼        │
//!                                          FetchWorker (threads)
//! ```

mod cache;
mod coordinator;
mod debounce;
mod key;
mod worker;

pub use cache::{CachedPage, DEFAULT_CAPACITY, DEFAULT_TTL, QueryCache};
pub use coordinator::{FetchCoordinator, FetchState};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use key::{ALL_TAGS, QueryKey, filter_tag};
pub use worker::{FetchWorker, WorkerCommand, WorkerEvent, dispatch};
