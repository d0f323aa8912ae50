//! Background fetch worker
//!
//! Network calls run on a small pool of threads so the event loop never
//! blocks. The loop queues [`WorkerCommand`]s and drains [`WorkerEvent`]s;
//! both directions go through `crossbeam-channel`.

use super::key::QueryKey;
use crate::api::{ApiError, NewNote, Note, NotesPage, NotesSource};
use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError, bounded, unbounded};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Capacity of the command queue
const COMMAND_QUEUE: usize = 256;

/// Commands queued from the view to the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    /// Fetch the page identified by the key
    ///
    /// `generation` is echoed back so results issued before a cache
    /// invalidation can be told apart.
    Fetch { key: QueryKey, generation: u64 },
    /// Create a note
    Create(NewNote),
    /// Stop one worker thread
    Shutdown,
}

impl WorkerCommand {
    /// Short name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::Create(_) => "create",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Events sent back from the worker to the view
#[derive(Debug)]
pub enum WorkerEvent {
    /// A fetch finished
    Fetched {
        key: QueryKey,
        generation: u64,
        result: Result<NotesPage, ApiError>,
        elapsed: Duration,
    },
    /// A creation finished
    Created(Result<Note, ApiError>),
}

/// Queue a command without blocking
///
/// # Errors
///
/// Returns a human readable reason when the queue is full or the worker is gone.
pub fn dispatch(commands: &Sender<WorkerCommand>, command: WorkerCommand) -> Result<(), String> {
    let name = command.name();
    match commands.try_send(command) {
        Ok(()) => {
            tracing::debug!(command = name, "queued worker command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("Request queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => {
            Err("Fetch worker is not running; restart noteboard".to_string())
        }
    }
}

/// Pool of threads executing [`WorkerCommand`]s against a [`NotesSource`]
pub struct FetchWorker {
    commands: Sender<WorkerCommand>,
    events: Receiver<WorkerEvent>,
    handles: Vec<JoinHandle<()>>,
}

impl FetchWorker {
    /// Spawn `threads` worker threads (at least one)
    #[must_use]
    pub fn spawn(source: Arc<dyn NotesSource>, threads: usize) -> Self {
        let (cmd_tx, cmd_rx) = bounded::<WorkerCommand>(COMMAND_QUEUE);
        let (event_tx, event_rx) = unbounded::<WorkerEvent>();

        let handles = (0..threads.max(1))
            .map(|idx| {
                let source = Arc::clone(&source);
                let cmd_rx = cmd_rx.clone();
                let event_tx = event_tx.clone();
                thread::Builder::new()
                    .name(format!("noteboard-fetch-{idx}"))
                    .spawn(move || run(&*source, &cmd_rx, &event_tx))
            })
            .filter_map(|spawned| match spawned {
                Ok(handle) => Some(handle),
                Err(e) => {
                    tracing::error!("failed to spawn fetch worker: {e}");
                    None
                }
            })
            .collect();

        Self {
            commands: cmd_tx,
            events: event_rx,
            handles,
        }
    }

    /// Sender the coordinator queues commands on
    #[must_use]
    pub fn commands(&self) -> Sender<WorkerCommand> {
        self.commands.clone()
    }

    /// Take the next finished event, if any
    #[must_use]
    pub fn try_next(&self) -> Option<WorkerEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next event
    #[must_use]
    pub fn next_timeout(&self, timeout: Duration) -> Option<WorkerEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Number of live worker threads
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.handles.len()
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        // Threads blocked in a request finish it and then exit; they are not joined.
        for _ in &self.handles {
            let _ = self.commands.try_send(WorkerCommand::Shutdown);
        }
    }
}

fn run(source: &dyn NotesSource, commands: &Receiver<WorkerCommand>, events: &Sender<WorkerEvent>) {
    for command in commands {
        let event = match command {
            WorkerCommand::Fetch { key, generation } => {
                let started = Instant::now();
                let result = source.fetch_notes(&key.query, key.page, key.filter_tag());
                let elapsed = started.elapsed();
                match &result {
                    Ok(page) => tracing::debug!(
                        %key,
                        notes = page.notes.len(),
                        total_pages = page.total_pages,
                        ?elapsed,
                        "fetched notes"
                    ),
                    Err(e) => tracing::warn!(%key, ?elapsed, "fetch failed: {e}"),
                }
                WorkerEvent::Fetched {
                    key,
                    generation,
                    result,
                    elapsed,
                }
            }
            WorkerCommand::Create(note) => {
                let result = source.create_note(&note);
                match &result {
                    Ok(created) => tracing::info!(id = %created.id, "created note"),
                    Err(e) => tracing::warn!("create failed: {e}"),
                }
                WorkerEvent::Created(result)
            }
            WorkerCommand::Shutdown => break,
        };

        if events.send(event).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NoteTag;
    use crate::testing::{MockSource, sample_page};

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_fetch_round_trip() {
        let source = Arc::new(MockSource::with_page(sample_page(4, 2)));
        let worker = FetchWorker::spawn(source.clone(), 1);

        let key = QueryKey::new("cats", Some("all".into()), 2);
        let command = WorkerCommand::Fetch {
            key: key.clone(),
            generation: 7,
        };
        dispatch(&worker.commands(), command).unwrap();

        match worker.next_timeout(WAIT) {
            Some(WorkerEvent::Fetched {
                key: got,
                generation,
                result,
                ..
            }) => {
                assert_eq!(got, key);
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().notes.len(), 4);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let calls = source.fetch_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query, "cats");
        assert_eq!(calls[0].page, 2);
        assert_eq!(calls[0].tag.as_deref(), Some(""));
    }

    #[test]
    fn test_fetch_error_is_reported() {
        let source = Arc::new(MockSource::failing(503));
        let worker = FetchWorker::spawn(source, 1);

        dispatch(
            &worker.commands(),
            WorkerCommand::Fetch {
                key: QueryKey::new("", None, 1),
                generation: 0,
            },
        )
        .unwrap();

        match worker.next_timeout(WAIT) {
            Some(WorkerEvent::Fetched { result: Err(e), .. }) => {
                assert!(e.to_string().contains("503"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_create_round_trip() {
        let source = Arc::new(MockSource::with_page(sample_page(0, 1)));
        let worker = FetchWorker::spawn(source.clone(), 2);
        assert_eq!(worker.thread_count(), 2);

        let note = NewNote::new("Shopping list", "eggs", NoteTag::Shopping);
        dispatch(&worker.commands(), WorkerCommand::Create(note.clone())).unwrap();

        match worker.next_timeout(WAIT) {
            Some(WorkerEvent::Created(Ok(created))) => {
                assert_eq!(created.title, "Shopping list");
                assert_eq!(created.tag, "Shopping");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(source.created(), vec![note]);
    }

    #[test]
    fn test_try_next_is_non_blocking() {
        let worker = FetchWorker::spawn(Arc::new(MockSource::default()), 1);
        assert!(worker.try_next().is_none());
    }

    #[test]
    fn test_dispatch_to_dead_worker() {
        let (tx, rx) = bounded::<WorkerCommand>(1);
        drop(rx);
        let err = dispatch(&tx, WorkerCommand::Shutdown).unwrap_err();
        assert!(err.contains("not running"));
    }

    #[test]
    fn test_dispatch_to_full_queue() {
        let (tx, _rx) = bounded::<WorkerCommand>(1);
        dispatch(&tx, WorkerCommand::Shutdown).unwrap();
        let err = dispatch(&tx, WorkerCommand::Shutdown).unwrap_err();
        assert!(err.contains("full"));
    }
}
