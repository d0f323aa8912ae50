//! The notes view: state, fetch coordination and rendering in one loop
//!
//! Each turn of the loop:
//! 1. advance the debounce stage,
//! 2. point the coordinator at the current cache key once typing settles,
//! 3. drain finished worker requests,
//! 4. draw,
//! 5. wait for input (at most until the next debounce deadline).

use super::error::Result;
use super::events::{EventResult, ViewContext, poll_and_handle};
use super::regions::{Regions, show_pagination};
use super::state::NotesState;
use super::theme::Theme;
use super::widgets::{
    Activity, HelpBar, Loader, NoteList, NoteModal, NotePreview, Pagination, SearchBar, StatusBar,
};
use crate::api::{NotesPage, NotesSource};
use crate::output::MessageLevel;
use crate::query::{
    DEFAULT_DEBOUNCE, FetchCoordinator, FetchState, FetchWorker, QueryCache, WorkerCommand,
    WorkerEvent, dispatch,
};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

const CREATE_BUTTON: &str = "Create note +";

/// Inputs the view starts from
#[derive(Debug, Clone)]
pub struct NotesProps {
    pub initial_query: String,
    /// First page to show, starting at 1
    pub initial_page: u32,
    /// Tag filter, `"all"` for none
    pub initial_tag: Option<String>,
    /// Page already fetched for the initial inputs
    pub initial_data: Option<NotesPage>,
}

impl NotesProps {
    #[must_use]
    pub fn new(query: impl Into<String>, page: u32, tag: Option<String>) -> Self {
        Self {
            initial_query: query.into(),
            initial_page: page,
            initial_tag: tag,
            initial_data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Option<NotesPage>) -> Self {
        self.initial_data = data;
        self
    }
}

impl Default for NotesProps {
    fn default() -> Self {
        Self::new("", 1, None)
    }
}

/// Runtime knobs for the view
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    /// Debounce window for query edits
    pub debounce: Duration,
    /// Cached pages older than this are revalidated when shown
    pub stale_after: Duration,
    /// Number of fetch worker threads
    pub worker_threads: usize,
    /// Longest wait for input between loop turns
    pub tick_rate: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            stale_after: Duration::ZERO,
            worker_threads: 2,
            tick_rate: Duration::from_millis(50),
        }
    }
}

/// The notes view
pub struct NotesApp {
    state: NotesState,
    coordinator: FetchCoordinator,
    worker: FetchWorker,
    theme: Theme,
    tick_rate: Duration,
    spinner: usize,
}

impl NotesApp {
    /// Mount the view
    ///
    /// Spawns the fetch worker and seeds `cache` with `props.initial_data`.
    /// Nothing is fetched when the starting key is already cached.
    #[must_use]
    pub fn new(
        props: NotesProps,
        source: Arc<dyn NotesSource>,
        cache: QueryCache,
        options: AppOptions,
    ) -> Self {
        let worker = FetchWorker::spawn(source, options.worker_threads);
        let state = NotesState::new(
            props.initial_query,
            props.initial_page,
            props.initial_tag,
            options.debounce,
        );
        let coordinator = FetchCoordinator::mount(
            state.cache_key(),
            props.initial_data,
            cache,
            worker.commands(),
            options.stale_after,
        );
        tracing::info!(key = %state.cache_key(), "notes view mounted");

        Self {
            state,
            coordinator,
            worker,
            theme: Theme::default(),
            tick_rate: options.tick_rate,
            spinner: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &NotesState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut NotesState {
        &mut self.state
    }

    #[must_use]
    pub fn fetch_state(&self) -> FetchState<'_> {
        self.coordinator.state()
    }

    #[must_use]
    pub const fn coordinator(&self) -> &FetchCoordinator {
        &self.coordinator
    }

    /// Visible regions for the current state
    #[must_use]
    pub fn regions(&self) -> Regions {
        let fetch = self.coordinator.state();
        Regions::compute(fetch.is_loading, fetch.is_success, self.state.modal_open())
    }

    /// Facts about the displayed data that key handling depends on
    #[must_use]
    pub fn context(&self) -> ViewContext {
        let fetch = self.coordinator.state();
        ViewContext {
            total_pages: fetch.total_pages(),
            list_len: fetch.data.map_or(0, |page| page.notes.len()),
        }
    }

    /// Advance timers and apply finished requests
    pub fn tick(&mut self, now: Instant) {
        if self.state.tick(now) {
            tracing::debug!(query = %self.state.debounced_query(), "query settled");
        }
        self.sync();
        while let Some(event) = self.worker.try_next() {
            self.apply(event);
        }
        let len = self.context().list_len;
        self.state.clamp_cursor(len);
        self.state.cleanup_messages();
        self.spinner = self.spinner.wrapping_add(1);
    }

    /// Wait up to `timeout` for the worker, then apply everything it finished
    ///
    /// Returns the number of events applied.
    pub fn wait_for_worker(&mut self, timeout: Duration) -> usize {
        let Some(first) = self.worker.next_timeout(timeout) else {
            return 0;
        };
        self.apply(first);
        let mut applied = 1;
        while let Some(event) = self.worker.try_next() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Point the coordinator at the current key unless a query edit is pending
    fn sync(&mut self) {
        if !self.state.is_debouncing() {
            self.coordinator.sync(self.state.cache_key());
        }
    }

    /// React to the outcome of an input event
    pub fn handle(&mut self, result: EventResult) {
        match result {
            EventResult::PageChanged => self.sync(),
            EventResult::Refetch => {
                tracing::debug!(key = %self.coordinator.current_key(), "manual refetch");
                self.coordinator.refetch();
                self.state.add_message(MessageLevel::Info, "Refreshing notes");
            }
            EventResult::Submit(note) => {
                self.state.form.submitting = self.state.modal_open();
                if let Err(reason) = dispatch(&self.worker.commands(), WorkerCommand::Create(note))
                {
                    self.state.form.fail(reason);
                }
            }
            EventResult::Continue
            | EventResult::Quit
            | EventResult::QueryChanged
            | EventResult::Ignored => {}
        }
    }

    /// The open modal is waiting on a creation it submitted
    const fn pending_submission(&self) -> bool {
        self.state.modal_open() && self.state.form.submitting
    }

    fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Fetched {
                key,
                generation,
                result,
                elapsed,
            } => {
                let failure = result.as_ref().err().map(|e| {
                    if e.is_unauthorized() {
                        format!("{e} (check the token in `noteboard config path`)")
                    } else {
                        e.to_string()
                    }
                });
                tracing::debug!(%key, ?elapsed, ok = failure.is_none(), "fetch finished");
                let is_current = self.coordinator.handle_fetched(key, generation, result);
                if let Some(failure) = failure
                    && is_current
                {
                    self.state
                        .add_message(MessageLevel::Error, format!("Could not load notes: {failure}"));
                }
            }
            WorkerEvent::Created(Ok(note)) => {
                tracing::info!(id = %note.id, "note created");
                // A draft started after the submitting modal was dismissed stays open
                if self.pending_submission() {
                    self.state.close_modal();
                }
                self.coordinator.invalidate();
                self.state
                    .add_message(MessageLevel::Success, format!("Created \"{}\"", note.title));
            }
            WorkerEvent::Created(Err(e)) => {
                tracing::warn!("note creation failed: {e}");
                if self.pending_submission() {
                    self.state.form.fail(e.to_string());
                } else {
                    self.state
                        .add_message(MessageLevel::Error, format!("Could not create note: {e}"));
                }
            }
        }
    }

    fn activity(&self) -> Activity {
        let fetch = self.coordinator.state();
        if self.state.is_debouncing() {
            Activity::Typing
        } else if fetch.is_placeholder {
            Activity::Placeholder
        } else if fetch.is_fetching {
            Activity::Fetching
        } else {
            Activity::Idle
        }
    }

    /// Draw the whole view into `frame`
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Length(3), // Toolbar
            Constraint::Min(5),    // Content
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let fetch = self.coordinator.state();
        let regions = Regions::compute(fetch.is_loading, fetch.is_success, self.state.modal_open());
        let total_pages = fetch.total_pages();
        let paginated = show_pagination(total_pages);

        self.render_toolbar(frame, chunks[0], total_pages);

        if regions.loader {
            frame.render_widget(
                Loader::new(self.spinner, &self.theme).error(fetch.error),
                chunks[1],
            );
        }
        if regions.list
            && let Some(page) = fetch.data
        {
            let content =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(chunks[1]);
            self.state.visible_height = content[0].height.saturating_sub(2) as usize;
            frame.render_widget(
                NoteList::new(&page.notes, &self.theme)
                    .position(self.state.cursor, self.state.scroll_offset)
                    .placeholder(fetch.is_placeholder),
                content[0],
            );
            frame.render_widget(
                NotePreview::new(page.notes.get(self.state.cursor), &self.theme),
                content[1],
            );
        }

        let messages = self.state.active_messages();
        frame.render_widget(
            StatusBar::new(&messages, &self.theme).activity(self.activity()),
            chunks[2],
        );

        let hints = if self.state.modal_open() {
            HelpBar::modal_hints()
        } else {
            HelpBar::browse_hints(paginated)
        };
        frame.render_widget(HelpBar::new(&hints, &self.theme), chunks[3]);

        if regions.modal {
            frame.render_widget(NoteModal::new(&self.state.form, &self.theme), area);
        }
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect, total_pages: u32) {
        let page = self.state.page();
        let pagination_width = if show_pagination(total_pages) {
            Pagination::width(total_pages, page)
        } else {
            0
        };
        #[allow(clippy::cast_possible_truncation)]
        let button_width = CREATE_BUTTON.chars().count() as u16 + 4;

        let chunks = Layout::horizontal([
            Constraint::Min(20),
            Constraint::Length(pagination_width),
            Constraint::Length(button_width),
        ])
        .split(area);

        frame.render_widget(
            SearchBar::new(self.state.query_field(), &self.theme)
                .focused(!self.state.modal_open())
                .pending(self.state.is_debouncing()),
            chunks[0],
        );

        if show_pagination(total_pages) {
            frame.render_widget(Pagination::new(total_pages, page, &self.theme), chunks[1]);
        }

        let button_style = if self.state.modal_open() {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };
        frame.render_widget(
            Paragraph::new(CREATE_BUTTON)
                .alignment(Alignment::Center)
                .style(self.theme.success_style())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(button_style),
                ),
            chunks[2],
        );
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Run the view until the user quits
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, drawn to or read
    /// from.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.run_loop(&mut terminal);
        Self::cleanup_terminal()?;
        tracing::info!("notes view closed");
        result
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.state.should_exit {
            let now = Instant::now();
            self.tick(now);
            terminal.draw(|frame| self.render(frame))?;

            let timeout = self
                .state
                .debounce_remaining(now)
                .map_or(self.tick_rate, |left| left.min(self.tick_rate));
            let ctx = self.context();
            let result = poll_and_handle(&mut self.state, ctx, timeout)?;
            self.handle(result);
        }
        Ok(())
    }
}
