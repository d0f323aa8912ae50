//! Terminal notes view
//!
//! A search box, a paginated note list with preview, and a create-note
//! modal, drawn with ratatui.
//!
//! ```text
//! ┌ Search ───────────────────────┐┌ Page 1/3 ─┐┌───────────────┐
//! │ / work│                       ││‹ 1 2 3 ›  ││ Create note + │
//! └───────────────────────────────┘└───────────┘└───────────────┘
//! ┌ Notes (12) ────────────────┐┌ Preview ─────────────────────┐
//! │ > Standup [Meeting] ...    ││ Standup                      │
//! └────────────────────────────┘└──────────────────────────────┘
//! ```

mod app;
pub mod error;
pub mod events;
pub mod regions;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{AppOptions, NotesApp, NotesProps};
pub use error::{Result, UiError};
pub use events::{EventResult, ViewContext};
pub use regions::{Regions, show_pagination};
pub use state::{NotesState, StatusMessage};
pub use theme::Theme;
