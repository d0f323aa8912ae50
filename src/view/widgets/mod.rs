//! Ratatui widgets for the notes view

mod help_bar;
mod loader;
pub mod note_list;
pub mod note_modal;
mod pagination;
mod search_bar;
mod status_bar;
pub mod text_field;

pub use help_bar::{HelpBar, KeyHint};
pub use loader::Loader;
pub use note_list::{NoteList, NotePreview};
pub use note_modal::{FormField, NoteFormState, NoteModal};
pub use pagination::Pagination;
pub use search_bar::SearchBar;
pub use status_bar::{Activity, StatusBar};
pub use text_field::TextField;
