//! Which parts of the view are visible
//!
//! A pure mapping from fetch flags and modal state to visible regions. The
//! loader, list and modal branches are independent of each other; whether
//! loader and list can coexist is decided by the flags fed in, not here.

/// Visible content regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    pub loader: bool,
    pub list: bool,
    pub modal: bool,
}

impl Regions {
    /// Regions for the given flags
    #[must_use]
    pub const fn compute(is_loading: bool, is_success: bool, modal_open: bool) -> Self {
        Self {
            loader: is_loading,
            list: is_success,
            modal: modal_open,
        }
    }
}

/// Whether the pagination control is rendered at all
#[must_use]
pub const fn show_pagination(total_pages: u32) -> bool {
    total_pages > 1
}
