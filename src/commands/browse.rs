//! Browse command - open the interactive notes view

use crate::{
    Result,
    api::{NotesPage, NotesSource},
    cli::QueryArgs,
    config::NoteboardConfig,
    query::{QueryCache, filter_tag},
    view::{AppOptions, NotesApp, NotesProps},
};
use std::sync::Arc;

/// Fetch the first page before the view starts
///
/// A failure is logged and yields `None`; the view then loads on its own.
#[must_use]
pub fn prefetch(source: &dyn NotesSource, props: &NotesProps) -> Option<NotesPage> {
    let tag = filter_tag(props.initial_tag.as_deref());
    match source.fetch_notes(&props.initial_query, props.initial_page, tag) {
        Ok(page) => Some(page),
        Err(e) => {
            tracing::warn!("prefetch failed, starting without data: {e}");
            None
        }
    }
}

/// View options derived from configuration
#[must_use]
pub const fn options(config: &NoteboardConfig) -> AppOptions {
    AppOptions {
        debounce: config.debounce(),
        stale_after: config.stale_after(),
        worker_threads: 2,
        tick_rate: std::time::Duration::from_millis(50),
    }
}

/// Execute the browse command
///
/// # Errors
///
/// Returns `NoteboardError::Ui` if the terminal cannot be driven.
pub fn execute(
    source: Arc<dyn NotesSource>,
    config: &NoteboardConfig,
    args: QueryArgs,
    no_prefetch: bool,
) -> Result<()> {
    let mut props = NotesProps::new(args.query, args.page, args.tag);
    if !no_prefetch {
        props.initial_data = prefetch(source.as_ref(), &props);
    }

    let cache = QueryCache::shared(config.cache_ttl(), config.cache_capacity);
    let mut app = NotesApp::new(props, source, cache, options(config));
    app.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FetchCall, MockSource, sample_page};
    use std::time::Duration;

    #[test]
    fn test_prefetch_uses_initial_inputs() {
        let source = MockSource::with_page(sample_page(5, 3));
        let props = NotesProps::new("cat", 2, Some("all".to_string()));

        let page = prefetch(&source, &props).unwrap();

        assert_eq!(page.notes.len(), 5);
        assert_eq!(
            source.fetch_calls(),
            vec![FetchCall {
                query: "cat".into(),
                page: 2,
                tag: Some(String::new()),
            }]
        );
    }

    #[test]
    fn test_prefetch_failure_yields_none() {
        let source = MockSource::failing(500);
        assert!(prefetch(&source, &NotesProps::default()).is_none());
    }

    #[test]
    fn test_options_follow_config() {
        let config = NoteboardConfig {
            debounce_ms: 250,
            stale_after_secs: 30,
            ..NoteboardConfig::default()
        };
        let options = options(&config);
        assert_eq!(options.debounce, Duration::from_millis(250));
        assert_eq!(options.stale_after, Duration::from_secs(30));
    }
}
