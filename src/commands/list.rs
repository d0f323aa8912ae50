//! List command - print one page of notes

use crate::{
    Result,
    api::NotesSource,
    cli::QueryArgs,
    output::{self, OutputWriter},
    query::filter_tag,
};

/// Execute the list command
///
/// # Errors
///
/// Returns `NoteboardError::Api` if the notes service request fails.
pub fn execute(
    source: &dyn NotesSource,
    args: &QueryArgs,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    let tag = filter_tag(args.tag.as_deref());
    tracing::debug!(query = %args.query, page = args.page, ?tag, "listing notes");

    let page = source.fetch_notes(&args.query, args.page, tag)?;
    output::print_page(out, &page, args.page, quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{BufferWriter, MessageLevel};
    use crate::testing::{FetchCall, MockSource, sample_page};

    #[test]
    fn test_list_translates_all_tag() {
        let source = MockSource::with_page(sample_page(2, 1));
        let out = BufferWriter::new();
        let args = QueryArgs {
            query: "milk".to_string(),
            page: 1,
            tag: Some("all".to_string()),
        };

        execute(&source, &args, &out, false).unwrap();

        assert_eq!(
            source.fetch_calls(),
            vec![FetchCall {
                query: "milk".into(),
                page: 1,
                tag: Some(String::new()),
            }]
        );
        assert_eq!(out.messages().len(), 3);
    }

    #[test]
    fn test_list_quiet_prints_ids_only() {
        let source = MockSource::with_page(sample_page(2, 5));
        let out = BufferWriter::new();
        let args = QueryArgs {
            page: 2,
            ..QueryArgs::default()
        };

        execute(&source, &args, &out, true).unwrap();

        assert_eq!(
            out.messages(),
            vec![
                (MessageLevel::Normal, "note-0".to_string()),
                (MessageLevel::Normal, "note-1".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_propagates_errors() {
        let source = MockSource::failing(401);
        let out = BufferWriter::new();
        let args = QueryArgs {
            page: 1,
            ..QueryArgs::default()
        };
        assert!(execute(&source, &args, &out, false).is_err());
        assert!(out.messages().is_empty());
    }
}
