//! Blocking HTTP client for the notes service

use super::error::ApiError;
use super::types::{NewNote, Note, NotesPage};
use super::NotesSource;
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;

/// `NotesSource` backed by the remote notes service
#[derive(Debug, Clone)]
pub struct HttpNotesClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    per_page: u32,
}

impl HttpNotesClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        per_page: u32,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            per_page,
        })
    }

    /// Base URL requests are sent to (without trailing slash)
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Build the query string for a list request
///
/// Empty search text and absent or empty tags are left out entirely, so the
/// service applies its own "no filter" default.
#[must_use]
pub fn list_params(
    query: &str,
    page: u32,
    per_page: u32,
    tag: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("page", page.to_string()), ("perPage", per_page.to_string())];
    if !query.is_empty() {
        params.push(("search", query.to_string()));
    }
    if let Some(tag) = tag.filter(|t| !t.is_empty()) {
        params.push(("tag", tag.to_string()));
    }
    params
}

impl NotesSource for HttpNotesClient {
    fn fetch_notes(&self, query: &str, page: u32, tag: Option<&str>) -> Result<NotesPage, ApiError> {
        let params = list_params(query, page, self.per_page, tag);
        let request = self.authorize(self.http.get(self.notes_url()).query(&params));
        let response = Self::check_status(request.send()?)?;
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        note.validate()?;
        let request = self.authorize(self.http.post(self.notes_url()).json(note));
        let response = Self::check_status(request.send()?)?;
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NoteTag;

    fn client() -> HttpNotesClient {
        HttpNotesClient::new(
            "https://notes.example.com/api/",
            Some("secret".into()),
            12,
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = client();
        assert_eq!(client.base_url(), "https://notes.example.com/api");
        assert_eq!(client.notes_url(), "https://notes.example.com/api/notes");
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let client =
            HttpNotesClient::new("http://localhost", Some("  ".into()), 12, Duration::from_secs(1))
                .unwrap();
        assert!(client.token.is_none());
    }

    #[test]
    fn test_list_params_minimal() {
        let params = list_params("", 1, 12, None);
        assert_eq!(
            params,
            vec![("page", "1".to_string()), ("perPage", "12".to_string())]
        );
    }

    #[test]
    fn test_list_params_with_search_and_tag() {
        let params = list_params("cats", 3, 12, Some("Work"));
        assert!(params.contains(&("search", "cats".to_string())));
        assert!(params.contains(&("tag", "Work".to_string())));
        assert!(params.contains(&("page", "3".to_string())));
    }

    #[test]
    fn test_list_params_empty_tag_means_unfiltered() {
        let params = list_params("x", 1, 12, Some(""));
        assert!(!params.iter().any(|(k, _)| *k == "tag"));
    }

    #[test]
    fn test_create_rejects_invalid_note_without_request() {
        // Port 9 (discard) is never contacted: validation fails first
        let client =
            HttpNotesClient::new("http://127.0.0.1:9", None, 12, Duration::from_millis(50)).unwrap();
        let err = client
            .create_note(&NewNote::new("x", "", NoteTag::Todo))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
