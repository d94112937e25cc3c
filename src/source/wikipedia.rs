use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::Locale;
use crate::error::SourceError;
use crate::source::http::fetch_url;
use crate::source::{Candidate, TextSource};

/// Random article intros from the Wikipedia of the configured locale.
pub struct WikipediaSource {
    pub locale: Locale,
    pub candidates: u32,
    pub timeout: Duration,
}

impl WikipediaSource {
    pub fn new(locale: Locale, candidates: u32, timeout: Duration) -> Self {
        Self {
            locale,
            candidates,
            timeout,
        }
    }

    pub fn url(&self) -> String {
        format!(
            "https://{}.wikipedia.org/w/api.php?format=json&action=query&prop=extracts\
             &exlimit=max&explaintext&exintro&generator=random&grnnamespace=0\
             &grnlimit={}&origin=*&redirects=",
            self.locale.as_str(),
            self.candidates
        )
    }
}

impl TextSource for WikipediaSource {
    fn fetch(&self) -> Result<Vec<Candidate>, SourceError> {
        let url = self.url();
        debug!(%url, "fetching wikipedia candidates");
        let body = fetch_url(&url, self.timeout)?;
        parse_response(&body)
    }
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    query: Option<Query>,
}

#[derive(Deserialize)]
struct Query {
    #[serde(default)]
    pages: BTreeMap<String, Page>,
}

#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: String,
}

/// Turn an API payload into candidates, in page-id order. A payload without
/// a `query` object yields no candidates.
pub fn parse_response(body: &str) -> Result<Vec<Candidate>, SourceError> {
    let response: Response = serde_json::from_str(body)?;
    let pages = response.query.map(|q| q.pages).unwrap_or_default();
    Ok(pages
        .into_values()
        .map(|page| Candidate {
            title: Some(page.title),
            text: page.extract,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_uses_locale_and_candidate_count() {
        let source = WikipediaSource::new(Locale::De, 7, Duration::from_secs(1));
        let url = source.url();
        assert!(url.starts_with("https://de.wikipedia.org/w/api.php?format=json"));
        assert!(url.contains("&grnlimit=7&"));
        assert!(url.ends_with("&origin=*&redirects="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_parse_response_pages() {
        let body = r#"{
            "batchcomplete": "",
            "query": {
                "pages": {
                    "12": {"pageid": 12, "ns": 0, "title": "Beta", "extract": "Second."},
                    "11": {"pageid": 11, "ns": 0, "title": "Alpha", "extract": "First."}
                }
            }
        }"#;
        let candidates = parse_response(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title.as_deref(), Some("Alpha"));
        assert_eq!(candidates[0].text, "First.");
        assert_eq!(candidates[1].title.as_deref(), Some("Beta"));
    }

    #[test]
    fn test_parse_response_without_query() {
        assert!(parse_response("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        assert!(matches!(
            parse_response("<html>"),
            Err(SourceError::Parse(_))
        ));
    }
}
