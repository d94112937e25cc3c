//! Where practice text comes from and how it becomes lines.

pub mod http;
pub mod wikipedia;

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use icu_normalizer::ComposingNormalizerBorrowed;
use rust_i18n::t;
use tracing::{info, warn};

use crate::config::{Config, Locale};
use crate::engine::filter::{AcceptPolicy, CharFilter, TextPolicy};
use crate::engine::segment::{segment, segment_titled};
use crate::error::SourceError;
use crate::event::AppEvent;
use crate::source::wikipedia::WikipediaSource;

/// One piece of text offered by a source, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub title: Option<String>,
    pub text: String,
}

impl Candidate {
    pub fn untitled(text: impl Into<String>) -> Self {
        Self {
            title: None,
            text: text.into(),
        }
    }
}

pub trait TextSource {
    fn fetch(&self) -> Result<Vec<Candidate>, SourceError>;
}

/// A text file given on the command line.
pub struct FileSource {
    pub path: PathBuf,
}

impl TextSource for FileSource {
    fn fetch(&self) -> Result<Vec<Candidate>, SourceError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(vec![Candidate::untitled(text)])
    }
}

/// Segmented raw lines ready for a `SequenceStore`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedText {
    pub lines: Vec<String>,
    pub title: Option<String>,
    pub placeholder: bool,
}

/// Validation and segmentation settings shared by every source.
#[derive(Clone, Debug)]
pub struct TextPipeline {
    pub locale: Locale,
    pub filter: CharFilter,
    pub accept: AcceptPolicy,
    pub max_line_length: usize,
}

impl TextPipeline {
    pub fn new(locale: Locale, accept: AcceptPolicy, max_line_length: usize) -> Self {
        Self {
            locale,
            filter: CharFilter::for_locale(locale),
            accept,
            max_line_length,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.locale, config.accept_policy(), config.max_line_length)
    }

    /// The single line shown when no usable text could be obtained.
    pub fn placeholder(&self) -> LoadedText {
        LoadedText {
            lines: vec![t!("source.placeholder", locale = self.locale.as_str()).to_string()],
            title: None,
            placeholder: true,
        }
    }

    /// First candidate passing the strict accept policy, or the placeholder.
    pub fn select(&self, candidates: Vec<Candidate>) -> LoadedText {
        for candidate in candidates {
            let text = nfc(&candidate.text);
            if !self.accept.accepts(&text, &self.filter) {
                continue;
            }
            let title = candidate
                .title
                .map(|title| self.filter.filter_text(&nfc(&title)))
                .filter(|title| !title.is_empty());
            let lines = match &title {
                Some(title) => segment_titled(title, &text, self.max_line_length),
                None => segment(&text, self.max_line_length),
            };
            return LoadedText {
                lines,
                title,
                placeholder: false,
            };
        }
        warn!(error = %SourceError::NoCandidate, "using placeholder text");
        self.placeholder()
    }

    /// Text typed or pasted by the user, admitted per `policy`.
    pub fn user_text(&self, text: &str, policy: TextPolicy) -> LoadedText {
        match policy {
            TextPolicy::Strict => self.select(vec![Candidate::untitled(text)]),
            TextPolicy::Lenient => {
                let text = self.filter.filter_text(&nfc(text));
                if text.is_empty() {
                    warn!("user text has no typeable characters");
                    return self.placeholder();
                }
                LoadedText {
                    lines: segment(&text, self.max_line_length),
                    title: None,
                    placeholder: false,
                }
            }
        }
    }
}

fn nfc(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text)
        .into_owned()
}

/// What the loader thread should produce.
#[derive(Clone, Debug)]
pub enum LoadRequest {
    Wikipedia,
    File(PathBuf),
}

/// Resolve a request into lines. Every failure degrades to the placeholder.
pub fn load(request: &LoadRequest, pipeline: &TextPipeline, config: &Config) -> LoadedText {
    match request {
        LoadRequest::Wikipedia => {
            let source = WikipediaSource::new(
                config.locale,
                config.wikipedia_candidates,
                Duration::from_secs(config.fetch_timeout_secs),
            );
            match source.fetch() {
                Ok(candidates) => {
                    info!(count = candidates.len(), "wikipedia candidates fetched");
                    pipeline.select(candidates)
                }
                Err(err) => {
                    warn!(error = %err, "wikipedia fetch failed");
                    pipeline.placeholder()
                }
            }
        }
        LoadRequest::File(path) => {
            let source = FileSource { path: path.clone() };
            match source.fetch() {
                Ok(candidates) => candidates
                    .into_iter()
                    .next()
                    .map(|candidate| pipeline.user_text(&candidate.text, config.user_text_policy))
                    .unwrap_or_else(|| pipeline.placeholder()),
                Err(err) => {
                    warn!(error = %err, path = %path.display(), "could not read text file");
                    pipeline.placeholder()
                }
            }
        }
    }
}

/// Run `load` off the UI thread and post the outcome as an event carrying
/// `generation`, so the receiver can tell superseded loads apart.
pub fn spawn_loader(request: LoadRequest, config: Config, generation: u64, tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let pipeline = TextPipeline::from_config(&config);
        let text = load(&request, &pipeline, &config);
        // receiver gone means the app already quit
        let _ = tx.send(AppEvent::SequenceLoaded { generation, text });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(locale: Locale) -> TextPipeline {
        TextPipeline::new(locale, AcceptPolicy::new(10, 100), 12)
    }

    #[test]
    fn test_select_skips_rejected_candidates() {
        let candidates = vec![
            Candidate::untitled("too short"),
            Candidate {
                title: Some("Über|Title".to_string()),
                text: "Some typeable text here.".to_string(),
            },
        ];
        let loaded = pipeline(Locale::En).select(candidates);
        assert!(!loaded.placeholder);
        assert_eq!(loaded.title.as_deref(), Some("berTitle"));
        assert_eq!(loaded.lines[0], "berTitle\n");
        assert_eq!(loaded.lines[1..].concat(), "Some typeable text here.");
    }

    #[test]
    fn test_select_falls_back_to_placeholder() {
        let loaded = pipeline(Locale::En).select(vec![Candidate::untitled("ünïcödé text ok")]);
        assert!(loaded.placeholder);
        assert_eq!(loaded.lines.len(), 1);
        assert!(!loaded.lines[0].is_empty());
    }

    #[test]
    fn test_decomposed_umlauts_are_composed_before_validation() {
        let decomposed = "Gru\u{308}n und blau ist gut";
        let loaded = pipeline(Locale::De).select(vec![Candidate::untitled(decomposed)]);
        assert!(!loaded.placeholder);
        assert!(loaded.lines.concat().contains('ü'));
    }

    #[test]
    fn test_lenient_user_text_strips_and_keeps() {
        let loaded = pipeline(Locale::En).user_text("a|b", TextPolicy::Lenient);
        assert_eq!(loaded.lines, vec!["ab"]);
        assert!(!loaded.placeholder);
    }

    #[test]
    fn test_lenient_user_text_with_nothing_left() {
        let loaded = pipeline(Locale::En).user_text("|||", TextPolicy::Lenient);
        assert!(loaded.placeholder);
    }

    #[test]
    fn test_strict_user_text_uses_bounds() {
        let loaded = pipeline(Locale::En).user_text("short", TextPolicy::Strict);
        assert!(loaded.placeholder);
    }

    #[test]
    fn test_placeholder_is_localized() {
        let en = pipeline(Locale::En).placeholder();
        let de = pipeline(Locale::De).placeholder();
        assert_ne!(en.lines, de.lines);
    }

    #[test]
    fn test_file_request_reads_and_segments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.txt");
        fs::write(&path, "hello file").unwrap();
        let config = Config::default();
        let loaded = load(
            &LoadRequest::File(path),
            &pipeline(Locale::En),
            &config,
        );
        assert_eq!(loaded.lines, vec!["hello file"]);
    }

    #[test]
    fn test_missing_file_yields_placeholder() {
        let config = Config::default();
        let loaded = load(
            &LoadRequest::File(PathBuf::from("/nonexistent/keyline.txt")),
            &pipeline(Locale::En),
            &config,
        );
        assert!(loaded.placeholder);
    }
}
