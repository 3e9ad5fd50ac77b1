//! Signature extraction pipeline.
//!
//! Splits a plain-text body into the message and its trailing signature block:
//!
//! 1. Detect the line delimiter and trim the body.
//! 2. Cut off a phone-client footer ("Sent from my iPhone") found anywhere in the raw body.
//! 3. Mark the non-empty lines after the first one by shape and pick the candidate
//!    window at the tail of the message.
//! 4. Search the window for a sign-off phrase; the phrase line and everything after it
//!    is the signature.
//! 5. Append the phone footer, if any, to the signature.
//!
//! Internal faults never reach the caller as errors or panics: the result degrades to
//! the verbatim input with no signature, and the fault goes to the injected
//! [`Diagnostics`] sink.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use super::delimiter::{detect_delimiter, split_lines};
use super::phrases::{find_phone_footer, find_signoff};
use super::shape::{mark_candidates, marker_string};
use super::window::select_window;
use crate::config::ExtractorConfig;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::error::{ExtractError, checked_prefix};

/// A body split into message text and signature, both trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extracted {
    pub body: String,
    pub signature: Option<String>,
}

impl Extracted {
    fn new(body: &str, signature: Option<&str>) -> Self {
        Self {
            body: body.trim().to_string(),
            signature: signature.map(|s| s.trim().to_string()),
        }
    }
}

/// Result of a single extraction.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The pipeline ran to completion. `signature` is `None` when none was found.
    Extracted(Extracted),
    /// The pipeline hit an internal fault; `body` is the input, unchanged.
    Degraded { body: String, error: ExtractError },
}

impl Outcome {
    pub fn body(&self) -> &str {
        match self {
            Outcome::Extracted(extracted) => &extracted.body,
            Outcome::Degraded { body, .. } => body,
        }
    }

    pub fn signature(&self) -> Option<&str> {
        match self {
            Outcome::Extracted(extracted) => extracted.signature.as_deref(),
            Outcome::Degraded { .. } => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    /// Collapse into the `(body, signature)` pair.
    pub fn into_parts(self) -> (String, Option<String>) {
        match self {
            Outcome::Extracted(Extracted { body, signature }) => (body, signature),
            Outcome::Degraded { body, .. } => (body, None),
        }
    }
}

/// Splits message bodies into text and signature.
///
/// Holds no per-call state; a single extractor can be shared across threads.
#[derive(Clone)]
pub struct SignatureExtractor {
    config: ExtractorConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for SignatureExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl std::fmt::Debug for SignatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureExtractor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SignatureExtractor {
    /// Create an extractor that reports failures through `log`.
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            diagnostics: Arc::new(LogDiagnostics),
        }
    }

    /// Replace the failure sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the signature from `body`.
    ///
    /// ```rust
    /// use sigstrip::SignatureExtractor;
    ///
    /// let outcome = SignatureExtractor::default().extract("Hey man! How r u?\n\n--\nRegards,\nRoman");
    /// assert_eq!(outcome.body(), "Hey man! How r u?");
    /// assert_eq!(outcome.signature(), Some("--\nRegards,\nRoman"));
    /// ```
    pub fn extract(&self, body: &str) -> Outcome {
        self.finish(body, self.try_extract(body))
    }

    /// Extract signatures from many bodies in parallel, preserving input order.
    pub fn extract_batch<S>(&self, bodies: &[S]) -> Vec<Outcome>
    where
        S: AsRef<str> + Sync,
    {
        bodies
            .par_iter()
            .map(|body| self.extract(body.as_ref()))
            .collect()
    }

    fn finish(&self, body: &str, result: Result<Extracted, ExtractError>) -> Outcome {
        match result {
            Ok(extracted) => Outcome::Extracted(extracted),
            Err(error) => {
                self.diagnostics.extraction_failed(body, &error);
                Outcome::Degraded {
                    body: body.to_string(),
                    error,
                }
            }
        }
    }

    fn try_extract(&self, body: &str) -> Result<Extracted, ExtractError> {
        let delimiter = detect_delimiter(body);
        let delim = delimiter.as_str();

        let stripped = body.trim();
        let leading = body.len() - body.trim_start().len();

        // Phone footers are searched in the raw body; map the offset into `stripped`.
        let (working, phone_footer) = match find_phone_footer(body)? {
            Some(footer) => {
                let cut = footer
                    .start()
                    .checked_sub(leading)
                    .ok_or(ExtractError::OffsetOutOfRange {
                        offset: footer.start(),
                        len: leading,
                    })?;
                (checked_prefix(stripped, cut)?, Some(footer.as_str()))
            }
            None => (stripped, None),
        };

        let lines = split_lines(working, delimiter);
        let Some(first) = signature_candidate(&lines, &self.config) else {
            return Ok(Extracted::new(working, phone_footer));
        };

        let candidate = lines[first..].join(delim);
        let Some(signoff) = find_signoff(&candidate)? else {
            log::trace!("no sign-off phrase in candidate starting at line {}", first);
            return Ok(Extracted::new(working, phone_footer));
        };

        // Splitting can drop a trailing empty line, so cut from the same join that
        // produced the candidate rather than from `working`.
        let rejoined = lines.join(delim);
        let signature = signoff.as_str();
        let cut = rejoined
            .len()
            .checked_sub(signature.len())
            .ok_or(ExtractError::OffsetOutOfRange {
                offset: signature.len(),
                len: rejoined.len(),
            })?;
        let cleaned = checked_prefix(&rejoined, cut)?;

        let signature = match phone_footer {
            Some(footer) => [signature, footer].join(delim),
            None => signature.to_string(),
        };

        Ok(Extracted::new(cleaned, Some(signature.as_str())))
    }
}

/// Index of the first line that may belong to the signature, if any.
///
/// Candidates are the non-empty lines after the first one. A message with fewer than
/// two non-empty lines has no candidate. Once the window start is known, every line
/// from there to the end belongs to the candidate block.
pub fn signature_candidate(lines: &[&str], config: &ExtractorConfig) -> Option<usize> {
    let non_empty: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, _)| idx)
        .collect();

    if non_empty.len() <= 1 {
        return None;
    }

    let mut candidate: Vec<usize> = non_empty.into_iter().filter(|&idx| idx > 0).collect();
    if let Some(limit) = config.max_signature_lines {
        let excess = candidate.len().saturating_sub(limit);
        candidate.drain(..excess);
    }

    let markers = mark_candidates(lines, &candidate, config.too_long_line);
    log::trace!("candidate markers: {}", marker_string(&markers));

    let window = select_window(&markers)?;
    candidate.get(window.start).copied()
}

/// Split `body` into `(text, signature)` with the default configuration.
///
/// ```rust
/// use sigstrip::extract_signature;
///
/// assert_eq!(extract_signature("Hey man!"), ("Hey man!".to_string(), None));
/// ```
pub fn extract_signature(body: &str) -> (String, Option<String>) {
    SignatureExtractor::default().extract(body).into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        failures: Mutex<Vec<String>>,
    }

    impl Diagnostics for Recorder {
        fn extraction_failed(&self, body: &str, error: &ExtractError) {
            self.failures
                .lock()
                .unwrap()
                .push(format!("{}: {}", body, error));
        }
    }

    #[test]
    fn test_candidate_requires_two_non_empty_lines() {
        let config = ExtractorConfig::default();
        assert_eq!(signature_candidate(&["Hello", "", "  "], &config), None);
        assert_eq!(signature_candidate(&[], &config), None);
    }

    #[test]
    fn test_candidate_never_starts_at_first_line() {
        let config = ExtractorConfig::default();
        assert_eq!(signature_candidate(&["Thanks", "Bob"], &config), Some(1));
    }

    #[test]
    fn test_candidate_skips_leading_long_lines() {
        let config = ExtractorConfig::default();
        let long = "x".repeat(80);
        let lines = ["Hi", long.as_str(), "", "Thanks,", "Bob"];
        assert_eq!(signature_candidate(&lines, &config), Some(3));
    }

    #[test]
    fn test_candidate_respects_line_cap() {
        let lines = ["Hi", "a", "b", "c", "d"];
        let config = ExtractorConfig::default().with_max_signature_lines(Some(2));
        assert_eq!(signature_candidate(&lines, &config), Some(3));
    }

    #[test]
    fn test_success_does_not_report() {
        let recorder = Arc::new(Recorder::default());
        let extractor = SignatureExtractor::default().with_diagnostics(recorder.clone());

        let outcome = extractor.extract("Hello\n\nThanks,\nBob");
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.signature(), Some("Thanks,\nBob"));
        assert!(recorder.failures.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failure_degrades_to_input() {
        let recorder = Arc::new(Recorder::default());
        let extractor = SignatureExtractor::default().with_diagnostics(recorder.clone());

        let body = "  Hello\n\nThanks,\nBob  ";
        let outcome = extractor.finish(body, Err(ExtractError::NotCharBoundary { offset: 3 }));

        assert!(outcome.is_degraded());
        assert_eq!(outcome.body(), body);
        assert_eq!(outcome.signature(), None);
        assert_eq!(recorder.failures.lock().unwrap().len(), 1);
        assert_eq!(outcome.into_parts(), (body.to_string(), None));
    }
}
