use crate::error::ExtractError;

/// Receives reports about extractions that fell back to the untouched body.
///
/// Only the failure path reports; successful extractions, with or without a
/// signature, never reach the sink.
pub trait Diagnostics: Send + Sync {
    fn extraction_failed(&self, body: &str, error: &ExtractError);
}

/// Forwards failures to the `log` facade at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn extraction_failed(&self, body: &str, error: &ExtractError) {
        log::error!(
            "signature extraction failed for {}-byte body ({} lines), returning it unchanged: {}",
            body.len(),
            body.lines().count(),
            error
        );
    }
}
