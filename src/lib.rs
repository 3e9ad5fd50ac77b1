//! Detect and remove trailing signature blocks from plain-text email bodies.
//!
//! Sign-offs ("Regards,", "Mit freundlichen Grüßen"), dash separators and phone-client
//! footers ("Sent from my iPhone") are split off the message and returned separately.
//!
//! ```rust
//! use sigstrip::extract_signature;
//!
//! let (body, signature) = extract_signature("Meeting at 3pm.\n\nSent from my iPhone");
//! assert_eq!(body, "Meeting at 3pm.");
//! assert_eq!(signature.as_deref(), Some("Sent from my iPhone"));
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod message;
pub mod signature;

pub use config::ExtractorConfig;
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use error::{ExtractError, InputError};
pub use signature::{Extracted, Outcome, SignatureExtractor, extract_signature};
