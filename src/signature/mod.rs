//! Signature block detection for plain-text email bodies.

pub mod delimiter;
pub mod extractor;
pub mod phrases;
pub mod shape;
pub mod window;

pub use delimiter::{Delimiter, detect_delimiter, detect_delimiter_bytes};
pub use extractor::{Extracted, Outcome, SignatureExtractor, extract_signature, signature_candidate};
pub use phrases::{PhraseMatch, PhraseSet, find_phone_footer, find_signoff};
pub use shape::{LineShape, classify};
pub use window::select_window;
