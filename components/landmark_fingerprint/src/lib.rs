mod error;
mod extractor;
mod fingerprint;

pub use error::FingerprintError;
pub use extractor::{FingerprintExtractor, WindowedPairExtractor};
pub use fingerprint::{reverse_hash, Fingerprint, HashParts, SAME_EVENT_FRAME_TOLERANCE};
