use thiserror::Error;

#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Fingerprint must link an earlier event to a later one (t1={t1}, t2={t2})")]
    InvalidTimeOrder { t1: u32, t2: u32 },
}
