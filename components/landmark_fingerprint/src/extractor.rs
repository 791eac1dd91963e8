use spectral_primitives::EventPoint;

use crate::Fingerprint;

/// Turns one recording's ordered event point stream into its ordered
/// fingerprint sequence.
///
/// Implementations decide which points get paired. The matching engine only
/// relies on receiving a finite, ordered collection of forward-in-time
/// fingerprints per recording.
pub trait FingerprintExtractor {
    fn extract(&self, events: &[EventPoint]) -> Vec<Fingerprint>;
}

/// Pairs every event point with a bounded number of the points that follow
/// it in the stream.
#[derive(Debug, Clone, Copy)]
pub struct WindowedPairExtractor {
    fan_out: usize,
}

impl WindowedPairExtractor {
    pub const DEFAULT_FAN_OUT: usize = 3;

    pub fn new(fan_out: usize) -> Self {
        Self { fan_out }
    }
}

impl Default for WindowedPairExtractor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAN_OUT)
    }
}

impl FingerprintExtractor for WindowedPairExtractor {
    fn extract(&self, events: &[EventPoint]) -> Vec<Fingerprint> {
        let mut fingerprints = Vec::new();
        for (index, anchor) in events.iter().enumerate() {
            for target in events.iter().skip(index + 1).take(self.fan_out) {
                // Co-temporal peaks cannot form a landmark; construction
                // refuses them and the pair is skipped
                if let Ok(print) = Fingerprint::from_event_points(*anchor, *target) {
                    fingerprints.push(print);
                }
            }
        }
        fingerprints
    }
}
