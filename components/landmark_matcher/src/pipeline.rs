use landmark_fingerprint::Fingerprint;
use spectral_primitives::AnalysisConfig;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

use crate::{match_recordings, MatchOutcome};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Recording was dropped before its fingerprint collection was finalized")]
    RecordingAbandoned,
}

/// Producer end of one recording's fingerprint collection.
///
/// The upstream worker pushes prints while it drives the spectral stream
/// and calls [`finalize`](RecordingSink::finalize) at end-of-stream.
/// Finalizing consumes the sink, so a collection can never be observed
/// half-built.
pub struct RecordingSink {
    fingerprints: Vec<Fingerprint>,
    notify: oneshot::Sender<Vec<Fingerprint>>,
}

impl RecordingSink {
    pub fn push(&mut self, print: Fingerprint) {
        self.fingerprints.push(print);
    }

    pub fn extend<I>(&mut self, prints: I)
    where
        I: IntoIterator<Item = Fingerprint>,
    {
        self.fingerprints.extend(prints);
    }

    /// Fire the completion notification with the finished collection.
    pub fn finalize(self) {
        debug!(
            "Finalized recording with {} fingerprints",
            self.fingerprints.len()
        );
        // Nobody left to notify is fine; the collection just goes unused
        let _ = self.notify.send(self.fingerprints);
    }
}

/// Consumer end: resolves once the recording's collection is finalized.
pub struct FinalizedHandle {
    notified: oneshot::Receiver<Vec<Fingerprint>>,
}

impl FinalizedHandle {
    pub async fn wait(self) -> Result<Vec<Fingerprint>, PipelineError> {
        self.notified
            .await
            .map_err(|_| PipelineError::RecordingAbandoned)
    }
}

/// Create the producer/consumer pair for one recording.
pub fn recording() -> (RecordingSink, FinalizedHandle) {
    let (notify, notified) = oneshot::channel();
    (
        RecordingSink {
            fingerprints: Vec::new(),
            notify,
        },
        FinalizedHandle { notified },
    )
}

/// Run the matcher once both recordings are finalized.
///
/// The reference is awaited before the query (the query's match pass
/// depends on the reference being ready, not the other way around), and
/// matching runs synchronously after that. No timeout or cancellation
/// semantics exist at this layer; upstream owns those.
pub async fn align_when_finalized(
    reference: FinalizedHandle,
    query: FinalizedHandle,
    config: &AnalysisConfig,
) -> Result<MatchOutcome, PipelineError> {
    let reference = reference.wait().await?;
    let query = query.wait().await?;
    Ok(match_recordings(&reference, &query, config))
}
