mod matcher;
mod pipeline;

pub use matcher::{filter_by_known_prints, match_recordings, MatchOutcome, OffsetEstimate};
pub use pipeline::{
    align_when_finalized, recording, FinalizedHandle, PipelineError, RecordingSink,
};
