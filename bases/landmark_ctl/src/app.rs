use std::path::Path;

use color_eyre::Result;
use landmark_fingerprint::{FingerprintExtractor, WindowedPairExtractor};
use landmark_matcher::{align_when_finalized, recording};
use spectral_primitives::{AnalysisConfig, EventPoint, SampleRate, StepSize};

use crate::args::{Args, Command};
use crate::output::OutputHandler;

pub struct App {
    args: Args,
    output: OutputHandler,
}

impl App {
    pub fn new(args: Args) -> Self {
        let output = OutputHandler::new(args.verbose);
        Self { args, output }
    }

    pub async fn run(&self) -> Result<()> {
        match &self.args.command {
            Command::Fingerprint { events, fan_out } => self.run_fingerprint(events, *fan_out),
            Command::Align {
                reference,
                query,
                sample_rate,
                step_size,
                fan_out,
            } => {
                self.run_align(reference, query, *sample_rate, *step_size, *fan_out)
                    .await
            }
        }
    }

    fn run_fingerprint(&self, events: &Path, fan_out: usize) -> Result<()> {
        let events = read_event_points(events)?;
        let fingerprints = WindowedPairExtractor::new(fan_out).extract(&events);
        self.output.print_fingerprints(&fingerprints);
        Ok(())
    }

    async fn run_align(
        &self,
        reference: &Path,
        query: &Path,
        sample_rate: u32,
        step_size: u32,
        fan_out: usize,
    ) -> Result<()> {
        let config = AnalysisConfig::new(SampleRate::new(sample_rate)?, StepSize::new(step_size)?);

        let reference_events = read_event_points(reference)?;
        let query_events = read_event_points(query)?;

        let (mut reference_sink, reference_handle) = recording();
        let (mut query_sink, query_handle) = recording();

        // One producer task per recording, each finalizing at end-of-stream
        tokio::spawn(async move {
            let extractor = WindowedPairExtractor::new(fan_out);
            reference_sink.extend(extractor.extract(&reference_events));
            reference_sink.finalize();
        });
        tokio::spawn(async move {
            let extractor = WindowedPairExtractor::new(fan_out);
            query_sink.extend(extractor.extract(&query_events));
            query_sink.finalize();
        });

        let outcome = align_when_finalized(reference_handle, query_handle, &config).await?;
        self.output.print_outcome(&outcome);
        Ok(())
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}

fn read_event_points(path: &Path) -> Result<Vec<EventPoint>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
