use clap::{Parser, Subcommand};
use landmark_fingerprint::WindowedPairExtractor;
use spectral_primitives::{SampleRate, StepSize};
use std::path::PathBuf;

/// Inspect landmark fingerprints and align recordings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the fingerprints extracted from an event point file
    Fingerprint {
        /// JSON file holding the recording's event points
        events: PathBuf,

        /// How many later points each anchor is paired with
        #[arg(long, default_value_t = WindowedPairExtractor::DEFAULT_FAN_OUT)]
        fan_out: usize,
    },

    /// Align a query recording against a reference recording
    Align {
        /// JSON file holding the reference recording's event points
        #[arg(long)]
        reference: PathBuf,

        /// JSON file holding the query recording's event points
        #[arg(long)]
        query: PathBuf,

        /// Sample rate of the upstream analysis in Hz
        #[arg(long, default_value_t = SampleRate::DEFAULT.raw())]
        sample_rate: u32,

        /// Hop size of the upstream analysis in samples
        #[arg(long, default_value_t = StepSize::DEFAULT.raw())]
        step_size: u32,

        /// How many later points each anchor is paired with
        #[arg(long, default_value_t = WindowedPairExtractor::DEFAULT_FAN_OUT)]
        fan_out: usize,
    },
}
