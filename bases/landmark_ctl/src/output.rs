use landmark_fingerprint::Fingerprint;
use landmark_matcher::MatchOutcome;

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_fingerprints(&self, fingerprints: &[Fingerprint]) {
        for print in fingerprints {
            println!("{print}");
        }

        if self.verbose {
            println!("{} fingerprints", fingerprints.len());
        }
    }

    pub fn print_outcome(&self, outcome: &MatchOutcome) {
        match &outcome.offset {
            Some(estimate) => println!(
                "Offset: {:.3} seconds ({} frames, {} aligned fingerprints)",
                estimate.seconds, estimate.frames, estimate.votes
            ),
            None => println!("No alignment found"),
        }

        if self.verbose {
            for print in &outcome.matched {
                println!("matched {print}");
            }
        }
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}
