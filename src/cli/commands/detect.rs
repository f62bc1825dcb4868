//! Detect command implementation

use crate::config::TriagemConfig;
use crate::detection::HybridDetector;
use clap::Args;

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Text record to classify
    pub text: String,

    /// Confidence threshold for the statistical layer
    #[arg(short, long)]
    pub threshold: Option<f64>,
}

impl DetectArgs {
    /// Execute the detect command
    pub fn execute(&self, config: &TriagemConfig) -> anyhow::Result<i32> {
        let threshold = self.threshold.unwrap_or(config.default_threshold);
        let detector = HybridDetector::new(config)?;

        let result = detector.detect(&self.text, threshold);
        println!("{}", serde_json::to_string_pretty(&result)?);

        Ok(0)
    }
}
