//! Evaluate command implementation

use crate::config::TriagemConfig;
use crate::corpus;
use crate::detection::HybridDetector;
use crate::evaluation::{evaluate, EvaluationMode};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the evaluate command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Path to the labeled CSV dataset
    #[arg(short, long, default_value = "ml/dataset.csv")]
    pub dataset: String,

    /// Evaluate the rule layer alone, without the statistical fallback
    #[arg(long)]
    pub rule_only: bool,

    /// Confidence threshold for the statistical layer
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Write the full JSON report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl EvaluateArgs {
    /// Execute the evaluate command
    pub fn execute(&self, config: &TriagemConfig) -> anyhow::Result<i32> {
        let threshold = self.threshold.unwrap_or(config.default_threshold);
        tracing::info!(
            dataset = %self.dataset,
            rule_only = self.rule_only,
            threshold,
            "Evaluating detector"
        );

        let examples = match corpus::load_csv(&self.dataset) {
            Ok(examples) => examples,
            Err(e) => {
                println!("❌ Failed to load dataset");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let detector = HybridDetector::new(config)?;
        let mode = if self.rule_only {
            EvaluationMode::RuleOnly
        } else {
            EvaluationMode::Hybrid { threshold }
        };

        let report = evaluate(&detector, &examples, mode);
        println!("{}", report.format_console());

        if let Some(ref output) = self.output {
            report.write_to_file(output)?;
            println!("✅ Full report written to: {}", output.display());
        }

        Ok(0)
    }
}
