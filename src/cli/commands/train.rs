//! Train command implementation

use crate::classifier::{train, ModelStore};
use crate::config::TriagemConfig;
use crate::corpus;
use clap::Args;

/// Arguments for the train command
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the labeled CSV dataset
    #[arg(short, long, default_value = "ml/dataset.csv")]
    pub dataset: String,
}

impl TrainArgs {
    /// Execute the train command
    pub fn execute(&self, config: &TriagemConfig) -> anyhow::Result<i32> {
        tracing::info!(dataset = %self.dataset, "Training classifier");

        println!("🧠 Training classifier from: {}", self.dataset);
        println!();

        let examples = match corpus::load_csv(&self.dataset) {
            Ok(examples) => examples,
            Err(e) => {
                println!("❌ Failed to load dataset");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let (texts, labels) = corpus::into_training_pairs(&examples);
        println!(
            "✅ Dataset loaded: {} records ({} labeled)",
            examples.len(),
            texts.len()
        );

        let store = ModelStore::new(&config.model_dir);
        let summary = match train(&texts, &labels, &store) {
            Ok(summary) => summary,
            Err(e) => {
                println!("❌ Training failed");
                println!("   Error: {e}");
                return Ok(1);
            }
        };

        println!();
        println!("Training Summary:");
        println!("  Documents:     {}", summary.n_documents);
        println!("  Features:      {}", summary.n_features);
        println!(
            "  CV F1 (5-fold): {:.4} (+/- {:.4})",
            summary.cv_f1_mean, summary.cv_f1_std
        );
        println!("  Model dir:     {}", config.model_dir.display());
        println!();
        println!("✅ Model artifacts saved");

        Ok(0)
    }
}
