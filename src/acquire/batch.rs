//! Batch orchestration over a list of topics

use crate::acquire::{Acquirer, Source};
use crate::model::BatchSummary;
use crate::HarvestError;

impl Acquirer {
    /// Runs a search-backed pipeline for each topic, strictly in input order
    ///
    /// Topics are processed one after another to bound load on the search
    /// endpoint; total latency is the sum of the per-topic runs. A failed topic
    /// is recorded in the summary and does not stop the batch.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchSummary)` - One result per topic
    /// * `Err(HarvestError::Validation)` - The topic list was empty; nothing was run
    pub async fn run_batch(&self, topics: &[String]) -> Result<BatchSummary, HarvestError> {
        if topics.is_empty() {
            return Err(HarvestError::Validation(
                "Topics list is required and must be a non-empty array".to_string(),
            ));
        }

        tracing::info!("Starting batch of {} topics", topics.len());

        let mut results = Vec::with_capacity(topics.len());
        for (index, topic) in topics.iter().enumerate() {
            tracing::info!("Batch topic {}/{}: \"{}\"", index + 1, topics.len(), topic);
            results.push(
                self.acquire_documents(topic, Source::SearchProviderLookup)
                    .await,
            );
        }

        let summary = BatchSummary::from_results(results);
        tracing::info!("{}", summary.message);
        Ok(summary)
    }
}
