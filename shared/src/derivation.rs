//! Batch derivation engine
//!
//! Pure projections from the collection list and the per-batch processing
//! steps into the two batch views. A batch id lands in exactly one of them
//! at a time, or neither: it is processed once it has any custom step, and
//! active while it has none and its collection is Synced or Verified.
//! Output order always follows the collection list.

use crate::models::{
    ActiveBatch, Batch, BatchDetails, BatchStep, Collection, ProcessedBatch, ProcessingStep,
    StepStatus,
};
use crate::repository::StepsByBatch;

/// Number of fixed steps every batch timeline starts with
pub const DEFAULT_STEP_COUNT: usize = 2;

/// The fixed steps implied by a submission having been collected and checked
pub fn default_steps(collection: &Collection) -> Vec<BatchStep> {
    let date = collection.submission_date();
    ["Harvest Collection", "Quality Verification"]
        .into_iter()
        .map(|step| BatchStep {
            step: step.to_string(),
            status: StepStatus::Completed,
            date,
            duration: None,
            temperature: None,
            notes: None,
        })
        .collect()
}

fn details(collection: &Collection, processing_steps: Vec<BatchStep>) -> BatchDetails {
    BatchDetails {
        id: collection.id.clone(),
        batch_id: collection.batch_id.clone(),
        herb: collection.herb.clone(),
        species_name: collection.species_name().to_string(),
        farmer: collection.farmer.clone(),
        collector_id: collection.collector_id.clone(),
        quantity: collection.quantity.clone(),
        location: collection.location.clone(),
        harvest_date: collection.submission_date(),
        status: collection.status,
        quality_grade: collection.quality_grade.clone(),
        quality_score: collection.quality_grade.score(),
        processing_steps,
    }
}

fn has_custom_steps(steps: &StepsByBatch, batch_id: &str) -> bool {
    steps.get(batch_id).is_some_and(|s| !s.is_empty())
}

/// Completion percentage over the default plus custom steps, clamped to 0..=100
pub fn progress(completed_custom: usize, total_custom: usize) -> u8 {
    let done = (DEFAULT_STEP_COUNT + completed_custom) as f64;
    let total = (DEFAULT_STEP_COUNT + total_custom) as f64;
    (100.0 * done / total).round().clamp(0.0, 100.0) as u8
}

/// Synced or verified collections without custom processing steps
pub fn active_batches(collections: &[Collection], steps: &StepsByBatch) -> Vec<ActiveBatch> {
    collections
        .iter()
        .filter(|c| c.status.is_batch_ready() && !has_custom_steps(steps, &c.batch_id))
        .map(|c| ActiveBatch {
            details: details(c, default_steps(c)),
        })
        .collect()
}

fn processed(collection: &Collection, custom: &[ProcessingStep]) -> ProcessedBatch {
    let completed = custom.iter().filter(|s| s.is_completed()).count();
    let mut timeline = default_steps(collection);
    timeline.extend(custom.iter().map(BatchStep::from));

    ProcessedBatch {
        details: details(collection, timeline),
        progress: progress(completed, custom.len()),
        custom_step_count: custom.len(),
        last_processed: custom.iter().map(|s| s.timestamp).max(),
    }
}

/// Collections with at least one custom processing step
pub fn processed_batches(collections: &[Collection], steps: &StepsByBatch) -> Vec<ProcessedBatch> {
    collections
        .iter()
        .filter_map(|c| {
            steps
                .get(&c.batch_id)
                .filter(|custom| !custom.is_empty())
                .map(|custom| processed(c, custom))
        })
        .collect()
}

/// Look a batch up in the active view, then the processed view
pub fn find_batch(collections: &[Collection], steps: &StepsByBatch, batch_id: &str) -> Option<Batch> {
    let collection = collections.iter().find(|c| c.batch_id == batch_id)?;
    match steps.get(batch_id).filter(|custom| !custom.is_empty()) {
        Some(custom) => Some(Batch::Processed(processed(collection, custom))),
        None if collection.status.is_batch_ready() => Some(Batch::Active(ActiveBatch {
            details: details(collection, default_steps(collection)),
        })),
        None => None,
    }
}
