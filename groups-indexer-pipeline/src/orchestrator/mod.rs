//! Orchestrator module for the groups indexer pipeline.
//!
//! Coordinates the source, processor, asset migrator, and sink for one full
//! synchronization pass.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::assets::{AssetMigrator, ImageOutcome};
use crate::errors::PipelineError;
use crate::loader::GroupSink;
use crate::processor::{GroupProcessor, ProcessedGroup, SkipReason};
use groups_indexer_repository::{GroupProfilesRequest, GroupSource};

/// Token reported to the scheduler when a run succeeds.
pub const COMPLETION_TOKEN: &str = "ok";

/// What happened to a single group during a run.
#[derive(Debug)]
pub enum ItemOutcome {
    /// The group was written to the sink.
    Indexed { group_id: i64, image: ImageOutcome },
    /// The group was left out.
    Skipped { group_id: i64, reason: SkipReason },
}

/// Result of a successful run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Groups returned by the source.
    pub fetched: usize,
    /// Groups written to the sink.
    pub processed: usize,
    /// Groups left out by the inclusion filter.
    pub skipped: usize,
    /// Per-group outcomes in source order.
    pub outcomes: Vec<ItemOutcome>,
}

impl RunSummary {
    /// Number of groups indexed without their image.
    pub fn image_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| {
                matches!(outcome, ItemOutcome::Indexed { image, .. } if image.is_failure())
            })
            .count()
    }

    /// Fixed token reported for a successful run.
    pub fn completion_token(&self) -> &'static str {
        COMPLETION_TOKEN
    }
}

/// Runs a synchronization pass from the source into a sink.
///
/// Groups are handled one at a time. An image failure only affects its own
/// group; every other error aborts the run.
pub struct SyncOrchestrator {
    source: Arc<dyn GroupSource>,
    processor: GroupProcessor,
    migrator: AssetMigrator,
    sink: Arc<dyn GroupSink>,
}

impl SyncOrchestrator {
    pub fn new(
        source: Arc<dyn GroupSource>,
        processor: GroupProcessor,
        migrator: AssetMigrator,
        sink: Arc<dyn GroupSink>,
    ) -> Self {
        Self {
            source,
            processor,
            migrator,
            sink,
        }
    }

    /// Run one full pass.
    ///
    /// # Returns
    ///
    /// * `Ok(summary)` - Every included group was written to the sink
    /// * `Err(e)` - The source could not be read or the sink write failed
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        info!("Starting groups sync");

        self.sink.prepare().await?;

        let request = GroupProfilesRequest::new()
            .with_include_image_url(true)
            .with_include_participants(false);
        let profiles = self.source.get_group_profiles(&request).await?;

        let mut summary = RunSummary {
            fetched: profiles.len(),
            outcomes: Vec::with_capacity(profiles.len()),
            ..Default::default()
        };
        let mut documents = Vec::new();

        for profile in &profiles {
            match self.processor.process(profile) {
                ProcessedGroup::Include(mut doc) => {
                    let image = self
                        .migrator
                        .migrate(profile.id, profile.image_url.as_deref())
                        .await;
                    doc.image_url = image.reference().map(str::to_string);

                    documents.push(doc);
                    summary.processed += 1;
                    summary.outcomes.push(ItemOutcome::Indexed {
                        group_id: profile.id,
                        image,
                    });
                }
                ProcessedGroup::Skip(reason) => {
                    summary.skipped += 1;
                    summary.outcomes.push(ItemOutcome::Skipped {
                        group_id: profile.id,
                        reason,
                    });
                }
            }
        }

        self.sink.write(documents).await?;

        info!(
            processed = summary.processed,
            skipped = summary.skipped,
            image_failures = summary.image_failures(),
            "Groups sync complete"
        );
        info!("Got {} groups", summary.fetched);

        Ok(summary)
    }
}
