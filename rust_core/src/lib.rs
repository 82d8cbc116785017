//! Matchday reconciliation core.
//!
//! Takes raw match listings from multiple stream suppliers and produces
//! one deduplicated catalog: supplier feeds are normalized through
//! per-supplier adapters, classified by sport, clustered by fingerprint
//! and similarity, and merged into canonical records with their streams
//! unioned across sources.
//!
//! The pipeline is synchronous and clock-injectable; callers that need a
//! deterministic run pass their own `now` to [`ReconciliationPipeline::run_at`].

pub mod catalog;
pub mod classify;
pub mod competitors;
pub mod error;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod policy;
pub mod similarity;

pub use catalog::{assemble, assemble_at};
pub use classify::SportClassifier;
pub use competitors::extract_competitors;
pub use error::PipelineError;
pub use merge::cluster_and_merge;
pub use models::{
    CanonicalMatch, Catalog, CatalogSummary, Competitors, NormalizedMatch, SupplierBatch,
};
pub use normalize::{AdapterRegistry, SupplierAdapter};
pub use policy::{MergePolicies, MergePolicy};
pub use similarity::{fingerprint, similarity, MatchProfile};

use chrono::{DateTime, Utc};
use tracing::info;

pub mod telemetry {
    use tracing_subscriber::EnvFilter;

    /// Install the global tracing subscriber. Safe to call more than
    /// once; later calls are no-ops.
    pub fn init() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }
}

/// End-to-end driver: normalize, classify, cluster, assemble.
pub struct ReconciliationPipeline {
    classifier: SportClassifier,
    registry: AdapterRegistry,
    policies: MergePolicies,
}

impl ReconciliationPipeline {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            classifier: SportClassifier::new(),
            registry,
            policies: MergePolicies::default(),
        }
    }

    pub fn with_parts(
        registry: AdapterRegistry,
        classifier: SportClassifier,
        policies: MergePolicies,
    ) -> Self {
        Self {
            classifier,
            registry,
            policies,
        }
    }

    pub fn run(&self, batches: &[SupplierBatch]) -> Result<Catalog, PipelineError> {
        self.run_at(batches, Utc::now())
    }

    /// Run against an explicit clock. Two runs over the same batches
    /// with the same `now` produce identical catalogs.
    pub fn run_at(
        &self,
        batches: &[SupplierBatch],
        now: DateTime<Utc>,
    ) -> Result<Catalog, PipelineError> {
        let mut normalized = Vec::new();
        for batch in batches {
            let adapter = self
                .registry
                .get(&batch.supplier)
                .ok_or_else(|| PipelineError::UnknownSupplier(batch.supplier.clone()))?;
            let mut records =
                normalize::normalize_batch(adapter, &self.classifier, batch, now);
            normalized.append(&mut records);
        }

        let canonical = cluster_and_merge(&normalized, &self.policies);
        info!(
            input = normalized.len(),
            output = canonical.len(),
            "reconciliation run complete"
        );
        Ok(assemble_at(canonical, now))
    }
}
