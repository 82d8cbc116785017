//! Pipeline error taxonomy.
//!
//! Only two classes surface as `Err` values. `MalformedRecord` is produced
//! by supplier adapters and consumed inside batch normalization (skip, log,
//! continue); `UnknownSupplier` indicates a wiring bug and is the one fatal
//! class (it propagates, and the run carries no partial-result guarantee).
//! Missing fields are always recovered by defaulting, and empty input yields
//! an empty catalog, so neither appears here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A single raw record could not be normalized. Never aborts a batch.
    #[error("malformed record from supplier '{supplier}': {reason}")]
    MalformedRecord { supplier: String, reason: String },

    /// No adapter is registered for a supplier named in the input.
    #[error("no adapter registered for supplier '{0}'")]
    UnknownSupplier(String),
}

impl PipelineError {
    pub fn malformed(supplier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            supplier: supplier.into(),
            reason: reason.into(),
        }
    }
}
