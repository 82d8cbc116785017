// Shared models for the Matchday reconciliation pipeline
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Streams keyed by supplier name, each an ordered list of stream URLs.
///
/// A `BTreeMap` keeps serialization order deterministic, which the
/// idempotence contract depends on (same input, byte-identical output).
pub type StreamsBySource = BTreeMap<String, Vec<String>>;

// ============================================================================
// Input
// ============================================================================

/// A snapshot of raw records from one supplier, as delivered by the
/// (out-of-scope) fetch layer. Records keep their supplier-native JSON shape
/// until a `SupplierAdapter` normalizes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierBatch {
    /// Supplier identifier, e.g. "alpha-streams".
    pub supplier: String,
    /// Supplier-native records. Never mutated by the pipeline.
    pub records: Vec<serde_json::Value>,
}

impl SupplierBatch {
    pub fn new(supplier: impl Into<String>, records: Vec<serde_json::Value>) -> Self {
        Self {
            supplier: supplier.into(),
            records,
        }
    }
}

// ============================================================================
// Normalized per-source record
// ============================================================================

/// Canonical per-source unit produced by the normalizer.
///
/// Created once per raw record and read-only afterward; only a cluster's
/// base record has its `streams_by_source` extended during merging, never
/// its identity fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMatch {
    /// Originating supplier name.
    pub source: String,
    /// Competitor names joined by the canonical " vs " separator.
    pub match_title: String,
    /// Canonical sport name, or "Other".
    pub sport: String,
    /// Tournament / league text, may be empty.
    pub tournament: String,
    /// Unix seconds. Always present: repaired or defaulted when the supplier
    /// omits it, flagged via the quality score when implausible.
    pub unix_timestamp: i64,
    /// Stream URLs namespaced under this record's supplier key.
    pub streams_by_source: StreamsBySource,
    /// 0-100 heuristic completeness score.
    pub quality_score: u8,
}

impl NormalizedMatch {
    /// Total number of stream URLs across all supplier keys.
    pub fn stream_count(&self) -> usize {
        self.streams_by_source.values().map(Vec::len).sum()
    }
}

// ============================================================================
// Competitors
// ============================================================================

/// Which extraction strategy produced a competitor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorPattern {
    TennisSingles,
    TennisDoubles,
    TennisAbbreviated,
    SeparatorSplit,
    Unknown,
}

impl CompetitorPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitorPattern::TennisSingles => "tennis_singles",
            CompetitorPattern::TennisDoubles => "tennis_doubles",
            CompetitorPattern::TennisAbbreviated => "tennis_abbreviated",
            CompetitorPattern::SeparatorSplit => "separator_split",
            CompetitorPattern::Unknown => "unknown",
        }
    }
}

/// Competitor pair derived from a normalized match title. Consumed by the
/// similarity engine only; not persisted in pipeline output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competitors {
    pub competitor1: String,
    pub competitor2: String,
    pub pattern_used: CompetitorPattern,
}

impl Competitors {
    /// Whether extraction found two sides. A single-competitor result is the
    /// graceful-degradation path, not an error.
    pub fn is_pair(&self) -> bool {
        !self.competitor2.is_empty()
    }
}

// ============================================================================
// Canonical output
// ============================================================================

/// One canonical record per cluster. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMatch {
    pub match_title: String,
    pub sport: String,
    pub tournament: String,
    pub unix_timestamp: i64,
    /// Union of all cluster members' streams, deduplicated by URL within
    /// each supplier key.
    pub streams_by_source: StreamsBySource,
    /// True iff the cluster had more than one member.
    pub merged: bool,
    /// Cluster size.
    pub merged_count: usize,
    /// Merge confidence in [0, 1], driven by distinct-source count.
    pub confidence: f64,
    /// Distinct supplier names in the cluster, in cluster scan order.
    pub contributing_sources: Vec<String>,
}

impl CanonicalMatch {
    pub fn stream_count(&self) -> usize {
        self.streams_by_source.values().map(Vec::len).sum()
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_matches: usize,
    pub merged_count: usize,
    pub individual_count: usize,
}

/// Final unified dataset consumed by the UI / export collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// RFC 3339 generation timestamp. Excluded from idempotence comparisons.
    pub processed_at: String,
    pub summary: CatalogSummary,
    pub matches: Vec<CanonicalMatch>,
}
