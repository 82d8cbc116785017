//! Supplier feed normalization.
//!
//! Each supplier feed has its own shape; a `SupplierAdapter` owns the
//! mapping from that shape to `NormalizedMatch`. Adapters are registered
//! by supplier name in an `AdapterRegistry` and looked up per batch, so
//! adding a supplier means adding an adapter, never touching the
//! pipeline. Shared field coercion (timestamps, titles, URLs) lives here;
//! the concrete adapters live in [`suppliers`].

pub mod suppliers;

use crate::classify::SportClassifier;
use crate::error::PipelineError;
use crate::models::{NormalizedMatch, SupplierBatch};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

// ============================================================================
// Adapter interface
// ============================================================================

/// One supplier feed's mapping into the normalized model.
///
/// Adapters are synchronous and stateless; `now` is passed in so callers
/// control the clock.
pub trait SupplierAdapter: Send + Sync {
    fn supplier_name(&self) -> &str;

    fn normalize(
        &self,
        raw: &Value,
        now: DateTime<Utc>,
    ) -> Result<NormalizedMatch, PipelineError>;
}

/// Supplier-name keyed adapter lookup.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Box<dyn SupplierAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, adapter: Box<dyn SupplierAdapter>) {
        self.adapters
            .insert(adapter.supplier_name().to_string(), adapter);
    }

    pub fn get(&self, supplier: &str) -> Option<&dyn SupplierAdapter> {
        self.adapters.get(supplier).map(|a| a.as_ref())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

/// Run one supplier batch through its adapter and the sport classifier.
///
/// Malformed records are logged and skipped; one bad record never drops a
/// batch.
pub fn normalize_batch(
    adapter: &dyn SupplierAdapter,
    classifier: &SportClassifier,
    batch: &SupplierBatch,
    now: DateTime<Utc>,
) -> Vec<NormalizedMatch> {
    let mut out = Vec::with_capacity(batch.records.len());
    for raw in &batch.records {
        match adapter.normalize(raw, now) {
            Ok(mut m) => {
                let label = m.sport.trim().to_string();
                m.sport = classifier.classify(
                    if label.is_empty() { None } else { Some(&label) },
                    &m.match_title,
                    &m.tournament,
                );
                out.push(m);
            }
            Err(err) => {
                warn!(supplier = %batch.supplier, %err, "skipping malformed record");
            }
        }
    }
    out
}

// ============================================================================
// Shared field coercion
// ============================================================================

/// Milliseconds vs seconds cutover. Any epoch value above this is treated
/// as milliseconds; as seconds it would be past the year 33000.
const MS_EPOCH_CUTOVER: i64 = 1_000_000_000_000;

/// Rewrite dash-separated matchup titles to the canonical "A vs B" form.
///
/// Only dashes acting as competitor separators are rewritten, so
/// intra-word hyphens ("Jo-Wilfried Tsonga") survive. Idempotent: a title
/// already in canonical form passes through unchanged.
pub fn canonical_title(raw: &str) -> String {
    static SPACED: OnceLock<Regex> = OnceLock::new();
    static TRAILING_SPACE: OnceLock<Regex> = OnceLock::new();
    static LEADING_SPACE: OnceLock<Regex> = OnceLock::new();

    let spaced = SPACED.get_or_init(|| Regex::new(r"\s+-\s+").unwrap());
    let trailing = TRAILING_SPACE.get_or_init(|| Regex::new(r"\s+-(\S)").unwrap());
    let leading = LEADING_SPACE.get_or_init(|| Regex::new(r"(\S)-\s+").unwrap());

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let step = spaced.replace_all(&collapsed, " vs ");
    let step = trailing.replace_all(&step, " vs $1");
    let step = leading.replace_all(&step, "$1 vs ");
    step.trim().to_string()
}

/// Coerce a JSON timestamp field to epoch seconds.
///
/// Accepts epoch numbers (seconds or milliseconds, detected by
/// magnitude), numeric strings, RFC 3339 strings, and a few common naive
/// datetime layouts interpreted as UTC.
pub fn coerce_unix_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            let raw = if let Some(i) = n.as_i64() {
                i
            } else {
                n.as_f64()? as i64
            };
            Some(scale_epoch(raw))
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(raw) = s.parse::<i64>() {
                return Some(scale_epoch(raw));
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.timestamp());
            }
            for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
                    return Some(naive.and_utc().timestamp());
                }
            }
            None
        }
        _ => None,
    }
}

fn scale_epoch(raw: i64) -> i64 {
    if raw.abs() >= MS_EPOCH_CUTOVER {
        raw / 1000
    } else {
        raw
    }
}

/// Timestamp plausibility window: one year back, one week forward.
pub fn is_plausible_timestamp(unix_ts: i64, now: DateTime<Utc>) -> bool {
    let earliest = (now - Duration::days(365)).timestamp();
    let latest = (now + Duration::days(7)).timestamp();
    unix_ts >= earliest && unix_ts <= latest
}

/// Walk a dotted path ("event.start") into nested JSON objects.
pub fn pluck<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// First non-empty string at any of the given top-level keys.
pub fn first_string<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| value.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Order-preserving URL dedup within one supplier's list.
pub fn dedupe_urls(urls: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    urls.into_iter()
        .filter(|u| !u.is_empty() && seen.insert(u.clone()))
        .collect()
}

// ============================================================================
// Quality scoring
// ============================================================================

pub(crate) struct QualityInputs {
    pub title_missing: bool,
    pub sport_label_missing: bool,
    pub timestamp_repaired: bool,
    pub stream_count: usize,
}

/// Score a normalized record 0..=100 from completeness signals.
pub(crate) fn quality_score(inputs: &QualityInputs, m: &NormalizedMatch, now: DateTime<Utc>) -> u8 {
    let mut score: i32 = 100;

    if inputs.title_missing {
        score -= 25;
    }
    if inputs.sport_label_missing {
        score -= 15;
    }
    if inputs.timestamp_repaired {
        score -= 20;
    }
    if inputs.stream_count == 0 {
        score -= 25;
    } else if inputs.stream_count > 1 {
        score += 5;
    }
    if !inputs.timestamp_repaired && !is_plausible_timestamp(m.unix_timestamp, now) {
        score -= 10;
    }
    if m.match_title.contains(" vs ") {
        score += 5;
    }

    score.clamp(0, 100) as u8
}

pub(crate) const FALLBACK_TITLE: &str = "Unknown Match";
