//! Concrete supplier adapters.
//!
//! Three feed shapes are covered: embed-pair feeds with structured team
//! objects and stream ids rendered through an embed URL template, flat
//! listing feeds with loose top-level fields, and nested event feeds
//! keyed under an `event` object with link objects. All three share the
//! coercion helpers in the parent module.

use super::{
    canonical_title, coerce_unix_seconds, dedupe_urls, first_string, pluck, quality_score,
    QualityInputs, SupplierAdapter, FALLBACK_TITLE,
};
use crate::error::PipelineError;
use crate::models::{NormalizedMatch, StreamsBySource};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

fn require_object<'a>(
    raw: &'a Value,
    supplier: &str,
) -> Result<&'a serde_json::Map<String, Value>, PipelineError> {
    raw.as_object()
        .ok_or_else(|| PipelineError::malformed(supplier, "record is not a JSON object"))
}

// ============================================================================
// Embed-pair feeds
// ============================================================================

/// Feeds with structured `teams.home` / `teams.away` objects and stream
/// entries carrying `source` and `id` fields that render into an embed
/// URL template (`{source}` and `{id}` placeholders).
pub struct EmbedPairAdapter {
    supplier: String,
    embed_template: String,
}

impl EmbedPairAdapter {
    pub fn new(supplier: impl Into<String>, embed_template: impl Into<String>) -> Self {
        Self {
            supplier: supplier.into(),
            embed_template: embed_template.into(),
        }
    }

    fn title_from(&self, raw: &Value) -> Option<String> {
        let home = pluck(raw, "teams.home.name").and_then(Value::as_str);
        let away = pluck(raw, "teams.away.name").and_then(Value::as_str);
        match (home, away) {
            (Some(h), Some(a)) if !h.trim().is_empty() && !a.trim().is_empty() => {
                Some(format!("{} vs {}", h.trim(), a.trim()))
            }
            _ => first_string(raw, &["title"]).map(str::to_string),
        }
    }

    fn render_streams(&self, raw: &Value) -> Vec<String> {
        let entries = match raw.get("sources").and_then(Value::as_array) {
            Some(entries) => entries,
            None => return Vec::new(),
        };
        let urls = entries
            .iter()
            .filter_map(|entry| {
                let source = entry.get("source").and_then(Value::as_str)?;
                let id = entry.get("id").and_then(Value::as_str)?;
                Some(
                    self.embed_template
                        .replace("{source}", source)
                        .replace("{id}", id),
                )
            })
            .collect();
        dedupe_urls(urls)
    }
}

impl SupplierAdapter for EmbedPairAdapter {
    fn supplier_name(&self) -> &str {
        &self.supplier
    }

    fn normalize(
        &self,
        raw: &Value,
        now: DateTime<Utc>,
    ) -> Result<NormalizedMatch, PipelineError> {
        require_object(raw, &self.supplier)?;

        let title = self.title_from(raw);
        let title_missing = title.is_none();
        let match_title = canonical_title(&title.unwrap_or_else(|| FALLBACK_TITLE.to_string()));

        let label = first_string(raw, &["category", "sport"]).unwrap_or_default();
        let tournament = first_string(raw, &["tournament", "league"])
            .unwrap_or_default()
            .to_string();

        // This feed publishes epoch milliseconds; magnitude detection in
        // the coercion helper handles the occasional seconds value too.
        let coerced = raw.get("date").and_then(coerce_unix_seconds);
        let timestamp_repaired = coerced.is_none();
        let unix_timestamp =
            coerced.unwrap_or_else(|| (now + Duration::hours(1)).timestamp());

        let urls = self.render_streams(raw);
        let mut streams_by_source = StreamsBySource::new();
        if !urls.is_empty() {
            streams_by_source.insert(self.supplier.clone(), urls);
        }

        let mut m = NormalizedMatch {
            source: self.supplier.clone(),
            match_title,
            sport: label.to_string(),
            tournament,
            unix_timestamp,
            streams_by_source,
            quality_score: 0,
        };
        m.quality_score = quality_score(
            &QualityInputs {
                title_missing,
                sport_label_missing: label.is_empty(),
                timestamp_repaired,
                stream_count: m.stream_count(),
            },
            &m,
            now,
        );
        Ok(m)
    }
}

// ============================================================================
// Flat listing feeds
// ============================================================================

/// Feeds that publish one flat object per match with loosely named
/// top-level fields and ready-made stream URLs.
pub struct FlatListingAdapter {
    supplier: String,
}

impl FlatListingAdapter {
    pub fn new(supplier: impl Into<String>) -> Self {
        Self {
            supplier: supplier.into(),
        }
    }
}

impl SupplierAdapter for FlatListingAdapter {
    fn supplier_name(&self) -> &str {
        &self.supplier
    }

    fn normalize(
        &self,
        raw: &Value,
        now: DateTime<Utc>,
    ) -> Result<NormalizedMatch, PipelineError> {
        require_object(raw, &self.supplier)?;

        let title = first_string(raw, &["match", "title", "name"]);
        let title_missing = title.is_none();
        let match_title = canonical_title(title.unwrap_or(FALLBACK_TITLE));

        let label = first_string(raw, &["sport"]).unwrap_or_default();
        let tournament = first_string(raw, &["league", "competition"])
            .unwrap_or_default()
            .to_string();

        let coerced = ["starts_at", "timestamp", "time", "date"]
            .iter()
            .filter_map(|k| raw.get(*k))
            .find_map(coerce_unix_seconds);
        let timestamp_repaired = coerced.is_none();
        let unix_timestamp = coerced.unwrap_or_else(|| now.timestamp());

        let urls: Vec<String> = ["channels", "streams"]
            .iter()
            .filter_map(|k| raw.get(*k).and_then(Value::as_array))
            .flatten()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        let urls = dedupe_urls(urls);
        let mut streams_by_source = StreamsBySource::new();
        if !urls.is_empty() {
            streams_by_source.insert(self.supplier.clone(), urls);
        }

        let mut m = NormalizedMatch {
            source: self.supplier.clone(),
            match_title,
            sport: label.to_string(),
            tournament,
            unix_timestamp,
            streams_by_source,
            quality_score: 0,
        };
        m.quality_score = quality_score(
            &QualityInputs {
                title_missing,
                sport_label_missing: label.is_empty(),
                timestamp_repaired,
                stream_count: m.stream_count(),
            },
            &m,
            now,
        );
        Ok(m)
    }
}

// ============================================================================
// Nested event feeds
// ============================================================================

/// Feeds that nest the match under an `event` object and publish links
/// as `{ "url": ... }` objects.
pub struct NestedEventAdapter {
    supplier: String,
}

impl NestedEventAdapter {
    pub fn new(supplier: impl Into<String>) -> Self {
        Self {
            supplier: supplier.into(),
        }
    }
}

impl SupplierAdapter for NestedEventAdapter {
    fn supplier_name(&self) -> &str {
        &self.supplier
    }

    fn normalize(
        &self,
        raw: &Value,
        now: DateTime<Utc>,
    ) -> Result<NormalizedMatch, PipelineError> {
        require_object(raw, &self.supplier)?;
        if pluck(raw, "event").map(|v| !v.is_object()).unwrap_or(false) {
            return Err(PipelineError::malformed(
                &self.supplier,
                "event field is not an object",
            ));
        }

        let title = pluck(raw, "event.title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let title_missing = title.is_none();
        let match_title = canonical_title(title.unwrap_or(FALLBACK_TITLE));

        let label = pluck(raw, "event.discipline")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        let tournament = pluck(raw, "event.competition")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let coerced = pluck(raw, "event.start").and_then(coerce_unix_seconds);
        let timestamp_repaired = coerced.is_none();
        let unix_timestamp = coerced.unwrap_or_else(|| now.timestamp());

        let urls: Vec<String> = raw
            .get("links")
            .and_then(Value::as_array)
            .map(|links| {
                links
                    .iter()
                    .filter_map(|l| l.get("url").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let urls = dedupe_urls(urls);
        let mut streams_by_source = StreamsBySource::new();
        if !urls.is_empty() {
            streams_by_source.insert(self.supplier.clone(), urls);
        }

        let mut m = NormalizedMatch {
            source: self.supplier.clone(),
            match_title,
            sport: label.to_string(),
            tournament,
            unix_timestamp,
            streams_by_source,
            quality_score: 0,
        };
        m.quality_score = quality_score(
            &QualityInputs {
                title_missing,
                sport_label_missing: label.is_empty(),
                timestamp_repaired,
                stream_count: m.stream_count(),
            },
            &m,
            now,
        );
        Ok(m)
    }
}
