//! Clustering and deduplication.
//!
//! Greedy single-pass clustering per fingerprint bucket: records are
//! scanned in input order, each unclustered record opens a cluster and
//! claims every later unclustered record in its bucket that scores at or
//! above the sport's merge threshold and sits within the sport's time
//! window. Greedy first-fit, not globally optimal: a record joins the
//! first compatible cluster and is never re-evaluated. Input order is
//! therefore part of the contract; for a fixed order the output is fully
//! deterministic.

use crate::models::{CanonicalMatch, NormalizedMatch, StreamsBySource};
use crate::policy::MergePolicies;
use crate::similarity::{similarity, MatchProfile};
use rustc_hash::FxHashMap;
use std::collections::HashSet;
use tracing::debug;

/// Cluster all normalized matches and emit one canonical record per
/// cluster. The union of output streams always equals the union of input
/// streams: only exact-duplicate URLs within one supplier key collapse.
pub fn cluster_and_merge(
    matches: &[NormalizedMatch],
    policies: &MergePolicies,
) -> Vec<CanonicalMatch> {
    if matches.is_empty() {
        return Vec::new();
    }

    let profiles: Vec<MatchProfile> = matches
        .iter()
        .map(|m| MatchProfile::build(m, policies))
        .collect();

    // Bucket indices by fingerprint, preserving first-appearance order so
    // cluster emission follows input order.
    let mut bucket_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut buckets: Vec<Vec<usize>> = Vec::new();
    for (idx, profile) in profiles.iter().enumerate() {
        match bucket_index.get(profile.fingerprint.as_str()) {
            Some(&slot) => buckets[slot].push(idx),
            None => {
                bucket_index.insert(profile.fingerprint.as_str(), buckets.len());
                buckets.push(vec![idx]);
            }
        }
    }

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for bucket in &buckets {
        clusters.extend(cluster_bucket(bucket, &profiles, policies));
    }
    // Emit clusters in global input order of their seed records.
    clusters.sort_by_key(|cluster| cluster[0]);

    clusters
        .iter()
        .map(|cluster| merge_cluster(cluster, matches))
        .collect()
}

/// Greedy first-fit pass over one fingerprint bucket.
fn cluster_bucket(
    bucket: &[usize],
    profiles: &[MatchProfile],
    policies: &MergePolicies,
) -> Vec<Vec<usize>> {
    let mut clusters = Vec::new();
    let mut clustered = vec![false; bucket.len()];

    for (pos, &seed_idx) in bucket.iter().enumerate() {
        if clustered[pos] {
            continue;
        }
        clustered[pos] = true;
        let mut cluster = vec![seed_idx];

        let seed = &profiles[seed_idx];
        let policy = policies.for_sport(&seed.sport);

        for (later_pos, &candidate_idx) in bucket.iter().enumerate().skip(pos + 1) {
            if clustered[later_pos] {
                continue;
            }
            let candidate = &profiles[candidate_idx];

            let time_diff = (seed.unix_timestamp - candidate.unix_timestamp).abs();
            if time_diff > policy.max_time_diff_seconds() {
                continue;
            }

            // Inclusive: a score exactly at the threshold merges.
            let score = similarity(seed, candidate);
            if score >= policy.merge_threshold {
                debug!(
                    seed = seed_idx,
                    candidate = candidate_idx,
                    score,
                    threshold = policy.merge_threshold,
                    "merging records"
                );
                clustered[later_pos] = true;
                cluster.push(candidate_idx);
            }
        }

        clusters.push(cluster);
    }

    clusters
}

/// Collapse one cluster into a canonical record.
fn merge_cluster(cluster: &[usize], matches: &[NormalizedMatch]) -> CanonicalMatch {
    let base = select_base(cluster, matches);

    let mut streams: StreamsBySource = StreamsBySource::new();
    let mut seen: FxHashMap<&str, HashSet<&str>> = FxHashMap::default();
    let mut contributing_sources: Vec<String> = Vec::new();

    for &idx in cluster {
        let member = &matches[idx];
        if !contributing_sources.contains(&member.source) {
            contributing_sources.push(member.source.clone());
        }
        for (supplier, urls) in &member.streams_by_source {
            let seen_urls = seen.entry(supplier.as_str()).or_default();
            let entry = streams.entry(supplier.clone()).or_default();
            for url in urls {
                if seen_urls.insert(url.as_str()) {
                    entry.push(url.clone());
                }
            }
        }
    }

    let merged = cluster.len() > 1;
    let confidence = if merged {
        confidence_from_source_count(contributing_sources.len())
    } else {
        1.0
    };

    CanonicalMatch {
        match_title: base.match_title.clone(),
        sport: base.sport.clone(),
        tournament: base.tournament.clone(),
        unix_timestamp: base.unix_timestamp,
        streams_by_source: streams,
        merged,
        merged_count: cluster.len(),
        confidence,
        contributing_sources,
    }
}

/// Base record: highest quality score, earliest input order on ties.
fn select_base<'a>(cluster: &[usize], matches: &'a [NormalizedMatch]) -> &'a NormalizedMatch {
    let mut best = &matches[cluster[0]];
    for &idx in &cluster[1..] {
        if matches[idx].quality_score > best.quality_score {
            best = &matches[idx];
        }
    }
    best
}

/// Source-count confidence heuristic. A deliberate simplification: the
/// similarity magnitude does not feed back into confidence.
fn confidence_from_source_count(distinct_sources: usize) -> f64 {
    match distinct_sources {
        n if n >= 3 => 1.0,
        2 => 0.95,
        _ => 0.9,
    }
}
