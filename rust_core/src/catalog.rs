//! Final catalog assembly.

use crate::models::{CanonicalMatch, Catalog, CatalogSummary};
use chrono::{DateTime, SecondsFormat, Utc};

/// Sort canonical matches by kickoff and wrap them with summary counts.
/// The sort is stable, so records sharing a timestamp keep their merge
/// output order.
pub fn assemble_at(mut matches: Vec<CanonicalMatch>, processed_at: DateTime<Utc>) -> Catalog {
    matches.sort_by_key(|m| m.unix_timestamp);

    let merged_count = matches.iter().filter(|m| m.merged).count();
    let summary = CatalogSummary {
        total_matches: matches.len(),
        merged_count,
        individual_count: matches.len() - merged_count,
    };

    Catalog {
        processed_at: processed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        summary,
        matches,
    }
}

pub fn assemble(matches: Vec<CanonicalMatch>) -> Catalog {
    assemble_at(matches, Utc::now())
}
