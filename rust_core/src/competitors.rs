//! Competitor extraction from normalized match titles.
//!
//! Sport-specific strategies are tried in order and the first hit wins.
//! Titles reach this module already canonicalized (dash separators rewritten
//! to " vs " by the normalizer), but every pattern also accepts " - " so the
//! extractor stands on its own.

use crate::models::{CompetitorPattern, Competitors};
use regex::Regex;
use std::sync::OnceLock;

/// "Firstname Lastname vs Firstname Lastname" (singles). Each side is two
/// or more capitalized words.
fn tennis_singles_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([A-Z][A-Za-z'-]+(?: [A-Z][A-Za-z'-]+)+)(?: vs | - )([A-Z][A-Za-z'-]+(?: [A-Z][A-Za-z'-]+)+)$",
        )
        .expect("tennis singles pattern")
    })
}

/// "X.Last/X.Last vs X.Last/X.Last" (doubles).
fn tennis_doubles_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([A-Z]\.? ?[A-Za-z'-]+ ?/ ?[A-Z]\.? ?[A-Za-z'-]+)(?: vs | - )([A-Z]\.? ?[A-Za-z'-]+ ?/ ?[A-Z]\.? ?[A-Za-z'-]+)$",
        )
        .expect("tennis doubles pattern")
    })
}

/// "X. Last vs X. Last" (abbreviated singles).
fn tennis_abbreviated_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Z]\. ?[A-Za-z'-]+)(?: vs | - )([A-Z]\. ?[A-Za-z'-]+)$")
            .expect("tennis abbreviated pattern")
    })
}

/// Extract the competitor pair from a normalized title.
///
/// Never fails: when no separator is found the whole title becomes
/// `competitor1` with an empty `competitor2`, which degrades similarity
/// scoring gracefully instead of aborting the pipeline.
pub fn extract_competitors(title: &str, sport: &str) -> Competitors {
    let title = title.trim();

    match sport {
        "Tennis" => extract_tennis(title),
        // Structured home/away preference for team sports is realized in
        // the supplier adapters, which build the title; by this point a
        // separator split is all that remains.
        "American Football" | "Basketball" | "Football" => {
            split_on_separators(title, &[" vs ", " - "])
        }
        _ => split_on_separators(title, &[" vs ", " - ", " / ", " @ "]),
    }
}

fn extract_tennis(title: &str) -> Competitors {
    if let Some(caps) = tennis_singles_re().captures(title) {
        return pair(&caps[1], &caps[2], CompetitorPattern::TennisSingles);
    }
    if let Some(caps) = tennis_doubles_re().captures(title) {
        return pair(&caps[1], &caps[2], CompetitorPattern::TennisDoubles);
    }
    if let Some(caps) = tennis_abbreviated_re().captures(title) {
        return pair(&caps[1], &caps[2], CompetitorPattern::TennisAbbreviated);
    }
    split_on_separators(title, &[" - ", " vs ", " / "])
}

/// Split on the earliest occurrence of any listed separator.
fn split_on_separators(title: &str, separators: &[&str]) -> Competitors {
    let earliest = separators
        .iter()
        .filter_map(|sep| title.find(sep).map(|idx| (idx, *sep)))
        .min_by_key(|(idx, _)| *idx);

    match earliest {
        Some((idx, sep)) => pair(
            &title[..idx],
            &title[idx + sep.len()..],
            CompetitorPattern::SeparatorSplit,
        ),
        None => Competitors {
            competitor1: title.to_string(),
            competitor2: String::new(),
            pattern_used: CompetitorPattern::Unknown,
        },
    }
}

fn pair(c1: &str, c2: &str, pattern_used: CompetitorPattern) -> Competitors {
    Competitors {
        competitor1: c1.trim().to_string(),
        competitor2: c2.trim().to_string(),
        pattern_used,
    }
}
