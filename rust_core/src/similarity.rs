//! Fingerprinting and pairwise similarity scoring.
//!
//! The fingerprint is a coarse bucket key that prunes the candidate space
//! before pairwise comparison; the similarity score decides whether two
//! records from different suppliers describe the same event.

use crate::classify::contains_phrase;
use crate::competitors::extract_competitors;
use crate::models::NormalizedMatch;
use crate::policy::MergePolicies;
use chrono::DateTime;
use strsim::jaro_winkler;

/// Words too generic to identify a competitor on their own; skipped when
/// picking a fingerprint key token.
const GENERIC_WORDS: &[&str] = &[
    "state", "city", "university", "college", "fc", "cf", "sc", "afc", "united", "team", "club",
    "the", "of", "and", "vs", "at", "in", "to", "for", "los", "san", "new", "las",
];

/// Tournament keywords that count as sport-specific agreement.
const TENNIS_TOUR_KEYWORDS: &[&str] = &["atp", "wta", "itf", "challenger"];
const COLLEGE_TOUR_KEYWORDS: &[&str] = &["ncaa", "bowl", "college", "cfb"];

/// Precomputed per-record view used by the merge engine: competitor tokens,
/// fingerprint, and normalized tournament text. Built once per record so the
/// O(n²) bucket scan stays cheap.
#[derive(Debug, Clone)]
pub struct MatchProfile {
    pub source: String,
    pub sport: String,
    pub unix_timestamp: i64,
    pub fingerprint: String,
    tokens: Vec<String>,
    tournament_norm: String,
    title_norm: String,
    has_tennis_pattern: bool,
}

impl MatchProfile {
    pub fn build(m: &NormalizedMatch, policies: &MergePolicies) -> Self {
        let policy = policies.for_sport(&m.sport);
        let competitors = extract_competitors(&m.match_title, &m.sport);

        let competitor_text = if competitors.is_pair() {
            format!("{} {}", competitors.competitor1, competitors.competitor2)
        } else {
            competitors.competitor1.clone()
        };
        let tokens = tokenize(&competitor_text, policy.min_token_len);

        let fingerprint = fingerprint(
            &competitors.competitor1,
            &competitors.competitor2,
            m.unix_timestamp,
        );

        Self {
            source: m.source.clone(),
            sport: m.sport.clone(),
            unix_timestamp: m.unix_timestamp,
            fingerprint,
            tokens,
            tournament_norm: normalize(&m.tournament),
            title_norm: normalize(&m.match_title),
            has_tennis_pattern: has_tennis_naming_pattern(&m.match_title),
        }
    }
}

/// Coarse grouping key: the last significant token of each competitor
/// (sorted so the pair is order-independent) plus the UTC match date.
/// Deterministic and pure. Surnames and mascots are the most stable part of
/// a competitor string across suppliers, so "Roger Federer" and
/// "R. Federer" share a key while the exact timestamp disagreement between
/// suppliers is absorbed by the date granularity.
pub fn fingerprint(competitor1: &str, competitor2: &str, unix_timestamp: i64) -> String {
    let mut keys = [key_token(competitor1), key_token(competitor2)];
    keys.sort();

    let date = DateTime::from_timestamp(unix_timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "invalid-date".to_string());

    format!("{}|{}|{}", keys[0], keys[1], date)
}

/// Last non-generic word of a competitor string, lowercased and stripped of
/// punctuation. Falls back to the last word when every word is generic.
fn key_token(competitor: &str) -> String {
    let words: Vec<String> = normalize(competitor)
        .split_whitespace()
        .map(str::to_string)
        .collect();

    words
        .iter()
        .rev()
        .find(|w| !GENERIC_WORDS.contains(&w.as_str()))
        .or_else(|| words.last())
        .cloned()
        .unwrap_or_default()
}

/// Symmetric similarity between two records. Zero for same-source pairs: a
/// supplier does not duplicate-report one event within a single ingestion.
pub fn similarity(a: &MatchProfile, b: &MatchProfile) -> f64 {
    if a.source == b.source {
        return 0.0;
    }
    if a.tokens.is_empty() || b.tokens.is_empty() {
        return 0.0;
    }

    // Counting in both directions and taking the max keeps the score
    // symmetric under asymmetric containment.
    let common = count_matching_tokens(&a.tokens, &b.tokens)
        .max(count_matching_tokens(&b.tokens, &a.tokens));
    let base = common as f64 / a.tokens.len().max(b.tokens.len()) as f64;

    // Sport-keyed boost tiers fire only when both records carry the same
    // canonical sport; keying off one side's sport would make the score
    // asymmetric for cross-sport pairs, which share a bucket whenever
    // their fingerprints agree. The sport-independent tiers still apply.
    let shared_sport = if a.sport == b.sport { a.sport.as_str() } else { "" };
    let score = base + tournament_boost(a, b, shared_sport) + pattern_boost(a, b, shared_sport);

    score.clamp(0.0, 1.0)
}

/// Tokens from `from` that equal, contain, or are contained by some token
/// in `against`, with a tightly-guarded fuzzy tier for longer tokens.
fn count_matching_tokens(from: &[String], against: &[String]) -> usize {
    from.iter()
        .filter(|token| against.iter().any(|other| tokens_match(token, other)))
        .count()
}

fn tokens_match(a: &str, b: &str) -> bool {
    if a == b || a.contains(b) || b.contains(a) {
        return true;
    }
    // Very high threshold, long tokens only, to minimize false positives.
    a.len() >= 5 && b.len() >= 5 && jaro_winkler(a, b) > 0.95
}

/// +0.15 when both tournaments agree (equal or one containing the other),
/// +0.10 when they share a sport-specific keyword. Empty tournaments never
/// boost. `sport` is the pair's shared canonical sport, empty when the two
/// records disagree, so the keyword tier only fires on label agreement.
fn tournament_boost(a: &MatchProfile, b: &MatchProfile, sport: &str) -> f64 {
    let (ta, tb) = (&a.tournament_norm, &b.tournament_norm);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    if ta == tb || ta.contains(tb.as_str()) || tb.contains(ta.as_str()) {
        return 0.15;
    }

    let keywords: &[&str] = match sport {
        "Tennis" => TENNIS_TOUR_KEYWORDS,
        "American Football" => COLLEGE_TOUR_KEYWORDS,
        _ => &[],
    };
    if keywords
        .iter()
        .any(|kw| contains_phrase(ta, kw) && contains_phrase(tb, kw))
    {
        return 0.10;
    }

    0.0
}

/// +0.10 when both titles exhibit the sport-characteristic naming pattern:
/// initial-dot or doubles slash for tennis, college indicators for American
/// football. `sport` is the pair's shared canonical sport, empty on
/// disagreement.
fn pattern_boost(a: &MatchProfile, b: &MatchProfile, sport: &str) -> f64 {
    match sport {
        "Tennis" if a.has_tennis_pattern && b.has_tennis_pattern => 0.10,
        "American Football" => {
            let hit = |p: &MatchProfile| {
                COLLEGE_TOUR_KEYWORDS
                    .iter()
                    .any(|kw| contains_phrase(&p.title_norm, kw) || contains_phrase(&p.tournament_norm, kw))
            };
            if hit(a) && hit(b) {
                0.10
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Initial-dot ("R. Federer") or doubles slash ("Mektic/Pavic").
fn has_tennis_naming_pattern(title: &str) -> bool {
    if title.contains('/') {
        return true;
    }
    let bytes = title.as_bytes();
    bytes.windows(2).any(|w| w[0].is_ascii_uppercase() && w[1] == b'.')
}

/// Tokenize competitor text: split on whitespace, dashes, and slashes, keep
/// alphanumerics, lowercase, drop short tokens per policy, deduplicate.
pub fn tokenize(text: &str, min_token_len: usize) -> Vec<String> {
    let mut tokens: Vec<String> = text
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .map(|raw| {
            raw.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|t| t.len() > min_token_len)
        .collect();
    tokens.sort();
    tokens.dedup();
    tokens
}

/// Lowercase, alphanumerics and whitespace only, collapsed whitespace.
fn normalize(s: &str) -> String {
    crate::classify::normalize(s)
}
