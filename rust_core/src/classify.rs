//! Sport classification.
//!
//! Maps heterogeneous supplier sport/category labels and free-text match
//! titles to a canonical sport taxonomy. Detection is a deterministic
//! lookup over curated tables (exact alias matching plus whole-phrase
//! containment), never a trained classifier.

use std::collections::HashMap;
use std::sync::OnceLock;

pub const AMERICAN_FOOTBALL: &str = "American Football";
pub const OTHER: &str = "Other";

/// Supplier labels that are too overloaded to trust on their own.
/// "football" means soccer to European suppliers and the NFL to US ones;
/// the title text decides.
const AMBIGUOUS_LABELS: &[&str] = &["football", "fb"];

/// Supplier label aliases, normalized-lowercase key -> canonical name.
const SPORT_ALIASES: &[(&str, &str)] = &[
    // Association football
    ("soccer", "Football"),
    ("football", "Football"),
    ("fb", "Football"),
    ("futbol", "Football"),
    ("epl", "Football"),
    ("premier league", "Football"),
    ("la liga", "Football"),
    ("serie a", "Football"),
    ("bundesliga", "Football"),
    ("ligue 1", "Football"),
    ("champions league", "Football"),
    ("uefa", "Football"),
    ("mls", "Football"),
    ("world cup", "Football"),
    // American football
    ("american football", AMERICAN_FOOTBALL),
    ("nfl", AMERICAN_FOOTBALL),
    ("ncaaf", AMERICAN_FOOTBALL),
    ("cfb", AMERICAN_FOOTBALL),
    ("college football", AMERICAN_FOOTBALL),
    ("gridiron", AMERICAN_FOOTBALL),
    // Basketball
    ("basketball", "Basketball"),
    ("nba", "Basketball"),
    ("ncaab", "Basketball"),
    ("cbb", "Basketball"),
    ("wnba", "Basketball"),
    ("euroleague", "Basketball"),
    // Tennis
    ("tennis", "Tennis"),
    ("atp", "Tennis"),
    ("wta", "Tennis"),
    ("itf", "Tennis"),
    // Combat sports
    ("mma", "MMA"),
    ("ufc", "MMA"),
    ("bellator", "MMA"),
    ("cage fighting", "MMA"),
    ("boxing", "Boxing"),
    ("box", "Boxing"),
    ("wrestling", "Wrestling"),
    ("wwe", "Wrestling"),
    // Ice hockey
    ("hockey", "Ice Hockey"),
    ("ice hockey", "Ice Hockey"),
    ("nhl", "Ice Hockey"),
    // Baseball
    ("baseball", "Baseball"),
    ("mlb", "Baseball"),
    // Cricket
    ("cricket", "Cricket"),
    ("ipl", "Cricket"),
    ("t20", "Cricket"),
    // Rugby
    ("rugby", "Rugby"),
    ("rugby union", "Rugby"),
    ("rugby league", "Rugby"),
    ("nrl", "Rugby"),
    // Motorsport
    ("motorsport", "Motorsport"),
    ("motorsports", "Motorsport"),
    ("f1", "Motorsport"),
    ("formula 1", "Motorsport"),
    ("nascar", "Motorsport"),
    ("motogp", "Motorsport"),
    ("racing", "Motorsport"),
    // Everything else with a recognizable label
    ("golf", "Golf"),
    ("pga", "Golf"),
    ("darts", "Darts"),
    ("snooker", "Snooker"),
    ("billiards", "Snooker"),
    ("pool", "Snooker"),
    ("handball", "Handball"),
    ("volleyball", "Volleyball"),
    ("table tennis", "Table Tennis"),
    ("ping pong", "Table Tennis"),
    ("esports", "Esports"),
    ("e-sports", "Esports"),
    ("afl", "Aussie Rules"),
    ("aussie rules", "Aussie Rules"),
];

/// College-football team names and nicknames, in normalized form
/// (lowercase, alphanumerics and spaces only). Full "school nickname"
/// forms plus standalone nicknames distinctive enough to not collide with
/// pro teams; shared mascots like "tigers" or "bulldogs" only appear with
/// their school attached.
const COLLEGE_TEAMS: &[&str] = &[
    "alabama crimson tide",
    "crimson tide",
    "georgia bulldogs",
    "ohio state buckeyes",
    "buckeyes",
    "michigan wolverines",
    "texas longhorns",
    "longhorns",
    "oklahoma sooners",
    "sooners",
    "clemson tigers",
    "lsu tigers",
    "auburn tigers",
    "missouri tigers",
    "memphis tigers",
    "tennessee volunteers",
    "volunteers",
    "florida gators",
    "notre dame fighting irish",
    "fighting irish",
    "penn state nittany lions",
    "nittany lions",
    "oregon ducks",
    "usc trojans",
    "washington huskies",
    "uconn huskies",
    "ucla bruins",
    "florida state seminoles",
    "seminoles",
    "miami hurricanes",
    "texas am aggies",
    "utah state aggies",
    "new mexico state aggies",
    "arkansas razorbacks",
    "razorbacks",
    "nebraska cornhuskers",
    "cornhuskers",
    "kansas jayhawks",
    "jayhawks",
    "kansas state wildcats",
    "kentucky wildcats",
    "arizona wildcats",
    "northwestern wildcats",
    "villanova wildcats",
    "indiana hoosiers",
    "hoosiers",
    "purdue boilermakers",
    "boilermakers",
    "iowa hawkeyes",
    "hawkeyes",
    "iowa state cyclones",
    "cyclones",
    "wisconsin badgers",
    "minnesota golden gophers",
    "golden gophers",
    "illinois fighting illini",
    "fighting illini",
    "michigan state spartans",
    "san jose state spartans",
    "tcu horned frogs",
    "horned frogs",
    "texas tech red raiders",
    "red raiders",
    "baylor bears",
    "oklahoma state cowboys",
    "wyoming cowboys",
    "ole miss rebels",
    "unlv rebels",
    "mississippi state bulldogs",
    "georgia tech yellow jackets",
    "yellow jackets",
    "virginia tech hokies",
    "hokies",
    "virginia cavaliers",
    "wake forest demon deacons",
    "demon deacons",
    "north carolina tar heels",
    "tar heels",
    "nc state wolfpack",
    "duke blue devils",
    "blue devils",
    "south carolina gamecocks",
    "gamecocks",
    "vanderbilt commodores",
    "commodores",
    "stanford cardinal",
    "california golden bears",
    "golden bears",
    "arizona state sun devils",
    "sun devils",
    "colorado buffaloes",
    "buffaloes",
    "utah utes",
    "utes",
    "byu cougars",
    "washington state cougars",
    "houston cougars",
    "oregon state beavers",
    "west virginia mountaineers",
    "mountaineers",
    "appalachian state mountaineers",
    "pittsburgh panthers",
    "pitt panthers",
    "louisville cardinals",
    "syracuse orange",
    "boston college eagles",
    "maryland terrapins",
    "terrapins",
    "rutgers scarlet knights",
    "scarlet knights",
    "cincinnati bearcats",
    "bearcats",
    "ucf knights",
    "south florida bulls",
    "usf bulls",
    "smu mustangs",
    "tulane green wave",
    "green wave",
    "tulsa golden hurricane",
    "golden hurricane",
    "navy midshipmen",
    "midshipmen",
    "army black knights",
    "black knights",
    "air force falcons",
    "boise state broncos",
    "western michigan broncos",
    "san diego state aztecs",
    "aztecs",
    "fresno state bulldogs",
    "gonzaga bulldogs",
    "hawaii rainbow warriors",
    "rainbow warriors",
    "nevada wolf pack",
    "new mexico lobos",
    "lobos",
    "colorado state rams",
    "texas state bobcats",
    "ohio bobcats",
    "montana state bobcats",
    "troy trojans",
    "south alabama jaguars",
    "georgia southern eagles",
    "georgia state panthers",
    "coastal carolina chanticleers",
    "chanticleers",
    "louisiana ragin cajuns",
    "ragin cajuns",
    "arkansas state red wolves",
    "red wolves",
    "marshall thundering herd",
    "thundering herd",
    "old dominion monarchs",
    "monarchs",
    "liberty flames",
    "james madison dukes",
    "middle tennessee blue raiders",
    "blue raiders",
    "western kentucky hilltoppers",
    "hilltoppers",
    "north texas mean green",
    "mean green",
    "utep miners",
    "utsa roadrunners",
    "roadrunners",
    "rice owls",
    "temple owls",
    "florida atlantic owls",
    "charlotte 49ers",
    "east carolina pirates",
    "ecu pirates",
    "akron zips",
    "zips",
    "ball state cardinals",
    "bowling green falcons",
    "buffalo bulls",
    "central michigan chippewas",
    "chippewas",
    "eastern michigan eagles",
    "kent state golden flashes",
    "golden flashes",
    "miami redhawks",
    "redhawks",
    "northern illinois huskies",
    "toledo rockets",
    "wyoming pokes",
    "idaho vandals",
    "vandals",
    "montana grizzlies",
    "north dakota state bison",
    "south dakota state jackrabbits",
    "jackrabbits",
    "villanova wildcats football",
    "delaware blue hens",
    "blue hens",
    "richmond spiders",
    "william mary tribe",
    "yale bulldogs",
    "harvard crimson",
    "princeton tigers",
    "dartmouth big green",
    "big green",
    "cornell big red",
    "big red",
    "columbia lions football",
    "brown bears football",
    "penn quakers",
    "quakers",
    "lehigh mountain hawks",
    "lafayette leopards",
    "holy cross crusaders",
    "fordham rams football",
    "colgate raiders",
    "bucknell bison",
    "wagner seahawks football",
    "sacred heart pioneers",
    "duquesne dukes football",
    "jacksonville state gamecocks",
    "sam houston bearkats",
    "bearkats",
    "stephen f austin lumberjacks",
    "lumberjacks",
    "abilene christian wildcats",
    "tarleton state texans",
    "weber state wildcats",
    "eastern washington eagles",
    "portland state vikings football",
    "northern arizona lumberjacks",
    "cal poly mustangs",
    "uc davis aggies",
    "sacramento state hornets",
    "southern utah thunderbirds",
    "thunderbirds",
];

/// Competition text that marks a record as college football even when no
/// team name hits: sanctioning bodies, playoff/bowl names, conferences.
const COLLEGE_INDICATORS: &[&str] = &[
    "ncaa",
    "ncaaf",
    "ncaa football",
    "fbs",
    "fcs",
    "cfb",
    "college football",
    "college football playoff",
    "cfp",
    "heisman",
    "rose bowl",
    "sugar bowl",
    "orange bowl",
    "cotton bowl",
    "fiesta bowl",
    "peach bowl",
    "citrus bowl",
    "gator bowl",
    "sun bowl",
    "alamo bowl",
    "liberty bowl",
    "music city bowl",
    "holiday bowl",
    "pinstripe bowl",
    "outback bowl",
    "las vegas bowl",
    "texas bowl",
    "armed forces bowl",
    "independence bowl",
    "birmingham bowl",
    "new orleans bowl",
    "cure bowl",
    "frisco bowl",
    "boca raton bowl",
    "camellia bowl",
    "potato bowl",
    "hawaii bowl",
    "military bowl",
    "sec championship",
    "big ten",
    "big 12",
    "pac 12",
    "acc championship",
    "mountain west",
    "sun belt",
    "conference usa",
    "american athletic",
    "mid american conference",
    "ivy league",
];

/// Immutable lookup tables injected into the classifier. Swappable so the
/// tables stay independently testable.
#[derive(Debug, Clone)]
pub struct ClassifierTables {
    pub sport_aliases: HashMap<String, String>,
    pub college_teams: Vec<String>,
    pub college_indicators: Vec<String>,
}

impl Default for ClassifierTables {
    fn default() -> Self {
        Self {
            sport_aliases: SPORT_ALIASES
                .iter()
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
                .collect(),
            college_teams: COLLEGE_TEAMS.iter().map(|t| t.to_string()).collect(),
            college_indicators: COLLEGE_INDICATORS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Shared default tables, built once.
fn default_tables() -> &'static ClassifierTables {
    static TABLES: OnceLock<ClassifierTables> = OnceLock::new();
    TABLES.get_or_init(ClassifierTables::default)
}

/// Deterministic sport classifier. Pure function over its tables.
#[derive(Debug, Clone, Default)]
pub struct SportClassifier {
    tables: Option<ClassifierTables>,
}

impl SportClassifier {
    pub fn new() -> Self {
        Self { tables: None }
    }

    pub fn with_tables(tables: ClassifierTables) -> Self {
        Self {
            tables: Some(tables),
        }
    }

    fn tables(&self) -> &ClassifierTables {
        self.tables.as_ref().unwrap_or_else(|| default_tables())
    }

    /// Classify a record from its supplier label and its title/tournament
    /// text.
    ///
    /// Priority: explicit label through the alias table (Title-Cased
    /// passthrough when unmapped); college-football content detection when
    /// the label is absent or is a generic "football"; "Other" last.
    pub fn classify(&self, label: Option<&str>, title: &str, tournament: &str) -> String {
        let label = label.map(str::trim).filter(|l| !l.is_empty());

        if let Some(raw) = label {
            let key = normalize(raw);
            if let Some(canonical) = self.tables().sport_aliases.get(&key) {
                if AMBIGUOUS_LABELS.contains(&key.as_str())
                    && self.is_college_football(title, tournament)
                {
                    return AMERICAN_FOOTBALL.to_string();
                }
                return canonical.clone();
            }
            // Unmapped but non-empty labels pass through Title-Cased.
            return title_case(raw);
        }

        if self.is_college_football(title, tournament) {
            return AMERICAN_FOOTBALL.to_string();
        }

        OTHER.to_string()
    }

    /// Whole-phrase scan of title + tournament against the college team and
    /// competition-indicator tables.
    pub fn is_college_football(&self, title: &str, tournament: &str) -> bool {
        let text = normalize(&format!("{} {}", title, tournament));
        if text.is_empty() {
            return false;
        }

        let tables = self.tables();
        tables
            .college_teams
            .iter()
            .chain(tables.college_indicators.iter())
            .any(|phrase| contains_phrase(&text, phrase))
    }
}

/// Normalize a string for comparison: lowercase, alphanumerics and
/// whitespace only, collapsed whitespace.
pub(crate) fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if text contains phrase as whole words, not as a substring of
/// another word; "sec" must not fire inside "second". Both inputs are
/// expected in normalized form.
pub(crate) fn contains_phrase(text: &str, phrase: &str) -> bool {
    let text_words: Vec<&str> = text.split_whitespace().collect();
    let phrase_words: Vec<&str> = phrase.split_whitespace().collect();

    if phrase_words.is_empty() {
        return false;
    }

    if phrase_words.len() > 1 {
        return text_words
            .windows(phrase_words.len())
            .any(|window| window == phrase_words.as_slice());
    }

    text_words.contains(&phrase_words[0])
}

/// Title-Case each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_lookup_is_case_insensitive_and_trimmed() {
        let classifier = SportClassifier::new();
        assert_eq!(classifier.classify(Some("  SOCCER "), "", ""), "Football");
        assert_eq!(classifier.classify(Some("ufc"), "", ""), "MMA");
        assert_eq!(classifier.classify(Some("NHL"), "", ""), "Ice Hockey");
        assert_eq!(classifier.classify(Some("Atp"), "", ""), "Tennis");
    }

    #[test]
    fn test_unmapped_label_title_cased_passthrough() {
        let classifier = SportClassifier::new();
        assert_eq!(
            classifier.classify(Some("water polo"), "", ""),
            "Water Polo"
        );
        assert_eq!(classifier.classify(Some("KABADDI"), "", ""), "Kabaddi");
    }

    #[test]
    fn test_generic_football_overridden_by_college_team() {
        let classifier = SportClassifier::new();
        assert_eq!(
            classifier.classify(
                Some("football"),
                "Alabama Crimson Tide vs Georgia Bulldogs",
                ""
            ),
            AMERICAN_FOOTBALL
        );
        // A specific soccer label is never overridden.
        assert_eq!(
            classifier.classify(Some("soccer"), "Alabama Crimson Tide vs Georgia Bulldogs", ""),
            "Football"
        );
    }

    #[test]
    fn test_generic_football_without_college_hit_stays_soccer() {
        let classifier = SportClassifier::new();
        assert_eq!(
            classifier.classify(Some("football"), "Arsenal vs Chelsea", ""),
            "Football"
        );
    }

    #[test]
    fn test_missing_label_with_college_team_detected() {
        let classifier = SportClassifier::new();
        assert_eq!(
            classifier.classify(None, "Alabama Crimson Tide vs Georgia Bulldogs", ""),
            AMERICAN_FOOTBALL
        );
    }

    #[test]
    fn test_bowl_indicator_in_tournament_detected() {
        let classifier = SportClassifier::new();
        assert_eq!(
            classifier.classify(None, "Michigan vs Washington", "Rose Bowl"),
            AMERICAN_FOOTBALL
        );
    }

    #[test]
    fn test_no_label_no_hit_falls_back_to_other() {
        let classifier = SportClassifier::new();
        assert_eq!(classifier.classify(None, "Arsenal vs Chelsea", ""), OTHER);
        assert_eq!(classifier.classify(None, "", ""), OTHER);
        assert_eq!(classifier.classify(Some("   "), "", ""), OTHER);
    }

    #[test]
    fn test_indicator_requires_whole_phrase() {
        let classifier = SportClassifier::new();
        // "sec" must not fire inside "second".
        assert!(!classifier.is_college_football("Second Division playoff", ""));
        assert!(classifier.is_college_football("", "SEC Championship"));
    }

    #[test]
    fn test_custom_tables_injection() {
        let mut tables = ClassifierTables::default();
        tables
            .sport_aliases
            .insert("footy".to_string(), "Football".to_string());
        let classifier = SportClassifier::with_tables(tables);
        assert_eq!(classifier.classify(Some("footy"), "", ""), "Football");
    }

    #[test]
    fn test_contains_phrase_multiword() {
        assert!(contains_phrase(
            "the rose bowl kickoff",
            "rose bowl"
        ));
        assert!(!contains_phrase("rosebowl kickoff", "rose bowl"));
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Texas A&M  Aggies!"), "texas am aggies");
    }
}
