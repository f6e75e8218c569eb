//! Access-point text classifier.
//!
//! An access point is "geographic" when its description reads like a spatial connection
//! ("South of Battleon", "take the stairs") rather than a UI action ("/join", "talk to",
//! "click the button"). The rule table below is matched by substring presence on the lowercased
//! text; each phrase counts at most once.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const DIRECTIONS: [&str; 8] = [
    "north",
    "south",
    "east",
    "west",
    "northeast",
    "northwest",
    "southeast",
    "southwest",
];
const PREPOSITIONS: [&str; 2] = ["of", "at"];
const GEO_LITERALS: [&str; 2] = ["of screen", "stairs"];

const NON_GEO_PHRASES: [&str; 6] = ["join", "talk", "button", "map", "event hub", "statue"];

fn geo_phrases() -> &'static [String] {
    static PHRASES: OnceLock<Vec<String>> = OnceLock::new();
    PHRASES.get_or_init(|| {
        let mut out: Vec<String> = GEO_LITERALS.iter().map(|s| s.to_string()).collect();
        for dir in DIRECTIONS {
            for prep in PREPOSITIONS {
                out.push(format!("{dir} {prep}"));
            }
        }
        out
    })
}

/// Classifies a single access-point line.
///
/// Empty and single-token lines are never geographic. Otherwise the line is geographic when it
/// matches at least as many geographic phrases as non-geographic ones.
pub fn is_access_geographic(line: &str) -> bool {
    if line.is_empty() || line.split(' ').count() <= 1 {
        return false;
    }
    let lower = line.to_lowercase();
    let geo = geo_phrases()
        .iter()
        .filter(|p| lower.contains(p.as_str()))
        .count();
    let non_geo = NON_GEO_PHRASES
        .iter()
        .filter(|p| lower.contains(*p))
        .count();
    geo >= non_geo
}

/// Classifies a possibly multi-line access-point description: geographic if any non-empty line
/// is geographic.
pub fn is_location_geographic(text: &str) -> bool {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .any(is_access_geographic)
}

/// List-item filter applied while parsing a location's access points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Every access point is followed.
    None,
    /// Only access points whose description is geographic are followed.
    #[default]
    Geo,
}

impl Condition {
    pub fn name(self) -> &'static str {
        match self {
            Condition::None => "none",
            Condition::Geo => "geo",
        }
    }

    pub fn accepts(self, text: &str) -> bool {
        match self {
            Condition::None => true,
            Condition::Geo => is_location_geographic(text),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Condition {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Condition::None),
            "geo" => Ok(Condition::Geo),
            other => Err(crate::Error::UnknownCondition {
                name: other.to_string(),
            }),
        }
    }
}

impl serde::Serialize for Condition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Condition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
