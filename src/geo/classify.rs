// src/geo/classify.rs

use regex::Regex;
use std::sync::LazyLock;

/// "BJJ", "jiu jitsu", "jiu-jitsu", "jiujitsu", any case.
static MARTIAL_ARTS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bjj|jiu.?jitsu").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Nightclub,
    Gym,
    MartialArts,
    Studio,
    Unknown,
}

impl Category {
    /// Name used on the wire and by the map layer filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Nightclub => "nightclub",
            Category::Gym => "gym",
            Category::MartialArts => "bjj",
            Category::Studio => "studio",
            Category::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub description: String,
}

/// Classify a POI from its tag values.
///
/// Rules are checked in a fixed order and the first hit wins, so a gym
/// named "BJJ Fitness" is a martial-arts academy and a nightclub is a
/// nightclub whatever its name says. A miss is not an error; the record
/// is labelled `Unknown`.
pub fn classify_poi(
    amenity: Option<&str>,
    leisure: Option<&str>,
    sport: Option<&str>,
    name: &str,
) -> Classification {
    if amenity == Some("nightclub") {
        return Classification {
            category: Category::Nightclub,
            description: "Nightclub".to_string(),
        };
    }

    if sport == Some("brazilian_jiu_jitsu") || is_martial_arts_name(name) {
        return Classification {
            category: Category::MartialArts,
            description: "Brazilian Jiu-Jitsu Academy".to_string(),
        };
    }

    if amenity == Some("gym") || leisure == Some("fitness_centre") {
        let description = match sport {
            Some(sport) => format!("Gym - {sport}"),
            None => "Fitness Center".to_string(),
        };
        return Classification {
            category: Category::Gym,
            description,
        };
    }

    Classification {
        category: Category::Unknown,
        description: String::new(),
    }
}

pub fn is_martial_arts_name(name: &str) -> bool {
    MARTIAL_ARTS_NAME.is_match(name)
}

/// A listing is a studio when its bedroom descriptor mentions "studio"
/// anywhere, ignoring case ("Studio - 2 Beds" and "studio/1br flex" count).
pub fn is_studio(beds: &str) -> bool {
    beds.to_lowercase().contains("studio")
}
