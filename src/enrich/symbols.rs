//! Symbol suggestions from POI names and descriptions.

use crate::poi::Poi;

const LODGE_WORDS: &[&str] = &["hytta", "bu", "heim", "stul", "lodge"];
const SUMMIT_WORDS: &[&str] = &["peak", "topp", "tind", "horn", "nuten"];
const FISHING_WORDS: &[&str] = &["fishing", "fisk"];
const BEACH_WORDS: &[&str] = &["beach", "strand"];
const VIEW_WORDS: &[&str] = &["view", "utsikt", "panoramic"];

/// Symbol used when no rule matches.
pub const DEFAULT_SYMBOL: &str = "Campground";

/// Suggest a GPS waypoint symbol.
///
/// Rules are checked in order and match substrings of the lowercase text:
/// lodge words in the name, summit words in the name, fishing words in the
/// description, beach words in the name, view words in the description.
///
/// ```rust
/// use poimerge::{Poi, enrich::suggest_symbol};
///
/// let peak = Poi::new("Store Skagastølstind", 61.4606, 7.8703)?;
/// assert_eq!(suggest_symbol(&peak), "Summit");
/// # Ok::<(), poimerge::PoiError>(())
/// ```
pub fn suggest_symbol(poi: &Poi) -> &'static str {
    let name = poi.name().to_lowercase();
    let description = poi.description().to_lowercase();

    if contains_any(&name, LODGE_WORDS) {
        "Lodge"
    } else if contains_any(&name, SUMMIT_WORDS) {
        "Summit"
    } else if contains_any(&description, FISHING_WORDS) {
        "Fishing Hot Spot Facility"
    } else if contains_any(&name, BEACH_WORDS) {
        "Beach"
    } else if contains_any(&description, VIEW_WORDS) {
        "Scenic Area"
    } else {
        DEFAULT_SYMBOL
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(name: &str, description: &str) -> Poi {
        Poi::new(name, 61.0, 8.0)
            .unwrap()
            .with_description(description)
    }

    #[test]
    fn test_rules() {
        assert_eq!(suggest_symbol(&poi("Fannaråkhytta", "")), "Lodge");
        assert_eq!(suggest_symbol(&poi("Mountain Lodge", "")), "Lodge");
        assert_eq!(suggest_symbol(&poi("Glittertind", "")), "Summit");
        assert_eq!(
            suggest_symbol(&poi("Tjern", "Good fishing in summer")),
            "Fishing Hot Spot Facility"
        );
        assert_eq!(suggest_symbol(&poi("Sola Strand", "")), "Beach");
        assert_eq!(suggest_symbol(&poi("Kanten", "Panoramic view")), "Scenic Area");
        assert_eq!(suggest_symbol(&poi("Parkering", "")), DEFAULT_SYMBOL);
    }

    #[test]
    fn test_name_rules_win_over_description() {
        assert_eq!(suggest_symbol(&poi("Nuten", "fishing")), "Summit");
    }
}
