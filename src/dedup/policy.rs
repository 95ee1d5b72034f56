//! The duplicate predicate and the merge policy.

use crate::compute::distance::haversine_distance;
use crate::poi::Poi;

/// Whether `a` and `b` describe the same place.
///
/// True when the names are equal ignoring case (at any distance), or when
/// the haversine distance is strictly less than `threshold_meters`.
///
/// # Examples
///
/// ```rust
/// use poimerge::{Poi, dedup::is_duplicate};
///
/// let a = Poi::new("Cabin A", 61.0, 8.0)?;
/// let b = Poi::new("cabin a", 61.09, 8.0)?; // ~10 km north
/// assert!(is_duplicate(&a, &b, 50.0));
/// # Ok::<(), poimerge::PoiError>(())
/// ```
#[inline]
pub fn is_duplicate(a: &Poi, b: &Poi, threshold_meters: f64) -> bool {
    a.name_key() == b.name_key()
        || haversine_distance(a.coordinate(), b.coordinate()) < threshold_meters
}

/// Combine `existing` with a duplicate `incoming` record.
///
/// - `name`, `description`: the longer (by characters after trimming) wins,
///   ties keep `existing`
/// - coordinates and `id`: always `existing`
/// - `elevation`, `symbol`, `link`, `extension`: `incoming` when present,
///   otherwise `existing`
///
/// Operand order matters; the policy is deterministic but not commutative.
pub fn merge(existing: &Poi, incoming: &Poi) -> Poi {
    let name = longer(existing.name(), incoming.name()).to_string();
    let description = longer(existing.description(), incoming.description()).to_string();

    existing
        .clone()
        .replace_name(name)
        .replace_description(description)
        .replace_elevation(incoming.elevation().or(existing.elevation()))
        .replace_symbol(
            incoming
                .symbol()
                .or(existing.symbol())
                .map(str::to_string),
        )
        .replace_link(incoming.link().or(existing.link()).map(str::to_string))
        .replace_extension(incoming.extension().or(existing.extension()).cloned())
}

fn longer<'a>(existing: &'a str, incoming: &'a str) -> &'a str {
    if incoming.trim().chars().count() > existing.trim().chars().count() {
        incoming
    } else {
        existing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::distance::offset_north;

    fn poi_at(name: &str, lat: f64, lon: f64) -> Poi {
        Poi::new(name, lat, lon).unwrap()
    }

    #[test]
    fn test_name_short_circuit() {
        let a = poi_at("Cabin A", 61.0, 8.0);
        let b = poi_at("cabin a", 61.0 + 10_000.0 / 111_195.08, 8.0);
        assert!(is_duplicate(&a, &b, 50.0));
        assert!(is_duplicate(&b, &a, 50.0));
    }

    #[test]
    fn test_distance_boundary_is_strict() {
        let threshold = 50.0;
        let a = poi_at("North", 45.0, 7.0);
        let exact = offset_north(a.coordinate(), threshold);
        let b = poi_at("South", exact.latitude(), exact.longitude());

        let d = haversine_distance(a.coordinate(), b.coordinate());
        // Compare against the computed distance so rounding cannot flip the test.
        assert!(!is_duplicate(&a, &b, d));
        assert!(is_duplicate(&a, &b, d + 1e-6));

        let inside = offset_north(a.coordinate(), threshold - 0.01);
        let c = poi_at("Inside", inside.latitude(), inside.longitude());
        assert!(is_duplicate(&a, &c, threshold));
    }

    #[test]
    fn test_distinct_far_apart() {
        let a = poi_at("Alpha", 45.0, 7.0);
        let b = poi_at("Beta", 45.01, 7.0);
        assert!(!is_duplicate(&a, &b, 50.0));
    }

    #[test]
    fn test_merge_elevation_rules() {
        let with_ele = poi_at("Hut", 45.0, 7.0).with_elevation(120.0);
        let without = poi_at("Hut", 45.0, 7.0);

        assert_eq!(merge(&with_ele, &without).elevation(), Some(120.0));

        let incoming = poi_at("Hut", 45.0, 7.0).with_elevation(340.0);
        assert_eq!(merge(&without, &incoming).elevation(), Some(340.0));
        assert_eq!(merge(&with_ele, &incoming).elevation(), Some(340.0));
    }

    #[test]
    fn test_merge_longer_text_wins() {
        let existing = poi_at("Hut", 45.0, 7.0).with_description("short");
        let incoming = poi_at("Hut Lodge", 45.0001, 7.0).with_description("tiny");

        let merged = merge(&existing, &incoming);
        assert_eq!(merged.name(), "Hut Lodge");
        assert_eq!(merged.description(), "short");
    }

    #[test]
    fn test_merge_ties_keep_existing() {
        let existing = poi_at("Abc", 45.0, 7.0).with_description("one");
        let incoming = poi_at("xyz", 45.0, 7.0).with_description("two");

        let merged = merge(&existing, &incoming);
        assert_eq!(merged.name(), "Abc");
        assert_eq!(merged.description(), "one");
    }

    #[test]
    fn test_merge_length_ignores_padding() {
        let existing = poi_at("Hytta", 45.0, 7.0);
        let incoming = poi_at("  hytt  ", 45.0, 7.0);
        assert_eq!(merge(&existing, &incoming).name(), "Hytta");
    }

    #[test]
    fn test_merge_keeps_existing_position_and_id() {
        let existing = poi_at("A", 45.0, 7.0);
        let incoming = poi_at("Longer name", 45.0002, 7.0001);

        let merged = merge(&existing, &incoming);
        assert_eq!(merged.id(), existing.id());
        assert_eq!(merged.coordinate(), existing.coordinate());
    }

    #[test]
    fn test_merge_optional_fields() {
        let existing = poi_at("A", 45.0, 7.0)
            .with_symbol("Lodge")
            .with_link("https://old")
            .with_extension(&b"old"[..]);
        let bare = poi_at("A", 45.0, 7.0);

        let kept = merge(&existing, &bare);
        assert_eq!(kept.symbol(), Some("Lodge"));
        assert_eq!(kept.link(), Some("https://old"));
        assert_eq!(kept.extension().map(|b| b.as_ref()), Some(&b"old"[..]));

        let replacing = poi_at("A", 45.0, 7.0)
            .with_symbol("Summit")
            .with_extension(&b"new"[..]);
        let replaced = merge(&existing, &replacing);
        assert_eq!(replaced.symbol(), Some("Summit"));
        assert_eq!(replaced.link(), Some("https://old"));
        assert_eq!(replaced.extension().map(|b| b.as_ref()), Some(&b"new"[..]));
    }

    #[test]
    fn test_merge_is_not_commutative() {
        let a = poi_at("Same", 45.0, 7.0).with_symbol("Lodge");
        let b = poi_at("Same", 45.0001, 7.0).with_symbol("Summit");

        assert_eq!(merge(&a, &b).symbol(), Some("Summit"));
        assert_eq!(merge(&b, &a).symbol(), Some("Lodge"));
    }
}
