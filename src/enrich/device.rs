//! Shortened copies of POIs for GPS devices with small displays.

use crate::enrich::symbols::suggest_symbol;
use crate::poi::Poi;

const ELLIPSIS: &str = "...";

/// Length limits of a target device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceProfile {
    pub max_name_chars: usize,
    pub max_description_chars: usize,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            max_name_chars: 30,
            max_description_chars: 100,
        }
    }
}

impl DeviceProfile {
    /// A copy of `poi` that fits this device.
    ///
    /// The name loses everything but letters, digits, whitespace, `-` and
    /// `_`; long names and descriptions are cut and end in `...`; a missing
    /// symbol is filled in from [`suggest_symbol`]. The id is unchanged.
    ///
    /// A name with nothing left after cleanup is shortened from its original
    /// text instead.
    pub fn prepare(&self, poi: &Poi) -> Poi {
        let cleaned: String = poi
            .name()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
            .collect();
        let source = if cleaned.trim().is_empty() {
            poi.name()
        } else {
            cleaned.as_str()
        };
        let name = truncate(source, self.max_name_chars).trim().to_string();

        let description = truncate(poi.description(), self.max_description_chars)
            .trim()
            .to_string();

        let symbol = poi
            .symbol()
            .map(str::to_string)
            .unwrap_or_else(|| suggest_symbol(poi).to_string());

        poi.clone()
            .replace_name(name)
            .replace_description(description)
            .replace_symbol(Some(symbol))
    }

    pub fn prepare_all(&self, pois: &[Poi]) -> Vec<Poi> {
        pois.iter().map(|poi| self.prepare(poi)).collect()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return ELLIPSIS[..max_chars].to_string();
    }
    let mut out: String = text.chars().take(max_chars - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        let poi = Poi::new("Turtagrø (hotel)!", 61.5, 7.8).unwrap();
        let prepared = DeviceProfile::default().prepare(&poi);
        assert_eq!(prepared.name(), "Turtagrø hotel");
        assert_eq!(prepared.id(), poi.id());
    }

    #[test]
    fn test_truncates_long_text() {
        let poi = Poi::new("A".repeat(40), 61.5, 7.8)
            .unwrap()
            .with_description("d".repeat(150));
        let prepared = DeviceProfile::default().prepare(&poi);

        assert_eq!(prepared.name().chars().count(), 30);
        assert!(prepared.name().ends_with("..."));
        assert_eq!(prepared.description().chars().count(), 100);
        assert!(prepared.description().ends_with("..."));
    }

    #[test]
    fn test_short_text_untouched() {
        let poi = Poi::new("Short", 61.5, 7.8)
            .unwrap()
            .with_description("Fine as is")
            .with_symbol("Flag");
        let prepared = DeviceProfile::default().prepare(&poi);
        assert_eq!(prepared.name(), "Short");
        assert_eq!(prepared.description(), "Fine as is");
        assert_eq!(prepared.symbol(), Some("Flag"));
    }

    #[test]
    fn test_fills_missing_symbol() {
        let poi = Poi::new("Skagastølsbu", 61.45, 7.85).unwrap();
        let prepared = DeviceProfile::default().prepare(&poi);
        assert_eq!(prepared.symbol(), Some("Lodge"));
    }

    #[test]
    fn test_all_punctuation_name_kept() {
        let poi = Poi::new("?!", 61.5, 7.8).unwrap();
        assert_eq!(DeviceProfile::default().prepare(&poi).name(), "?!");
    }

    #[test]
    fn test_tiny_limits_never_exceeded() {
        let poi = Poi::new("Kjeragbolten", 59.0339, 6.5933)
            .unwrap()
            .with_description("Boulder wedged in a crevasse");
        for limit in 0..=4 {
            let profile = DeviceProfile {
                max_name_chars: limit,
                max_description_chars: limit,
            };
            let prepared = profile.prepare(&poi);
            assert!(prepared.name().chars().count() <= limit, "limit {}", limit);
            assert!(prepared.description().chars().count() <= limit, "limit {}", limit);
        }

        assert_eq!(truncate("abcdef", 2), "..");
        assert_eq!(truncate("abcdef", 4), "a...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
