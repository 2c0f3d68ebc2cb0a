//! Fill color classification.
//!
//! Two classifiers are available and they accept different sets of shapes:
//! the exact table only knows the handful of fills used on the bone slides,
//! the heuristic buckets any color by channel thresholds.
use crate::common::style::RGBColor;
use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Anatomical name for accepted colors that do not name a bone.
pub const UNKNOWN_REGION: &str = "Unknown_region";

/// Compile-time table of known region fills.
///
/// Keys are uppercase hex; values are `(color name, anatomical name)`.
static EXACT_COLORS: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "C133AD" => ("pink", "Ischium"),
    "FF00E6" => ("magenta", "Ischium"),
    "2F8E29" => ("green", "Pubis_and_Obturator_foramen"),
    "008000" => ("green_variant", "Pubis_and_Obturator_foramen"),
    "FF6600" => ("orange", UNKNOWN_REGION),
    "FF0000" => ("red", UNKNOWN_REGION),
};

/// Result of classifying a fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMatch {
    /// Symbolic color name (`pink`, `green_variant`, ...)
    pub color_name: &'static str,
    /// Default anatomical name for the color, before text disambiguation
    pub anatomical_name: &'static str,
}

/// Maps a fill color to a symbolic name, or rejects it.
pub trait ColorClassifier: Send + Sync {
    fn classify(&self, color: RGBColor) -> Option<ColorMatch>;
}

/// Exact hex lookup; anything outside the table is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactColorMap;

impl ColorClassifier for ExactColorMap {
    fn classify(&self, color: RGBColor) -> Option<ColorMatch> {
        EXACT_COLORS
            .get(color.to_hex().as_str())
            .map(|&(color_name, anatomical_name)| ColorMatch {
                color_name,
                anatomical_name,
            })
    }
}

/// Channel-threshold buckets: `pink`, `green` or `orange`.
///
/// The thresholds are kept exactly as shipped. They are loose: pure red and
/// pure white both land in `pink`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    /// Bucket name for a color, if any.
    pub fn bucket(color: RGBColor) -> Option<&'static str> {
        let (r, g, b) = (color.r, color.g, color.b);

        if r > 100 {
            // magenta / hot pink
            if r > g && r > 150 && g < 150 && (b > 100 || (r > 200 && g < 100)) {
                return Some("pink");
            }
            // light pink
            if r > 150 && g > 100 && b > 100 && r >= g && r >= b {
                return Some("pink");
            }
            // rose / salmon
            if r > 180 && g > 80 && g < 180 && b > 80 && b < 180 {
                return Some("pink");
            }
        }

        if g > 100 {
            if g > r && g > b && g > 120 {
                return Some("green");
            }
            if g > 150 && r < g && b < g {
                return Some("green");
            }
            if g > 150 && r > 100 && b < 150 && g >= r {
                return Some("green");
            }
        }

        if r > 150 {
            if g > 50 && g < 220 && b < 150 && r > g && g > b {
                return Some("orange");
            }
            if g > 100 && b < 100 {
                return Some("orange");
            }
            if r > 200 && g > 30 && g < 180 && b < 120 {
                return Some("orange");
            }
        }

        None
    }
}

impl ColorClassifier for HeuristicClassifier {
    fn classify(&self, color: RGBColor) -> Option<ColorMatch> {
        let color_name = Self::bucket(color)?;
        let anatomical_name = match color_name {
            "pink" => "Ischium",
            "green" => "Pubis_and_Obturator_foramen",
            _ => UNKNOWN_REGION,
        };
        Some(ColorMatch {
            color_name,
            anatomical_name,
        })
    }
}

/// Which classifier a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    #[default]
    Exact,
    Heuristic,
}

impl ClassifierMode {
    pub fn classifier(self) -> &'static dyn ColorClassifier {
        match self {
            ClassifierMode::Exact => &ExactColorMap,
            ClassifierMode::Heuristic => &HeuristicClassifier,
        }
    }
}

/// Refine a default anatomical name using the slide's text labels.
///
/// Only pubis colors are refined. Labels are scanned in document order and
/// the first one mentioning either "obturator foramen" or "pubis" (without
/// "obturator") decides. Matching is case-insensitive.
pub fn resolve_anatomical_name<S: AsRef<str>>(default: &str, labels: &[S]) -> String {
    if default.contains("Pubis") {
        for label in labels {
            let text = label.as_ref().to_lowercase();
            let obturator = text.contains("obturator");
            if obturator && text.contains("foramen") {
                return "Pubis_with_Obturator_foramen".to_string();
            }
            if text.contains("pubis") && !obturator {
                return "Pubis".to_string();
            }
        }
    }
    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> RGBColor {
        RGBColor::from_hex(s).unwrap()
    }

    #[test]
    fn test_exact_map() {
        let m = ExactColorMap.classify(hex("c133ad")).unwrap();
        assert_eq!(m.anatomical_name, "Ischium");
        assert_eq!(m.color_name, "pink");

        let m = ExactColorMap.classify(hex("2F8E29")).unwrap();
        assert_eq!(m.anatomical_name, "Pubis_and_Obturator_foramen");

        let m = ExactColorMap.classify(hex("FF0000")).unwrap();
        assert_eq!(m.anatomical_name, UNKNOWN_REGION);

        assert!(ExactColorMap.classify(hex("C133AE")).is_none());
        assert!(ExactColorMap.classify(RGBColor::WHITE).is_none());
    }

    #[test]
    fn test_heuristic_buckets() {
        let cases = [
            ("FFFFFF", Some("pink")),
            ("FF0000", Some("pink")),
            ("FF4500", Some("pink")),
            ("FFC0CB", Some("pink")),
            ("FF1493", Some("pink")),
            ("000000", None),
            ("0000FF", None),
            ("808080", None),
            ("00FF00", Some("green")),
            ("90EE90", Some("green")),
            ("FFA500", Some("orange")),
            ("FFD700", Some("orange")),
        ];
        for (value, expected) in cases {
            assert_eq!(HeuristicClassifier::bucket(hex(value)), expected, "{value}");
        }
    }

    #[test]
    fn test_heuristic_anatomical_defaults() {
        let m = HeuristicClassifier.classify(hex("2F8E29")).unwrap();
        assert_eq!(m.color_name, "green");
        assert_eq!(m.anatomical_name, "Pubis_and_Obturator_foramen");
        let m = HeuristicClassifier.classify(hex("FFA500")).unwrap();
        assert_eq!(m.anatomical_name, UNKNOWN_REGION);
    }

    #[test]
    fn test_mode_selects_classifier() {
        let white = RGBColor::WHITE;
        assert!(ClassifierMode::Exact.classifier().classify(white).is_none());
        assert!(ClassifierMode::Heuristic.classifier().classify(white).is_some());
    }

    #[test]
    fn test_pubis_disambiguation() {
        let base = "Pubis_and_Obturator_foramen";
        assert_eq!(
            resolve_anatomical_name(base, &["Ilium", "Obturator Foramen"]),
            "Pubis_with_Obturator_foramen"
        );
        assert_eq!(resolve_anatomical_name(base, &["Superior ramus of PUBIS"]), "Pubis");
        assert_eq!(
            resolve_anatomical_name(base, &["Pubis", "obturator foramen"]),
            "Pubis"
        );
        assert_eq!(resolve_anatomical_name(base, &["obturator groove"]), base);
        assert_eq!(resolve_anatomical_name::<&str>(base, &[]), base);
        assert_eq!(resolve_anatomical_name("Ischium", &["pubis"]), "Ischium");
    }
}
