// src/scraping/classify.rs
use serde::{Deserialize, Serialize};

/// Position level inferred from a description. Classification is total:
/// every description maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seniority {
    Senior,
    Junior,
    Management,
    #[serde(rename = "Intern-Student")]
    InternStudent,
    #[serde(rename = "Mid-level")]
    MidLevel,
}

impl Seniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Senior => "Senior",
            Seniority::Junior => "Junior",
            Seniority::Management => "Management",
            Seniority::InternStudent => "Intern-Student",
            Seniority::MidLevel => "Mid-level",
        }
    }
}

/// Dominant posting language, decided by keyword signal counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    German,
    Mixed,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::Mixed => "Mixed",
        }
    }
}

/// Keyword-driven attribute classifier. The lists are plain data so they
/// can be extended or localized without touching the detection logic.
#[derive(Debug, Clone)]
pub struct Classifier {
    pub remote_markers: Vec<String>,
    /// Checked in order; the first family with a hit wins.
    pub seniority_tiers: Vec<(Seniority, Vec<String>)>,
    pub english_markers: Vec<String>,
    pub german_markers: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            remote_markers: owned(&[
                "remote",
                "home office",
                "hybrid",
                "remotearbeit",
                "homeoffice",
                "от дома",
            ]),
            seniority_tiers: vec![
                (
                    Seniority::Senior,
                    owned(&["senior", "lead", "principal", "architect"]),
                ),
                (Seniority::Junior, owned(&["junior", "entry", "anfänger"])),
                (
                    Seniority::Management,
                    owned(&["manager", "head", "director", "leitung"]),
                ),
                (
                    Seniority::InternStudent,
                    owned(&["intern", "praktikum", "werkstudent"]),
                ),
            ],
            english_markers: owned(&[
                "responsibilities",
                "requirements",
                "experience",
                "skills",
                "apply",
            ]),
            german_markers: owned(&[
                "anforderungen",
                "verantwortung",
                "erfahrung",
                "kenntnisse",
                "bewerben",
            ]),
        }
    }
}

impl Classifier {
    /// True when any remote/hybrid/home-office marker appears in the text.
    pub fn detect_remote(&self, description: &str) -> bool {
        let text = description.to_lowercase();
        self.remote_markers.iter().any(|marker| text.contains(marker))
    }

    /// First matching tier wins; no tier matching defaults to Mid-level.
    pub fn detect_seniority(&self, description: &str) -> Seniority {
        let text = description.to_lowercase();

        for (level, markers) in &self.seniority_tiers {
            if markers.iter().any(|marker| text.contains(marker)) {
                return *level;
            }
        }

        Seniority::MidLevel
    }

    /// Strictly more English signals than German ones (or vice versa)
    /// decides the language; any tie is Mixed.
    pub fn detect_language(&self, description: &str) -> Language {
        let text = description.to_lowercase();

        let english = self
            .english_markers
            .iter()
            .filter(|marker| text.contains(marker.as_str()))
            .count();
        let german = self
            .german_markers
            .iter()
            .filter(|marker| text.contains(marker.as_str()))
            .count();

        if english > german {
            Language::English
        } else if german > english {
            Language::German
        } else {
            Language::Mixed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detection() {
        let classifier = Classifier::default();
        assert!(classifier.detect_remote("Fully Remote position"));
        assert!(classifier.detect_remote("2 Tage Homeoffice pro Woche"));
        assert!(classifier.detect_remote("работа от дома"));
        assert!(!classifier.detect_remote("on-site only, Berlin office"));
    }

    #[test]
    fn test_seniority_tiers() {
        let classifier = Classifier::default();
        assert_eq!(classifier.detect_seniority("Senior engineer"), Seniority::Senior);
        assert_eq!(classifier.detect_seniority("Principal Architect"), Seniority::Senior);
        assert_eq!(classifier.detect_seniority("junior developer"), Seniority::Junior);
        assert_eq!(
            classifier.detect_seniority("Head of Engineering"),
            Seniority::Management
        );
        assert_eq!(
            classifier.detect_seniority("Werkstudent Data Science"),
            Seniority::InternStudent
        );
    }

    #[test]
    fn test_seniority_defaults_to_mid_level() {
        let classifier = Classifier::default();
        assert_eq!(classifier.detect_seniority("software developer"), Seniority::MidLevel);
        assert_eq!(classifier.detect_seniority(""), Seniority::MidLevel);
    }

    #[test]
    fn test_seniority_priority_order_when_tiers_co_occur() {
        let classifier = Classifier::default();
        // Senior family outranks Junior family
        assert_eq!(
            classifier.detect_seniority("senior role mentoring junior developers"),
            Seniority::Senior
        );
        // Junior family outranks Management family
        assert_eq!(
            classifier.detect_seniority("junior reporting to the engineering manager"),
            Seniority::Junior
        );
    }

    #[test]
    fn test_seniority_is_deterministic() {
        let classifier = Classifier::default();
        let text = "lead architect, senior team";
        assert_eq!(
            classifier.detect_seniority(text),
            classifier.detect_seniority(text)
        );
    }

    #[test]
    fn test_language_counting() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.detect_language("Responsibilities and requirements: apply now"),
            Language::English
        );
        assert_eq!(
            classifier.detect_language("Anforderungen und Kenntnisse, jetzt bewerben"),
            Language::German
        );
    }

    #[test]
    fn test_language_tie_is_mixed() {
        let classifier = Classifier::default();
        // zero signals on both sides
        assert_eq!(classifier.detect_language("short text"), Language::Mixed);
        // one signal each
        assert_eq!(
            classifier.detect_language("requirements / anforderungen"),
            Language::Mixed
        );
    }
}
