// src/scraping/salary.rs
use std::sync::LazyLock;

use regex::Regex;

use super::SALARY_UNSPECIFIED;

/// Ordered salary matchers, most specific first. Matching runs over the
/// lowercased description, so the token patterns stay lowercase.
static SALARY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // euro-prefixed amount, optionally a range: "€55.000" / "€70.000 - €90.000"
        r"€\s*[0-9]{2,3}[.,]?[0-9]{3}(?:[\s€-]*[0-9]{2,3}[.,]?[0-9]{3})?",
        // euro-suffixed amount: "55.000 €"
        r"[0-9]{2,3}[.,]?[0-9]{3}\s*€",
        // "salary ... 55.000"
        r"salary.*?[0-9]{2,3}[.,]?[0-9]{3}",
        // "gehalt ... 55.000"
        r"gehalt.*?[0-9]{2,3}[.,]?[0-9]{3}",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid salary pattern"))
    .collect()
});

/// Return the first salary substring found in priority order, or the
/// "unspecified" sentinel. Only the first matching pattern is consulted.
pub fn extract_salary(description: &str) -> String {
    let text = description.to_lowercase();

    for pattern in SALARY_PATTERNS.iter() {
        if let Some(found) = pattern.find(&text) {
            return found.as_str().to_string();
        }
    }

    SALARY_UNSPECIFIED.to_string()
}
