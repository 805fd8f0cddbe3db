// src/scraping/score.rs
use super::{AnalyzedJob, Classifier, ScrapedJob, Seniority, SALARY_UNSPECIFIED};

const KEYWORD_IN_DESCRIPTION_WEIGHT: i32 = 10;
const KEYWORD_IN_TITLE_WEIGHT: i32 = 15;
const PROMPT_WORD_WEIGHT: i32 = 5;
const REMOTE_MATCH_BONUS: i32 = 20;
const SALARY_KNOWN_BONUS: i32 = 10;
const SENIORITY_MISMATCH_PENALTY: i32 = 15;

const HIGH_PRIORITY_THRESHOLD: i32 = 50;
const MEDIUM_PRIORITY_THRESHOLD: i32 = 25;

/// Words in the user prompt that signal interest in remote work.
const REMOTE_PROMPT_HINTS: [&str; 3] = ["remote", "удален", "дом"];

/// Weighted additive relevance score. Every term is independent; matching is
/// plain substring containment over lowercased text.
pub fn score_listing(
    title: &str,
    description: &str,
    remote_work: bool,
    seniority: Seniority,
    salary: &str,
    user_prompt: &str,
    priority_keywords: &[String],
) -> i32 {
    let description = description.to_lowercase();
    let title = title.to_lowercase();
    let prompt = user_prompt.to_lowercase();

    let mut score = 0;

    let in_description = priority_keywords
        .iter()
        .filter(|keyword| description.contains(keyword.as_str()))
        .count() as i32;
    score += in_description * KEYWORD_IN_DESCRIPTION_WEIGHT;

    let in_title = priority_keywords
        .iter()
        .filter(|keyword| title.contains(keyword.as_str()))
        .count() as i32;
    score += in_title * KEYWORD_IN_TITLE_WEIGHT;

    let prompt_hits = prompt
        .split_whitespace()
        .filter(|word| word.chars().count() > 3 && description.contains(word))
        .count() as i32;
    score += prompt_hits * PROMPT_WORD_WEIGHT;

    if remote_work && REMOTE_PROMPT_HINTS.iter().any(|hint| prompt.contains(hint)) {
        score += REMOTE_MATCH_BONUS;
    }

    if salary != SALARY_UNSPECIFIED {
        score += SALARY_KNOWN_BONUS;
    }

    if seniority == Seniority::Senior && prompt.contains("junior") {
        score -= SENIORITY_MISMATCH_PENALTY;
    } else if seniority == Seniority::Junior && prompt.contains("senior") {
        score -= SENIORITY_MISMATCH_PENALTY;
    }

    score
}

/// Map a score onto the three priority tiers. 1 is highest.
pub fn bucket(score: i32) -> u8 {
    if score >= HIGH_PRIORITY_THRESHOLD {
        1
    } else if score >= MEDIUM_PRIORITY_THRESHOLD {
        2
    } else {
        3
    }
}

/// "matched/total" over the priority keyword list. The denominator is always
/// the full list length.
pub fn skills_match(description: &str, priority_keywords: &[String]) -> String {
    let text = description.to_lowercase();
    let matched = priority_keywords
        .iter()
        .filter(|keyword| text.contains(keyword.as_str()))
        .count();

    format!("{}/{}", matched, priority_keywords.len())
}

/// Title/company/location header plus the description truncated to 300
/// characters.
pub fn brief_description(title: &str, company: &str, location: &str, description: &str) -> String {
    let truncated = if description.chars().count() > 300 {
        format!("{}...", description.chars().take(300).collect::<String>())
    } else {
        description.to_string()
    };

    format!("{} at {}, {}. {}", title, company, location, truncated)
}

/// Classification and scoring stage: derive every attribute, score, bucket,
/// and order the collection by ascending priority tier (stable).
pub fn analyze(
    jobs: Vec<ScrapedJob>,
    user_prompt: &str,
    priority_keywords: &[String],
    classifier: &Classifier,
) -> Vec<AnalyzedJob> {
    let mut analyzed: Vec<AnalyzedJob> = jobs
        .into_iter()
        .map(|job| {
            let remote_work = classifier.detect_remote(&job.detail.description);
            let seniority = classifier.detect_seniority(&job.detail.description);
            let language = classifier.detect_language(&job.detail.description);

            let score = score_listing(
                &job.listing.title,
                &job.detail.description,
                remote_work,
                seniority,
                &job.detail.salary,
                user_prompt,
                priority_keywords,
            );

            AnalyzedJob {
                brief_description: brief_description(
                    &job.listing.title,
                    &job.listing.company,
                    &job.listing.location,
                    &job.detail.description,
                ),
                skills_match: skills_match(&job.detail.description, priority_keywords),
                remote_work,
                seniority,
                language,
                priority: bucket(score),
                listing: job.listing,
                detail: job.detail,
            }
        })
        .collect();

    analyzed.sort_by_key(|job| job.priority);
    analyzed
}
