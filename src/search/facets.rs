use std::collections::HashMap;

use crate::models::{LanguageCount, Repository, UNKNOWN_LANGUAGE};

/// Number of languages shown in the distribution summary.
pub const TOP_LANGUAGES: usize = 5;

/// Top languages by occurrence, most frequent first.
///
/// Ties keep the order in which each language was first seen in `repos`.
pub fn language_distribution(repos: &[Repository]) -> Vec<LanguageCount> {
    let mut counts: Vec<LanguageCount> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for repo in repos {
        let language = if repo.primary_language.is_empty() {
            UNKNOWN_LANGUAGE
        } else {
            repo.primary_language.as_str()
        };
        let slot = *slots.entry(language).or_insert_with(|| {
            counts.push(LanguageCount::new(language, 0));
            counts.len() - 1
        });
        counts[slot].count += 1;
    }

    // sort_by is stable, so first-seen order survives among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_LANGUAGES);
    counts
}
