// Integration tests for the built-in skill dataset and recommendation copy.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use folio_widgets::recommend::{VisitorType, recommendations};
use folio_widgets::skills::{Category, DEFAULT_SKILLS, by_category, default_skills};

#[test]
fn default_skill_names_are_unique_and_nonempty() {
    let mut seen = HashSet::new();
    for (name, _, _) in DEFAULT_SKILLS {
        assert!(!name.trim().is_empty(), "blank skill name");
        assert!(seen.insert(*name), "duplicate skill '{}' in DEFAULT_SKILLS", name);
    }
}

#[test]
fn default_levels_are_percentages() {
    for (name, level, _) in DEFAULT_SKILLS {
        assert!(*level <= 100, "skill '{}' has level {} > 100", name, level);
    }
}

#[test]
fn categories_partition_the_dataset() {
    let skills = default_skills();
    let total: usize = Category::ALL
        .iter()
        .map(|c| by_category(&skills, *c).len())
        .sum();
    assert_eq!(total, skills.len());
    assert!(!by_category(&skills, Category::Frontend).is_empty());
    assert!(!by_category(&skills, Category::Backend).is_empty());
}

#[test]
fn recommendation_titles_are_distinct_per_visitor() {
    for v in [
        VisitorType::Recruiter,
        VisitorType::Peer,
        VisitorType::Client,
        VisitorType::Unknown,
    ] {
        let titles: HashSet<&str> = recommendations(v).iter().map(|r| r.title).collect();
        assert_eq!(titles.len(), recommendations(v).len(), "repeated title for {:?}", v);
    }
}
