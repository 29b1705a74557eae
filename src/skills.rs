//! Skill records shared by the radar chart and the reaction game.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WidgetError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Frontend,
    Backend,
    Design,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Frontend,
        Category::Backend,
        Category::Design,
        Category::Other,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0..=100.
    pub level: u8,
    pub category: Category,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: u8, category: Category) -> Self {
        Self {
            name: name.into(),
            level,
            category,
        }
    }
}

// -----------------------------------------------------------------------------
// Default dataset (used when the host page does not configure its own list).
// Order matters: it fixes the angular position of each radar axis.
// -----------------------------------------------------------------------------

pub const DEFAULT_SKILLS: &[(&str, u8, Category)] = &[
    ("React", 90, Category::Frontend),
    ("Next.js", 85, Category::Frontend),
    ("TypeScript", 88, Category::Frontend),
    ("Node.js", 80, Category::Backend),
    ("GraphQL", 75, Category::Backend),
    ("Three.js", 70, Category::Frontend),
    ("GSAP", 80, Category::Frontend),
    ("Tailwind CSS", 90, Category::Frontend),
    ("UI/UX Design", 75, Category::Design),
    ("Docker", 65, Category::Backend),
    ("AWS", 60, Category::Backend),
    ("MongoDB", 70, Category::Backend),
];

pub fn default_skills() -> Vec<Skill> {
    DEFAULT_SKILLS
        .iter()
        .map(|&(name, level, category)| Skill::new(name, level, category))
        .collect()
}

/// Reject levels outside 0..=100. Names are not checked for uniqueness.
pub fn validate(skills: &[Skill]) -> Result<()> {
    match skills.iter().find(|s| s.level > 100) {
        Some(bad) => Err(WidgetError::InvalidSkill {
            name: bad.name.clone(),
            level: bad.level,
        }),
        None => Ok(()),
    }
}

/// Names in dataset order; this is the pool the game draws targets from.
pub fn skill_names(skills: &[Skill]) -> Vec<String> {
    skills.iter().map(|s| s.name.clone()).collect()
}

/// Skills of one category, keeping dataset order (per-category level bars).
pub fn by_category(skills: &[Skill], category: Category) -> Vec<&Skill> {
    skills.iter().filter(|s| s.category == category).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_skills_match_table() {
        let skills = default_skills();
        assert_eq!(skills.len(), DEFAULT_SKILLS.len());
        assert_eq!(skills[0], Skill::new("React", 90, Category::Frontend));
        assert!(validate(&skills).is_ok());
    }

    #[test]
    fn validate_rejects_level_over_100() {
        let skills = vec![
            Skill::new("Rust", 100, Category::Backend),
            Skill::new("Cobol", 101, Category::Other),
        ];
        match validate(&skills) {
            Err(WidgetError::InvalidSkill { name, level }) => {
                assert_eq!(name, "Cobol");
                assert_eq!(level, 101);
            }
            other => panic!("expected InvalidSkill, got {other:?}"),
        }
    }

    #[test]
    fn by_category_keeps_order() {
        let skills = default_skills();
        let design = by_category(&skills, Category::Design);
        assert_eq!(design.len(), 1);
        assert_eq!(design[0].name, "UI/UX Design");
        let backend: Vec<&str> = by_category(&skills, Category::Backend)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(backend, ["Node.js", "GraphQL", "Docker", "AWS", "MongoDB"]);
        assert!(by_category(&skills, Category::Other).is_empty());
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Frontend).unwrap();
        assert_eq!(json, "\"frontend\"");
        let skill: Skill =
            serde_json::from_str(r#"{"name":"Figma","level":60,"category":"design"}"#).unwrap();
        assert_eq!(skill.category, Category::Design);
    }
}
