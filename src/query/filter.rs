//! Skill-based project filtering

use crate::db::schemas::{ProfileDoc, Project};

/// Select projects where at least one skill entry contains `skill` as a
/// case-insensitive substring.
///
/// Preserves the original project ordering. Callers must reject an empty
/// skill before invoking; no match is an empty vec, not an error.
pub fn filter_projects_by_skill(profile: &ProfileDoc, skill: &str) -> Vec<Project> {
    let needle = skill.to_lowercase();

    profile
        .projects
        .iter()
        .filter(|project| {
            project
                .skills
                .iter()
                .any(|s| s.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
