//! Skill-frequency ranking
//!
//! Counts skill mentions across projects, work history, and declared
//! technical skills, then ranks them descending. The tally is an explicit
//! insertion-ordered map so the tie-break for equal counts is deterministic:
//! first-encountered wins.

use serde::Serialize;
use std::collections::HashMap;

use crate::db::schemas::ProfileDoc;

/// Default number of ranked skills returned when no limit is given
pub const DEFAULT_TOP_SKILLS_LIMIT: usize = 10;

/// One ranked skill with its occurrence count
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SkillCount {
    pub skill: String,
    pub count: u32,
}

/// Frequency tally preserving first-encounter order.
///
/// Skill names are compared by exact string identity here, not
/// case-normalized: differently-cased spellings accumulate separately.
#[derive(Default)]
struct SkillTally {
    entries: Vec<SkillCount>,
    index: HashMap<String, usize>,
}

impl SkillTally {
    fn increment(&mut self, skill: &str) {
        match self.index.get(skill) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(skill.to_string(), self.entries.len());
                self.entries.push(SkillCount {
                    skill: skill.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Seed a skill with count 1 only if it has not been tallied yet
    fn seed(&mut self, skill: &str) {
        if !self.index.contains_key(skill) {
            self.increment(skill);
        }
    }

    fn into_ranked(mut self, limit: usize) -> Vec<SkillCount> {
        // Stable sort on count only: equal counts keep tally insertion order
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries.truncate(limit);
        self.entries
    }
}

/// Rank skills by occurrence count, descending, truncated to `limit`.
///
/// Counting rule:
/// 1. every project skill occurrence counts 1 (duplicates included);
/// 2. every work-entry skill occurrence counts 1, identically;
/// 3. declared technical skills not already tallied are seeded with 1.
pub fn top_skills(profile: &ProfileDoc, limit: usize) -> Vec<SkillCount> {
    let mut tally = SkillTally::default();

    for project in &profile.projects {
        for skill in &project.skills {
            tally.increment(skill);
        }
    }

    for entry in &profile.work {
        for skill in &entry.skills {
            tally.increment(skill);
        }
    }

    for skill in &profile.skills.technical {
        tally.seed(skill);
    }

    tally.into_ranked(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{Project, Skills, WorkEntry};

    fn project(skills: &[&str]) -> Project {
        Project {
            title: "Project".to_string(),
            description: "A project".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn work(skills: &[&str]) -> WorkEntry {
        WorkEntry {
            company: "TechStart".to_string(),
            position: "Engineer".to_string(),
            duration: "2021 - Present".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn profile(
        projects: Vec<Project>,
        work_entries: Vec<WorkEntry>,
        technical: &[&str],
    ) -> ProfileDoc {
        ProfileDoc {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            projects,
            work: work_entries,
            skills: Skills {
                technical: technical.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ranked(result: &[SkillCount]) -> Vec<(&str, u32)> {
        result.iter().map(|s| (s.skill.as_str(), s.count)).collect()
    }

    #[test]
    fn test_counts_across_projects_work_and_seeded_technical() {
        // Scenario: one project [React, Node.js], one work entry
        // [React, MongoDB], technical [React, Python].
        let p = profile(
            vec![project(&["React", "Node.js"])],
            vec![work(&["React", "MongoDB"])],
            &["React", "Python"],
        );

        let result = top_skills(&p, 10);
        assert_eq!(
            ranked(&result),
            vec![("React", 2), ("Node.js", 1), ("MongoDB", 1), ("Python", 1)]
        );
    }

    #[test]
    fn test_seeding_never_bumps_existing_count() {
        let p = profile(vec![project(&["Rust"])], vec![], &["Rust"]);
        assert_eq!(ranked(&top_skills(&p, 10)), vec![("Rust", 1)]);
    }

    #[test]
    fn test_seeded_only_skills_contribute_exactly_one_each() {
        let p = profile(vec![], vec![], &["Python", "Go", "SQL"]);

        let result = top_skills(&p, usize::MAX);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|s| s.count == 1));
    }

    #[test]
    fn test_duplicates_within_one_list_each_count() {
        let p = profile(vec![project(&["React", "React"])], vec![], &[]);
        assert_eq!(ranked(&top_skills(&p, 10)), vec![("React", 2)]);
    }

    #[test]
    fn test_case_variants_accumulate_separately() {
        let p = profile(
            vec![project(&["react"]), project(&["React"])],
            vec![],
            &[],
        );

        let result = top_skills(&p, 10);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|s| s.count == 1));
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let p = profile(
            vec![
                project(&["A", "B", "C"]),
                project(&["B", "C"]),
                project(&["C"]),
            ],
            vec![],
            &[],
        );

        let result = top_skills(&p, 3);
        assert!(result.len() <= 3);
        for pair in result.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        assert_eq!(result[0].skill, "C");
    }

    #[test]
    fn test_tie_break_is_first_encountered() {
        // Zebra is encountered before Apple; both end with count 1
        let p = profile(vec![project(&["Zebra", "Apple"])], vec![], &[]);
        assert_eq!(ranked(&top_skills(&p, 10)), vec![("Zebra", 1), ("Apple", 1)]);

        // Work-entry skills rank after project skills on ties too
        let p = profile(
            vec![project(&["Node.js"])],
            vec![work(&["MongoDB"])],
            &["Python"],
        );
        assert_eq!(
            ranked(&top_skills(&p, 10)),
            vec![("Node.js", 1), ("MongoDB", 1), ("Python", 1)]
        );
    }

    #[test]
    fn test_idempotent_on_same_snapshot() {
        let p = profile(
            vec![project(&["React", "Node.js"])],
            vec![work(&["React"])],
            &["Python"],
        );

        assert_eq!(top_skills(&p, 10), top_skills(&p, 10));
    }

    #[test]
    fn test_empty_profile_yields_empty_ranking() {
        let p = profile(vec![], vec![], &[]);
        assert!(top_skills(&p, 10).is_empty());
    }
}
