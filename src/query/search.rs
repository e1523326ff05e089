//! Free-text search over the profile
//!
//! Two independent passes. First the profile itself is located via an
//! explicit two-strategy policy: storage collaborators that provide an
//! indexed text search are asked directly; everything else falls back to
//! case-insensitive substring checks over bio, name, and project
//! title/description. Then, within the matched profile, projects and the
//! flattened skill lists are filtered by the same substring rule.

use async_trait::async_trait;
use serde::Serialize;

use crate::db::schemas::{ProfileDoc, Project};
use crate::types::Result;

/// Storage seam for locating the (single) profile.
///
/// `supports_text_search` decides the strategy; implementations without an
/// index simply return false and never receive `text_search` calls.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// Fetch the current profile wholesale, if one exists
    async fn fetch(&self) -> Result<Option<ProfileDoc>>;

    /// Whether this source can run an indexed text search
    fn supports_text_search(&self) -> bool;

    /// Indexed text search; `Ok(None)` when no profile matched
    async fn text_search(&self, query: &str) -> Result<Option<ProfileDoc>>;
}

/// Minimal profile summary returned by search.
///
/// Deliberately excludes email and links.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: String,
}

impl ProfileSummary {
    fn of(profile: &ProfileDoc) -> Self {
        Self {
            name: profile.name.clone(),
            title: profile.title.clone(),
            bio: profile.bio.clone(),
            location: profile.location.clone(),
        }
    }
}

/// Composite search result
#[derive(Serialize, Clone, Debug, Default)]
pub struct SearchResults {
    pub profile: Option<ProfileSummary>,
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
}

impl SearchResults {
    /// The no-match result: null profile, empty lists
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Locate the profile for a search query.
///
/// Indexed strategy when the source supports it, substring fallback
/// otherwise. A profile either matches or the whole search is empty.
pub async fn locate_profile(
    lookup: &dyn ProfileLookup,
    query: &str,
) -> Result<Option<ProfileDoc>> {
    if lookup.supports_text_search() {
        return lookup.text_search(query).await;
    }

    match lookup.fetch().await? {
        Some(profile) if profile_matches(&profile, query) => Ok(Some(profile)),
        _ => Ok(None),
    }
}

/// Fallback profile-level match: case-insensitive substring containment
/// over bio, name, and project title/description.
fn profile_matches(profile: &ProfileDoc, query: &str) -> bool {
    let needle = query.to_lowercase();

    profile.bio.to_lowercase().contains(&needle)
        || profile.name.to_lowercase().contains(&needle)
        || profile.projects.iter().any(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
}

/// Derive the within-profile search results for an already-located profile.
pub fn search_profile(profile: &ProfileDoc, query: &str) -> SearchResults {
    let needle = query.to_lowercase();

    let projects: Vec<Project> = profile
        .projects
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.skills.iter().any(|s| s.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    // Flattened union of all skill categories; duplicates across
    // categories are kept
    let skills: Vec<String> = profile
        .skills
        .technical
        .iter()
        .chain(profile.skills.soft.iter())
        .chain(profile.skills.languages.iter())
        .filter(|s| s.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    SearchResults {
        profile: Some(ProfileSummary::of(profile)),
        projects,
        skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::Skills;
    use crate::types::FolioError;

    fn sample_profile() -> ProfileDoc {
        ProfileDoc {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            title: "Software Engineer".to_string(),
            bio: "Curious engineer who loves building web apps.".to_string(),
            location: "Bangalore, India".to_string(),
            skills: Skills {
                technical: vec!["JavaScript".to_string(), "React".to_string()],
                soft: vec!["Problem Solving".to_string()],
                languages: vec!["English".to_string(), "Hindi".to_string()],
            },
            projects: vec![
                Project {
                    title: "Portfolio Website".to_string(),
                    description: "Personal portfolio built with React.".to_string(),
                    skills: vec!["React".to_string(), "Tailwind".to_string()],
                    ..Default::default()
                },
                Project {
                    title: "Chat Server".to_string(),
                    description: "Realtime chat backend.".to_string(),
                    skills: vec!["Node.js".to_string()],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    /// In-memory lookup double; `indexed` toggles the search strategy
    struct MemoryLookup {
        profile: Option<ProfileDoc>,
        indexed: bool,
    }

    #[async_trait]
    impl ProfileLookup for MemoryLookup {
        async fn fetch(&self) -> Result<Option<ProfileDoc>> {
            Ok(self.profile.clone())
        }

        fn supports_text_search(&self) -> bool {
            self.indexed
        }

        async fn text_search(&self, query: &str) -> Result<Option<ProfileDoc>> {
            if !self.indexed {
                return Err(FolioError::Database("no text index".to_string()));
            }
            // Whole-word semantics are the storage engine's business; the
            // double only needs deterministic match/no-match behavior.
            Ok(self
                .profile
                .clone()
                .filter(|p| profile_matches(p, query)))
        }
    }

    #[tokio::test]
    async fn test_fallback_strategy_matches_on_bio() {
        let lookup = MemoryLookup {
            profile: Some(sample_profile()),
            indexed: false,
        };

        let found = locate_profile(&lookup, "web apps").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_fallback_strategy_matches_on_project_title() {
        let lookup = MemoryLookup {
            profile: Some(sample_profile()),
            indexed: false,
        };

        assert!(locate_profile(&lookup, "chat server").await.unwrap().is_some());
        assert!(locate_profile(&lookup, "xyz-nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_indexed_strategy_is_used_when_supported() {
        let lookup = MemoryLookup {
            profile: Some(sample_profile()),
            indexed: true,
        };

        assert!(locate_profile(&lookup, "portfolio").await.unwrap().is_some());
        assert!(locate_profile(&lookup, "xyz-nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_profile_at_all_yields_none() {
        let lookup = MemoryLookup {
            profile: None,
            indexed: false,
        };

        assert!(locate_profile(&lookup, "react").await.unwrap().is_none());
    }

    #[test]
    fn test_search_profile_filters_projects_and_skills() {
        let profile = sample_profile();
        let results = search_profile(&profile, "react");

        let titles: Vec<&str> = results.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Portfolio Website"]);
        assert_eq!(results.skills, vec!["React".to_string()]);
    }

    #[test]
    fn test_search_matches_skills_across_categories() {
        let mut profile = sample_profile();
        profile.skills.soft.push("JavaScript".to_string());

        let results = search_profile(&profile, "javascript");
        // Same skill in two categories appears twice
        assert_eq!(results.skills.len(), 2);
    }

    #[test]
    fn test_summary_excludes_contact_and_links() {
        let profile = sample_profile();
        let results = search_profile(&profile, "engineer");

        let summary = results.profile.unwrap();
        assert_eq!(summary.name, "Jane Doe");
        assert_eq!(summary.location, "Bangalore, India");

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("links").is_none());
    }

    #[test]
    fn test_empty_results_shape() {
        let results = SearchResults::empty();
        assert!(results.profile.is_none());
        assert!(results.projects.is_empty());
        assert!(results.skills.is_empty());
    }

    #[test]
    fn test_search_profile_is_idempotent() {
        let profile = sample_profile();
        let first = search_profile(&profile, "node");
        let second = search_profile(&profile, "node");
        assert_eq!(
            first.projects.iter().map(|p| &p.title).collect::<Vec<_>>(),
            second.projects.iter().map(|p| &p.title).collect::<Vec<_>>(),
        );
        assert_eq!(first.skills, second.skills);
    }
}
